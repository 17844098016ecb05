//! Page fetching, text normalization, and link collection.
//!
//! This crate provides:
//! - [`Fetcher`]: HTTP client with best-effort charset decoding
//! - [`normalize`]: markup → whitespace-collapsed text lines
//! - [`links`]: Wikipedia article link collection
//! - [`parse_page`]: one parse feeding both of the above

pub mod fetch;
pub mod links;
pub mod normalize;

use scraper::Html;

pub use fetch::{Fetcher, decode_body};
pub use links::{collect_wiki_links, is_wiki_link};
pub use normalize::{clean, normalize_document, normalize_lines};

/// Text lines and Wikipedia links extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Visible text lines, document order.
    pub lines: Vec<String>,
    /// Raw Wikipedia hrefs, document order.
    pub links: Vec<String>,
}

/// Parse `html` once and extract its lines and Wikipedia links.
pub fn parse_page(html: &str) -> ParsedPage {
    let doc = Html::parse_document(html);
    ParsedPage {
        lines: normalize_document(&doc),
        links: collect_wiki_links(&doc),
    }
}
