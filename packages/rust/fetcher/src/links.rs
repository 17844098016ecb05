//! Wikipedia link collection.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static ANCHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

static WIKI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)wikipedia\.org/wiki/").expect("valid regex"));

/// Whether an href points at a Wikipedia article.
pub fn is_wiki_link(href: &str) -> bool {
    WIKI_RE.is_match(href)
}

/// Raw href values of every anchor that targets a Wikipedia article.
///
/// Document order, duplicates kept, hrefs returned exactly as written.
pub fn collect_wiki_links(doc: &Html) -> Vec<String> {
    doc.select(&ANCHOR_SEL)
        .map(|a| a.value().attr("href").unwrap_or(""))
        .filter(|href| is_wiki_link(href))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_wikipedia_article_links() {
        let html = r#"<html><body>
            <a href="https://en.wikipedia.org/wiki/Jane_Q._Public">Jane</a>
            <a href="https://www.imdb.com/name/nm0000001/">IMDb</a>
            <a href="/Died/80s.shtml">80s</a>
            <a name="top">no href</a>
            <a href="HTTP://EN.WIKIPEDIA.ORG/WIKI/John_Doe">John</a>
        </body></html>"#;

        let doc = Html::parse_document(html);
        let links = collect_wiki_links(&doc);

        assert_eq!(
            links,
            vec![
                "https://en.wikipedia.org/wiki/Jane_Q._Public",
                "HTTP://EN.WIKIPEDIA.ORG/WIKI/John_Doe",
            ]
        );
    }

    #[test]
    fn duplicates_are_preserved() {
        let html = r#"<a href="//en.wikipedia.org/wiki/A">a</a><a href="//en.wikipedia.org/wiki/A">a</a>"#;
        let doc = Html::parse_document(html);
        assert_eq!(collect_wiki_links(&doc).len(), 2);
    }

    #[test]
    fn wikipedia_root_is_not_an_article() {
        assert!(!is_wiki_link("https://www.wikipedia.org/"));
        assert!(is_wiki_link("https://de.wikipedia.org/wiki/Berlin"));
    }
}
