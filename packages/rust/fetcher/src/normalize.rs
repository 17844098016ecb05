//! Flatten page markup into whitespace-normalized text lines.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node};

/// Elements whose text content never renders.
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn clean(s: &str) -> String {
    static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    WS_RE.replace_all(s, " ").trim().to_string()
}

/// Parse `html` and return its visible text as non-empty, cleaned lines.
pub fn normalize_lines(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    normalize_document(&doc)
}

/// Same as [`normalize_lines`] for an already parsed document.
pub fn normalize_document(doc: &Html) -> Vec<String> {
    flatten_text(doc)
        .split('\n')
        .map(clean)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Concatenate visible text nodes in document order.
///
/// `<br>` becomes a newline and every text node is followed by one, so
/// separate text segments never run together on a line.
fn flatten_text(doc: &Html) -> String {
    let mut out = String::new();

    for node in doc.tree.root().descendants() {
        match node.value() {
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Text(text) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
                });
                if !hidden {
                    out.push_str(text);
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn br_splits_entries_into_lines() {
        let html = "<p>Alice Example - Jan 2, 1990<br>Bob Example - Feb 3, 1991<br/>Carol</p>";
        let lines = normalize_lines(html);
        assert_eq!(
            lines,
            vec![
                "Alice Example - Jan 2, 1990",
                "Bob Example - Feb 3, 1991",
                "Carol"
            ]
        );
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        let html = "<div>  Dan \t  Example\u{00A0}\u{00A0}(heart attack)   </div>";
        let lines = normalize_lines(html);
        assert_eq!(lines, vec!["Dan Example (heart attack)"]);
    }

    #[test]
    fn inline_markup_separates_segments() {
        let html = r#"<p><b>Eve Example</b> - <a href="/x">Hollywood</a>, 1984</p>"#;
        let lines = normalize_lines(html);
        assert_eq!(lines, vec!["Eve Example", "-", "Hollywood", ", 1984"]);
    }

    #[test]
    fn scripts_styles_and_comments_are_skipped() {
        let html = r#"<html><head><style>p { color: red }</style>
            <script>var year = 1999;</script></head>
            <body><!-- 2001 --><p>Visible line</p></body></html>"#;
        let lines = normalize_lines(html);
        assert_eq!(lines, vec!["Visible line"]);
    }

    #[test]
    fn malformed_markup_yields_partial_text() {
        let html = "<table><tr><td>Frank Example - 4/5/1966<td>Ohio</p></div>";
        let lines = normalize_lines(html);
        assert!(lines.contains(&"Frank Example - 4/5/1966".to_string()));
        assert!(lines.contains(&"Ohio".to_string()));
    }

    #[test]
    fn output_never_has_double_or_edge_whitespace() {
        let html = "<pre>\n\n  a  \n\t\tb   c \r\n  \n</pre><p>\u{2003}d\u{2003}\u{2003}e</p>";
        for line in normalize_lines(html) {
            assert!(!line.is_empty());
            assert_eq!(line, line.trim());
            let chars: Vec<char> = line.chars().collect();
            assert!(
                !chars
                    .windows(2)
                    .any(|w| w[0].is_whitespace() && w[1].is_whitespace()),
                "double whitespace in {line:?}"
            );
        }
    }

    #[test]
    fn clean_handles_empty_and_blank() {
        assert_eq!(clean(""), "");
        assert_eq!(clean(" \n\t "), "");
    }
}
