//! Heuristic name guessing and Wikipedia link association.

use std::sync::LazyLock;

use regex::Regex;

use seeing_stars_fetcher::clean;
use seeing_stars_shared::Entry;

/// Characters that end the name portion of an entry line.
const NAME_SEPARATORS: [char; 5] = ['-', '–', '—', '(', '['];

/// Text before the earliest separator, whitespace-collapsed.
///
/// The earliest separator of any kind wins; a line without one is returned
/// whole.
pub fn name_guess(line: &str) -> String {
    let head = match line.find(NAME_SEPARATORS) {
        Some(idx) => &line[..idx],
        None => line,
    };
    clean(head)
}

/// Lowercased name with non-alphanumeric runs replaced by `_`, edges trimmed.
pub fn name_token(name: &str) -> String {
    static NON_ALNUM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

    NON_ALNUM_RE
        .replace_all(&name.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// First link whose lowercase form contains the name token, or `""`.
pub fn associate_link<'a>(name: &str, links: &'a [String]) -> &'a str {
    let token = name_token(name);
    if token.is_empty() {
        return "";
    }
    links
        .iter()
        .find(|link| link.to_lowercase().contains(&token))
        .map_or("", String::as_str)
}

/// Build an [`Entry`] from a date-like line and the page's links.
pub fn format_entry(line: &str, links: &[String]) -> Entry {
    let name_guess = name_guess(line);
    let wikipedia_link = associate_link(&name_guess, links).to_string();
    Entry {
        name_guess,
        summary_line: line.to_string(),
        wikipedia_link,
    }
}
