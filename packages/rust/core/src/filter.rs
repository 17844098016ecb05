//! Date-like line detection.
//!
//! A line is kept as a candidate entry when it is at least [`MIN_LINE_CHARS`]
//! characters long and contains one of three date shapes:
//! `March 4, 1977`, `3/4/77`, or a standalone year from 1900 to 2099.

use std::sync::LazyLock;

use regex::Regex;

/// Shortest line (in characters) that can be an entry.
pub const MIN_LINE_CHARS: usize = 10;

const MONTH: &str = r"(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:{MONTH}\s+\d{{1,2}},\s+\d{{4}})|(?:\d{{1,2}}/\d{{1,2}}/\d{{2,4}})|\b(?:19\d{{2}}|20\d{{2}})\b"
    ))
    .expect("valid regex")
});

/// Whether `line` contains any recognized date shape. Ignores length.
pub fn has_date(line: &str) -> bool {
    DATE_RE.is_match(line)
}

/// Whether `line` looks like an entry.
pub fn is_entry_line(line: &str) -> bool {
    line.chars().count() >= MIN_LINE_CHARS && has_date(line)
}

/// Keep only entry-like lines, preserving order.
pub fn filter_entries(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(String::as_str)
        .filter(|line| is_entry_line(line))
        .collect()
}
