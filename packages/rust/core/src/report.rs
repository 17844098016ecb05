//! Plain-text report buffer and writer.

use std::path::Path;

use chrono::NaiveDateTime;

use seeing_stars_shared::{Entry, Result, SourceOutcome, StarsError};

/// Maximum raw lines dumped for a page with no date-like lines.
pub const RAW_LINE_LIMIT: usize = 200;

/// Width of the `=` rule around each source banner.
const RULE_WIDTH: usize = 90;

/// Prefix of the header line carrying the run timestamp.
pub const GENERATED_PREFIX: &str = "Generated: ";

/// Append-only report buffer.
#[derive(Debug, Clone)]
pub struct Report {
    lines: Vec<String>,
    total_entries: usize,
}

impl Report {
    /// Start a report with the fixed header.
    pub fn new(generated: NaiveDateTime) -> Self {
        let lines = vec![
            "Seeing-Stars Summary Extract".to_string(),
            format!("{GENERATED_PREFIX}{}", generated.format("%Y-%m-%dT%H:%M:%S")),
            "Requested fields: Name | Date of death | Location | Cause | Wikipedia (if available)"
                .to_string(),
            "NOTE: This is a loose extraction. Some lines may need manual cleanup.".to_string(),
            String::new(),
        ];
        Self {
            lines,
            total_entries: 0,
        }
    }

    /// Entries written so far.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Rule, `SOURCE:` line, rule.
    pub fn push_source_banner(&mut self, url: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.lines.push(rule.clone());
        self.lines.push(format!("SOURCE: {url}"));
        self.lines.push(rule);
    }

    /// Inline fetch failure for the current source.
    pub fn push_error(&mut self, reason: &str) {
        self.lines.push(format!("[ERROR] Could not fetch page: {reason}"));
        self.lines.push(String::new());
    }

    /// Raw-line dump for a page with no date-like lines.
    pub fn push_debug(&mut self, raw_lines: &[String]) {
        self.lines.push(format!(
            "[DEBUG] No date-like lines found. First {RAW_LINE_LIMIT} raw lines from page:"
        ));
        self.lines.extend(
            raw_lines
                .iter()
                .take(RAW_LINE_LIMIT)
                .map(|line| format!("- RAW: {line}")),
        );
        self.lines.push(String::new());
    }

    /// Entry blocks for the current source, then a closing blank line.
    pub fn push_entries(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.total_entries += 1;
            self.lines.extend(entry.render());
        }
        self.lines.push(String::new());
    }

    /// Append one source's section body (everything after the banner).
    pub fn push_outcome(&mut self, outcome: &SourceOutcome) {
        match outcome {
            SourceOutcome::Failed { reason } => self.push_error(reason),
            SourceOutcome::NoEntries { raw_lines } => self.push_debug(raw_lines),
            SourceOutcome::Entries(entries) => self.push_entries(entries),
        }
    }

    /// The report text: lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the report to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|e| StarsError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    #[test]
    fn header_layout() {
        let report = Report::new(generated());
        let text = report.render();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "Seeing-Stars Summary Extract");
        assert_eq!(lines[1], "Generated: 2024-05-06T07:08:09");
        assert_eq!(
            lines[2],
            "Requested fields: Name | Date of death | Location | Cause | Wikipedia (if available)"
        );
        assert_eq!(
            lines[3],
            "NOTE: This is a loose extraction. Some lines may need manual cleanup."
        );
        assert_eq!(lines[4], "");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn banner_and_entries_layout() {
        let mut report = Report::new(generated());
        report.push_source_banner("https://example.com/Died/70s.shtml");
        report.push_entries(&[Entry {
            name_guess: "Jane Q. Public".into(),
            summary_line: "Jane Q. Public - March 4, 1977, Ohio".into(),
            wikipedia_link: "https://en.wikipedia.org/wiki/Jane_Q._Public".into(),
        }]);

        let rule = "=".repeat(90);
        let expected_tail = [
            rule.as_str(),
            "SOURCE: https://example.com/Died/70s.shtml",
            rule.as_str(),
            "- Name: Jane Q. Public",
            "  Summary line: Jane Q. Public - March 4, 1977, Ohio",
            "  Wikipedia: https://en.wikipedia.org/wiki/Jane_Q._Public",
            "",
            "",
        ]
        .join("\n");

        assert!(report.render().ends_with(&expected_tail));
        assert_eq!(report.total_entries(), 1);
    }

    #[test]
    fn error_block_is_one_line_plus_blank() {
        let mut report = Report::new(generated());
        report.push_outcome(&SourceOutcome::Failed {
            reason: "HTTP 503 for url: https://example.com/".into(),
        });
        let text = report.render();
        assert!(text.ends_with(
            "[ERROR] Could not fetch page: HTTP 503 for url: https://example.com/\n"
        ));
        assert_eq!(report.total_entries(), 0);
    }

    #[test]
    fn debug_block_is_capped() {
        let raw: Vec<String> = (0..250).map(|i| format!("line {i}")).collect();
        let mut report = Report::new(generated());
        report.push_debug(&raw);

        let text = report.render();
        assert_eq!(text.matches("- RAW: ").count(), RAW_LINE_LIMIT);
        assert!(text.contains("- RAW: line 199"));
        assert!(!text.contains("- RAW: line 200"));
        assert!(text.contains("[DEBUG] No date-like lines found. First 200 raw lines from page:"));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale content that is much longer than the report body").unwrap();

        let report = Report::new(generated());
        report.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());
        assert!(!written.contains("stale"));
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.txt");
        let err = Report::new(generated()).write_to(&path).unwrap_err();
        assert!(matches!(err, StarsError::Io { .. }));
    }
}
