//! Core domain types for a single extraction run.

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One loosely parsed death record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Text before the first dash/parenthesis/bracket, whitespace-collapsed.
    pub name_guess: String,
    /// The date-like line the entry was built from, unmodified.
    pub summary_line: String,
    /// First collected Wikipedia link mentioning the name token, or empty.
    pub wikipedia_link: String,
}

impl Entry {
    /// Report lines for this entry, ending with a blank separator.
    pub fn render(&self) -> [String; 4] {
        [
            format!("- Name: {}", self.name_guess),
            format!("  Summary line: {}", self.summary_line),
            format!("  Wikipedia: {}", self.wikipedia_link),
            String::new(),
        ]
    }
}

// ---------------------------------------------------------------------------
// SourceOutcome
// ---------------------------------------------------------------------------

/// What one configured source contributed to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Fetch failed; the message is embedded in the report.
    Failed { reason: String },
    /// Page fetched but no date-like lines; carries the leading raw lines.
    NoEntries { raw_lines: Vec<String> },
    /// At least one entry extracted.
    Entries(Vec<Entry>),
}

impl SourceOutcome {
    /// Number of entries this source adds to the run total.
    pub fn entry_count(&self) -> usize {
        match self {
            Self::Entries(entries) => entries.len(),
            Self::Failed { .. } | Self::NoEntries { .. } => 0,
        }
    }

    /// Short label for logs and progress output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Failed { .. } => "failed",
            Self::NoEntries { .. } => "empty",
            Self::Entries(_) => "entries",
        }
    }
}
