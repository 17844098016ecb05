//! End-to-end extraction: sources → fetch → parse → filter → format → report file.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, instrument, warn};

use seeing_stars_fetcher::{Fetcher, parse_page};
use seeing_stars_shared::{Entry, ExtractConfig, Result, SourceOutcome};

use crate::filter::filter_entries;
use crate::format::format_entry;
use crate::report::{RAW_LINE_LIMIT, Report};

/// Result of a completed extraction run.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    /// Entries written across all sources.
    pub total_entries: usize,
    /// Sources that produced at least one entry.
    pub sources_with_entries: usize,
    /// Sources fetched but without any date-like line.
    pub sources_empty: usize,
    /// Sources that failed to fetch.
    pub sources_failed: usize,
    /// Where the report was written.
    pub output_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called before a source is fetched.
    fn source_started(&self, url: &str, current: usize, total: usize);
    /// Called once a source's section is in the report.
    fn source_finished(&self, url: &str, outcome: &SourceOutcome);
    /// Called after the report file is written.
    fn done(&self, summary: &ExtractSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn source_started(&self, _url: &str, _current: usize, _total: usize) {}
    fn source_finished(&self, _url: &str, _outcome: &SourceOutcome) {}
    fn done(&self, _summary: &ExtractSummary) {}
}

/// Turn one fetched page into its report contribution.
pub fn extract_source(html: &str) -> SourceOutcome {
    let page = parse_page(html);

    let entries: Vec<Entry> = filter_entries(&page.lines)
        .into_iter()
        .map(|line| format_entry(line, &page.links))
        .collect();

    if entries.is_empty() {
        SourceOutcome::NoEntries {
            raw_lines: page.lines.into_iter().take(RAW_LINE_LIMIT).collect(),
        }
    } else {
        SourceOutcome::Entries(entries)
    }
}

/// Run the full extraction, stamping the report with the current local time.
pub async fn run_extract(
    config: &ExtractConfig,
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
) -> Result<ExtractSummary> {
    run_extract_at(config, fetcher, progress, Local::now().naive_local()).await
}

/// Run the full extraction with an explicit `Generated:` timestamp.
///
/// Sources are processed one at a time in configured order. A failed fetch
/// only affects its own section; the sole fatal error is failing to write
/// the report file.
#[instrument(skip_all, fields(sources = config.urls.len(), output = %config.output_path.display()))]
pub async fn run_extract_at(
    config: &ExtractConfig,
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
    generated: NaiveDateTime,
) -> Result<ExtractSummary> {
    config.validate()?;

    let start = Instant::now();
    let total = config.urls.len();
    let mut report = Report::new(generated);
    let mut sources_with_entries = 0;
    let mut sources_empty = 0;
    let mut sources_failed = 0;

    info!("starting extraction");

    for (i, url) in config.urls.iter().enumerate() {
        progress.source_started(url, i + 1, total);
        report.push_source_banner(url);

        let outcome = match fetcher.fetch(url).await {
            Ok(html) => {
                debug!(%url, len = html.len(), "parsing page");
                extract_source(&html)
            }
            Err(e) => {
                warn!(%url, error = %e, "fetch failed, continuing with next source");
                SourceOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        match &outcome {
            SourceOutcome::Failed { .. } => sources_failed += 1,
            SourceOutcome::NoEntries { raw_lines } => {
                warn!(%url, raw_lines = raw_lines.len(), "no date-like lines found");
                sources_empty += 1;
            }
            SourceOutcome::Entries(entries) => {
                info!(%url, entries = entries.len(), "source processed");
                sources_with_entries += 1;
            }
        }

        report.push_outcome(&outcome);
        progress.source_finished(url, &outcome);
    }

    report.write_to(&config.output_path)?;

    let summary = ExtractSummary {
        total_entries: report.total_entries(),
        sources_with_entries,
        sources_empty,
        sources_failed,
        output_path: config.output_path.clone(),
        elapsed: start.elapsed(),
    };

    info!(
        entries = summary.total_entries,
        with_entries = summary.sources_with_entries,
        empty = summary.sources_empty,
        failed = summary.sources_failed,
        duration_ms = summary.elapsed.as_millis(),
        "extraction completed"
    );

    progress.done(&summary);
    Ok(summary)
}
