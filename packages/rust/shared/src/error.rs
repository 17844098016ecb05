//! Error types for the Seeing-Stars extractor.
//!
//! Library crates use [`StarsError`] and [`FetchError`] via `thiserror`.
//! The CLI wraps these with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Why a single source page could not be fetched.
///
/// Never fatal to a run: the orchestrator records the message inline in the
/// report and moves on to the next source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The configured URL does not parse.
    #[error("invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The request did not complete within the configured timeout.
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    /// Connection could not be established (refused, DNS, TLS).
    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("HTTP {status} for url: {url}")]
    Status { url: String, status: u16 },

    /// Any other transport failure.
    #[error("request failed for {url}: {message}")]
    Request { url: String, message: String },

    /// Response headers arrived but the body could not be read.
    #[error("body read failed for {url}: {message}")]
    Body { url: String, message: String },
}

/// Top-level error type for all extractor operations.
#[derive(Debug, thiserror::Error)]
pub enum StarsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// HTTP client could not be constructed.
    #[error("network error: {0}")]
    Network(String),

    /// A page fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StarsError>;

impl StarsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = StarsError::config("no source URLs configured");
        assert_eq!(err.to_string(), "config error: no source URLs configured");

        let err = FetchError::Status {
            url: "https://example.com/Died/90s.shtml".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 for url: https://example.com/Died/90s.shtml"
        );
    }

    #[test]
    fn fetch_error_is_transparent_inside_stars_error() {
        let err: StarsError = FetchError::Timeout {
            url: "https://example.com/".into(),
        }
        .into();
        assert_eq!(err.to_string(), "timed out fetching https://example.com/");
    }
}
