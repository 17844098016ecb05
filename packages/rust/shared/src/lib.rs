//! Shared types, error model, and configuration for the Seeing-Stars extractor.
//!
//! This crate is the foundation depended on by all other workspace crates.
//! It provides:
//! - [`StarsError`] and [`FetchError`], the error types
//! - Domain types ([`Entry`], [`SourceOutcome`])
//! - Configuration ([`AppConfig`], [`ExtractConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_URLS, DEFAULT_USER_AGENT,
    ExtractConfig, HttpConfig, OutputConfig, SourcesConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, render_default_config,
};
pub use error::{FetchError, Result, StarsError};
pub use types::{Entry, SourceOutcome};
