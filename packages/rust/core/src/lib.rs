//! Entry extraction and report orchestration for the Seeing-Stars extractor.
//!
//! This crate ties the fetcher's parsed pages to the entry heuristics and
//! the text report (see [`pipeline::run_extract`]).

pub mod filter;
pub mod format;
pub mod pipeline;
pub mod report;
