//! `emlmetrics`: subject, sender, size and attachment metadata for `.eml` files.
//!
//! This crate provides the analysis pipeline behind the `emlmetrics` binary:
//! input validation, message loading, MIME parsing, attachment classification,
//! and per-message metrics aggregation.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod logging;
pub mod model;
pub mod parser;

pub use analysis::EmailAnalyzer;
pub use error::{AnalyzerError, Result};
pub use model::metrics::{MetricsCollection, MetricsRecord};
