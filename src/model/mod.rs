//! Core data model types: input targets, parsed messages, findings, and metrics.

pub mod attachment;
pub mod message;
pub mod metrics;
pub mod target;
