//! Consumption feature pipeline: record types, derivations, and summaries.

pub mod pipeline;
pub mod stats;
pub mod summary;
pub mod types;
