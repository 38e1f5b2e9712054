//! Electricity-consumption log analyzer.
//!
//! Ingests a time-stamped consumption CSV, enriches each record with derived
//! fields (hour, day type, rolling average, anomaly flag, efficiency score),
//! and reports peak/off-peak and weekday/weekend statistics.

/// Feature derivations, statistics helpers, and summary types.
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
#[cfg(feature = "plot")]
pub mod plot;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;
