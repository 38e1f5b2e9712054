//! Pipeline error types.

use thiserror::Error;

/// Fatal errors raised by ingestion or the feature pipeline.
///
/// Undefined statistics (empty partitions, zero maximum, too few samples for
/// a standard deviation) are *not* errors; they surface as `None` in the
/// corresponding output field.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is missing or a cell could not be parsed.
    #[error("malformed input (row {row}): {reason}")]
    MalformedInput {
        /// 1-based data row index; 0 when the header itself is at fault.
        row: usize,
        reason: String,
    },
    /// An out-of-range configuration or derivation parameter.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl PipelineError {
    /// Shorthand for a header-level input error (no specific row).
    pub fn header(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            row: 0,
            reason: reason.into(),
        }
    }
}
