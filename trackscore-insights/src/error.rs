//! Insight error types.
//!
//! Every failure mode has a named variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Step {index} out of range (goal has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
}

/// Result type alias for insight operations.
pub type InsightResult<T> = Result<T, InsightError>;
