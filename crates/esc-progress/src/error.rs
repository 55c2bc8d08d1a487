//! Error types for progress persistence.

use thiserror::Error;

/// Errors raised while loading or saving progress.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The progress file could not be read or written.
    #[error("progress file error: {0}")]
    Io(#[from] std::io::Error),

    /// The progress file did not contain valid JSON.
    #[error("progress data error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for progress operations.
pub type ProgressResult<T> = Result<T, ProgressError>;
