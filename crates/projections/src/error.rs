//! Projection error types.

use thiserror::Error;

/// Errors that can occur during a projection step.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Fetching the next batch failed. The source error is passed through.
    #[error(transparent)]
    Stream(#[from] data_stream::StreamError),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
