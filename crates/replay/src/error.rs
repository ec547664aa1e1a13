//! Replay error types.

use thiserror::Error;

/// Errors that can stop a replay run.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A configuration value was missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A projection step failed.
    #[error("Projection error: {0}")]
    Projection(#[from] projections::ProjectionError),

    /// A direct stream fetch failed.
    #[error("Stream error: {0}")]
    Stream(#[from] data_stream::StreamError),

    /// The feed producer task panicked or was cancelled.
    #[error("Producer task failed: {0}")]
    Producer(#[from] tokio::task::JoinError),
}

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, ReplayError>;
