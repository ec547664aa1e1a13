//! Stream error types.

use thiserror::Error;

/// Boxed error raised by an underlying fetch function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while fetching from a data stream.
///
/// Source failures pass through untouched: the display and `source()` of a
/// [`StreamError::Source`] are those of the original error.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The underlying fetch function failed.
    #[error(transparent)]
    Source(#[from] BoxError),

    /// A fetch function reported a failure without an error type of its own.
    #[error("{0}")]
    Message(String),
}

impl StreamError {
    /// Wraps any error raised by a fetch function.
    pub fn from_source<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(error))
    }

    /// Creates an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<std::io::Error> for StreamError {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(error)
    }
}

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_keep_their_message() {
        let io = std::io::Error::other("disk on fire");
        let err = StreamError::from(io);
        assert_eq!(err.to_string(), "disk on fire");
        assert!(matches!(err, StreamError::Source(_)));
    }

    #[test]
    fn message_errors_display_verbatim() {
        let err = StreamError::msg("feed unavailable");
        assert_eq!(err.to_string(), "feed unavailable");
    }
}
