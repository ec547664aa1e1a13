use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-meaningful label for a data stream.
///
/// Identities are not required to be globally unique; they exist so that an
/// embedding application can key persisted cursors by stream. When a caller
/// doesn't supply one, an [`IdGenerator`] produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    /// Creates a stream ID from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Creates a random stream ID backed by a UUID v4.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StreamId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for StreamId {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<Uuid> for StreamId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl From<StreamId> for String {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

/// Source of fresh stream identities.
///
/// Stream constructors call this whenever no explicit ID is given.
pub trait IdGenerator: Send + Sync {
    /// Returns a new identity.
    fn next_id(&self) -> StreamId;
}

/// Generates random UUID v4 identities. Safe to use from isolated components
/// that construct streams concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> StreamId {
        StreamId::random()
    }
}

/// Deterministic `"{prefix}-{n}"` identities, starting at 1.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Creates a generator producing `"{prefix}-1"`, `"{prefix}-2"`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> StreamId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        StreamId(format!("{}-{}", self.prefix, n))
    }
}
