//! Shared identity types used across the stream crates.

pub mod types;

pub use types::{IdGenerator, SequentialIds, StreamId, UuidGenerator};
