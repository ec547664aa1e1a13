//! Resumable data streams over ordered sources.
//!
//! This crate provides the stream side of incremental consumption:
//! - [`StreamQuery`] pairs a caller's cursor with an optional batch limit
//! - [`StreamQueryBatch`] carries fetched items and the pre-fetch position
//! - [`DataStream`] fetches batches and advances the cursor once per fetch
//! - [`AdvancePolicy`] implementations decide how the cursor moves
//! - Combinators: [`DataStream::map`], [`DataStream::requery`], and
//!   collection streams via [`IntoDataStream`]

pub mod advance;
pub mod batch;
pub mod collection;
pub mod combinators;
pub mod error;
pub mod fetch;
pub mod query;
pub mod stream;

pub use advance::{AdvanceByCount, AdvancePolicy, FnAdvance, JumpToLast, NoAdvance};
pub use batch::StreamQueryBatch;
pub use collection::{CollectionFetch, IntoDataStream};
pub use common::{IdGenerator, SequentialIds, StreamId, UuidGenerator};
pub use cursor::{
    ChronologicalCursor, Cursor, Direction, FromItemCount, Ordinal, SequenceCursor, TokenCursor,
};
pub use error::{Result, StreamError};
pub use fetch::{AsyncFnFetch, Fetch, FnFetch};
pub use query::{QueryWindow, StreamQuery};
pub use stream::{DataStream, DataStreamBuilder};
