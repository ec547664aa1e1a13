//! Resumable cursors over ordered sources.
//!
//! - [`Cursor`] is the contract every position marker satisfies
//! - [`ChronologicalCursor`] walks a time axis by [`chrono::TimeDelta`]
//! - [`SequenceCursor`] walks a numeric offset by item counts
//! - [`TokenCursor`] follows opaque continuation tokens issued by a source
//! - [`Ordinal`] exposes an item's ordering key to [`Cursor::has_reached`]

pub mod chronological;
pub mod cursor;
pub mod sequence;
pub mod token;

pub use chronological::ChronologicalCursor;
pub use cursor::{Cursor, Direction, FromItemCount, Ordinal};
pub use sequence::SequenceCursor;
pub use token::TokenCursor;
