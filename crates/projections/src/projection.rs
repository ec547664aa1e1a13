//! The cursor capability of projections.

use cursor::Cursor;

/// A projection that carries the cursor it was folded up to.
///
/// A projection step over such a projection queries with the embedded
/// cursor and lets the stream's advance policy move it in place, so the
/// projection and its position always travel together.
///
/// Every [`Cursor`] is trivially its own cursor projection.
pub trait CursorProjection<C: Cursor> {
    /// Returns the embedded cursor.
    fn cursor_mut(&mut self) -> &mut C;
}

impl<C: Cursor> CursorProjection<C> for C {
    fn cursor_mut(&mut self) -> &mut C {
        self
    }
}
