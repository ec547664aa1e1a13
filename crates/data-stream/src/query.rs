//! Stream queries.

use cursor::{Cursor, Direction, Ordinal};

/// One fetch request: the caller's cursor plus an optional batch limit.
///
/// A query is built fresh for every fetch. It borrows the cursor mutably so
/// the stream's advance policy can move it in place once items are fetched.
#[derive(Debug)]
pub struct StreamQuery<'c, C> {
    cursor: &'c mut C,
    batch_limit: Option<usize>,
}

impl<'c, C: Cursor> StreamQuery<'c, C> {
    pub fn new(cursor: &'c mut C, batch_limit: Option<usize>) -> Self {
        Self {
            cursor,
            batch_limit,
        }
    }

    /// Creates a query with no batch limit.
    pub fn unbounded(cursor: &'c mut C) -> Self {
        Self::new(cursor, None)
    }

    /// Creates a query returning at most `batch_limit` items.
    pub fn limited(cursor: &'c mut C, batch_limit: usize) -> Self {
        Self::new(cursor, Some(batch_limit))
    }

    pub fn cursor(&self) -> &C {
        self.cursor
    }

    /// Mutable access to the cursor, for advance policies.
    pub fn cursor_mut(&mut self) -> &mut C {
        self.cursor
    }

    pub fn batch_limit(&self) -> Option<usize> {
        self.batch_limit
    }

    /// Returns an owned snapshot of the query, for fetch functions that
    /// cannot hold a borrow of the cursor.
    pub fn window(&self) -> QueryWindow<C::Position> {
        QueryWindow {
            position: self.cursor.position().clone(),
            direction: self.cursor.direction(),
            batch_limit: self.batch_limit,
        }
    }
}

/// Owned view of a [`StreamQuery`] handed to closure-based fetch functions.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryWindow<P> {
    /// Cursor position at the time of the fetch.
    pub position: P,

    /// Direction the cursor advances in.
    pub direction: Direction,

    /// Maximum number of items to return, if bounded.
    pub batch_limit: Option<usize>,
}

impl<P: PartialOrd> QueryWindow<P> {
    /// Returns true if the item has already been consumed by the cursor.
    pub fn has_reached<I>(&self, item: &I) -> bool
    where
        I: Ordinal<P> + ?Sized,
    {
        self.direction.has_reached(&self.position, &item.ordinal())
    }

    /// Returns the batch limit, or `usize::MAX` when unbounded.
    pub fn take_limit(&self) -> usize {
        self.batch_limit.unwrap_or(usize::MAX)
    }
}
