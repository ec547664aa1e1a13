//! Cursor advance policies.
//!
//! A data stream runs exactly one policy after every fetch. Streams that
//! delegate to another stream's fetch use [`NoAdvance`], because the
//! delegate already moved the cursor.

use cursor::{Cursor, FromItemCount, Ordinal};

use crate::{StreamQuery, StreamQueryBatch};

/// Decides how a query's cursor moves once a batch has been fetched.
pub trait AdvancePolicy<T, C: Cursor>: Send + Sync {
    fn advance(&self, query: &mut StreamQuery<'_, C>, batch: &StreamQueryBatch<T, C::Position>);
}

/// Default policy: advances the cursor by the number of items consumed, so
/// the next fetch starts right after the batch.
///
/// Only available for cursors whose increment counts items.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceByCount;

impl<T, C> AdvancePolicy<T, C> for AdvanceByCount
where
    C: Cursor,
    C::Increment: FromItemCount,
{
    fn advance(&self, query: &mut StreamQuery<'_, C>, batch: &StreamQueryBatch<T, C::Position>) {
        if batch.is_empty() {
            return;
        }
        query
            .cursor_mut()
            .advance_by(C::Increment::from_item_count(batch.len()));
    }
}

/// Leaves the cursor alone.
///
/// Used by derived streams whose fetch delegates to a source stream: the
/// source advances the cursor, the derived stream must not advance it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvance;

impl<T, C: Cursor> AdvancePolicy<T, C> for NoAdvance {
    fn advance(&self, _query: &mut StreamQuery<'_, C>, _batch: &StreamQueryBatch<T, C::Position>) {}
}

/// Jumps the cursor to the ordinal of the last fetched item.
///
/// Suited to sparse keys such as timestamps. Uses [`Cursor::force_to`], so
/// the jump is not checked against the cursor's direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpToLast;

impl<T, C> AdvancePolicy<T, C> for JumpToLast
where
    C: Cursor,
    T: Ordinal<C::Position>,
{
    fn advance(&self, query: &mut StreamQuery<'_, C>, batch: &StreamQueryBatch<T, C::Position>) {
        if let Some(last) = batch.items().last() {
            query.cursor_mut().force_to(last.ordinal());
        }
    }
}

/// Adapts a closure into an [`AdvancePolicy`].
pub struct FnAdvance<F> {
    f: F,
}

impl<F> FnAdvance<F> {
    pub fn new<T, C>(f: F) -> Self
    where
        C: Cursor,
        F: Fn(&mut StreamQuery<'_, C>, &StreamQueryBatch<T, C::Position>) + Send + Sync,
    {
        Self { f }
    }
}

impl<T, C, F> AdvancePolicy<T, C> for FnAdvance<F>
where
    C: Cursor,
    F: Fn(&mut StreamQuery<'_, C>, &StreamQueryBatch<T, C::Position>) + Send + Sync,
{
    fn advance(&self, query: &mut StreamQuery<'_, C>, batch: &StreamQueryBatch<T, C::Position>) {
        (self.f)(query, batch)
    }
}
