//! Streams over finite, already-ordered collections.

use std::sync::Arc;

use async_trait::async_trait;
use cursor::{Cursor, Ordinal};

use crate::advance::JumpToLast;
use crate::{DataStream, DataStreamBuilder, Fetch, Result, StreamQuery};

/// Fetches from an in-memory ordered collection.
///
/// Each fetch skips the leading items the cursor has already reached, then
/// returns up to the batch limit. An optional page size caps every batch,
/// including unbounded queries.
///
/// Skipping compares item ordinals with the cursor position, so the cursor
/// must end up at the last returned ordinal. Pair it with [`JumpToLast`], as
/// [`DataStream::from_collection_fetch`] does.
pub struct CollectionFetch<T> {
    items: Arc<[T]>,
    page_size: Option<usize>,
}

impl<T> CollectionFetch<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            page_size: None,
        }
    }

    /// Caps every batch at `page_size` items.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl<T, C> Fetch<T, C> for CollectionFetch<T>
where
    T: Ordinal<C::Position> + Clone + Send + Sync + 'static,
    C: Cursor + Send + 'static,
{
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<T>> {
        let limit = match (query.batch_limit(), self.page_size) {
            (Some(limit), Some(page)) => limit.min(page),
            (Some(limit), None) => limit,
            (None, Some(page)) => page,
            (None, None) => usize::MAX,
        };
        let cursor = query.cursor();

        Ok(self
            .items
            .iter()
            .skip_while(|item| cursor.has_reached(*item))
            .take(limit)
            .cloned()
            .collect())
    }
}

impl<T, C> DataStream<T, C>
where
    T: Ordinal<C::Position> + Clone + Send + Sync + 'static,
    C: Cursor + Send + 'static,
{
    /// Starts building a stream over an ordered collection.
    ///
    /// After each non-empty batch the cursor moves to the last item's
    /// ordinal, which is exactly what the collection's skip test checks
    /// against. Items may be sparse or start anywhere.
    pub fn from_collection(
        items: impl IntoIterator<Item = T>,
    ) -> DataStreamBuilder<T, C, CollectionFetch<T>, JumpToLast> {
        Self::from_collection_fetch(CollectionFetch::new(items))
    }

    /// Like [`from_collection`](DataStream::from_collection), over a
    /// preconfigured fetch (e.g. one with a page size).
    pub fn from_collection_fetch(
        fetch: CollectionFetch<T>,
    ) -> DataStreamBuilder<T, C, CollectionFetch<T>, JumpToLast> {
        DataStreamBuilder::new(fetch).advance(JumpToLast)
    }
}

/// Wraps an ordered collection as a data stream with a fresh identity.
///
/// The stream skips items by ordinal and moves the cursor to the last
/// fetched ordinal, so it works for any cursor whose position the items
/// expose through [`Ordinal`], counting or not.
pub trait IntoDataStream<T> {
    fn into_data_stream<C>(self) -> DataStream<T, C>
    where
        T: Ordinal<C::Position> + Clone + Send + Sync + 'static,
        C: Cursor + Send + 'static;
}

impl<T, I> IntoDataStream<T> for I
where
    I: IntoIterator<Item = T>,
{
    fn into_data_stream<C>(self) -> DataStream<T, C>
    where
        T: Ordinal<C::Position> + Clone + Send + Sync + 'static,
        C: Cursor + Send + 'static,
    {
        DataStream::from_collection(self).build()
    }
}
