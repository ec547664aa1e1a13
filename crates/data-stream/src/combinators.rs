//! Combinators building new streams from existing ones.
//!
//! Derived streams delegate their fetch to the source stream, which runs the
//! source's advance policy. The derived stream itself is built with
//! [`NoAdvance`], so each fetch advances the cursor exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use common::{IdGenerator, StreamId, UuidGenerator};
use cursor::Cursor;

use crate::advance::NoAdvance;
use crate::{DataStream, Fetch, Result, StreamQuery};

type Transform<T, U> = dyn Fn(Vec<T>) -> Vec<U> + Send + Sync;

/// Fetches through a source stream and transforms the resulting items.
struct MapFetch<T, U, C: Cursor> {
    source: DataStream<T, C>,
    transform: Arc<Transform<T, U>>,
}

#[async_trait]
impl<T, U, C> Fetch<U, C> for MapFetch<T, U, C>
where
    T: Send + 'static,
    U: Send + 'static,
    C: Cursor + Send + 'static,
{
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<U>> {
        let batch = self.source.fetch(query).await?;
        Ok((self.transform)(batch.into_items()))
    }
}

/// Fetches one upstream batch and derives a downstream stream per item.
struct RequeryFetch<T, U, C: Cursor, D: Cursor> {
    upstream: DataStream<T, C>,
    derive: Arc<dyn Fn(T) -> DataStream<U, D> + Send + Sync>,
}

#[async_trait]
impl<T, U, C, D> Fetch<DataStream<U, D>, C> for RequeryFetch<T, U, C, D>
where
    T: Send + 'static,
    U: Send + 'static,
    C: Cursor + Send + 'static,
    D: Cursor + Send + 'static,
{
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<DataStream<U, D>>> {
        let batch = self.upstream.fetch(query).await?;
        Ok(batch.into_iter().map(|item| (self.derive)(item)).collect())
    }
}

impl<T, C> DataStream<T, C>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
{
    /// Derives a stream whose batches are `transform` applied to this
    /// stream's batches. The derived stream keeps this stream's identity.
    pub fn map<U, F>(&self, transform: F) -> DataStream<U, C>
    where
        U: Send + 'static,
        F: Fn(Vec<T>) -> Vec<U> + Send + Sync + 'static,
    {
        self.map_with_id(self.id().clone(), transform)
    }

    /// Like [`map`](DataStream::map), under an explicit identity.
    pub fn map_with_id<U, F>(&self, id: impl Into<StreamId>, transform: F) -> DataStream<U, C>
    where
        U: Send + 'static,
        F: Fn(Vec<T>) -> Vec<U> + Send + Sync + 'static,
    {
        let fetcher = MapFetch {
            source: self.clone(),
            transform: Arc::new(transform),
        };
        DataStream::from_parts(id.into(), Arc::new(fetcher), Arc::new(NoAdvance))
    }

    /// Maps every item individually.
    pub fn map_each<U, F>(&self, f: F) -> DataStream<U, C>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.map(move |items| items.into_iter().map(&f).collect())
    }

    /// Fans out: every fetch pulls one upstream batch and turns each item
    /// into its own, independently cursored downstream stream.
    pub fn requery<U, D, G>(&self, derive: G) -> DataStream<DataStream<U, D>, C>
    where
        U: Send + 'static,
        D: Cursor + Send + 'static,
        G: Fn(T) -> DataStream<U, D> + Send + Sync + 'static,
    {
        self.requery_with_ids(&UuidGenerator, derive)
    }

    /// Like [`requery`](DataStream::requery), drawing the outer stream's
    /// identity from `ids`.
    pub fn requery_with_ids<U, D, G>(
        &self,
        ids: &dyn IdGenerator,
        derive: G,
    ) -> DataStream<DataStream<U, D>, C>
    where
        U: Send + 'static,
        D: Cursor + Send + 'static,
        G: Fn(T) -> DataStream<U, D> + Send + Sync + 'static,
    {
        let fetcher = RequeryFetch {
            upstream: self.clone(),
            derive: Arc::new(derive),
        };
        DataStream::from_parts(ids.next_id(), Arc::new(fetcher), Arc::new(NoAdvance))
    }
}
