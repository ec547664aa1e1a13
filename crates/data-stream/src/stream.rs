//! The data stream abstraction and its builder.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use common::{IdGenerator, StreamId, UuidGenerator};
use cursor::Cursor;

use crate::advance::{AdvanceByCount, AdvancePolicy, FnAdvance, NoAdvance};
use crate::fetch::{AsyncFnFetch, Fetch, FnFetch};
use crate::{QueryWindow, Result, StreamError, StreamQuery, StreamQueryBatch};

/// An identified, asynchronous source of ordered batches.
///
/// A stream pairs a [`Fetch`] implementation with an [`AdvancePolicy`].
/// Every call to [`fetch`](DataStream::fetch) reads one batch and then runs
/// the policy exactly once. Streams hold no cursor state of their own and
/// are cheap to clone.
pub struct DataStream<T, C: Cursor> {
    id: StreamId,
    fetcher: Arc<dyn Fetch<T, C>>,
    advance: Arc<dyn AdvancePolicy<T, C>>,
}

impl<T, C: Cursor> Clone for DataStream<T, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            fetcher: Arc::clone(&self.fetcher),
            advance: Arc::clone(&self.advance),
        }
    }
}

impl<T, C: Cursor> std::fmt::Debug for DataStream<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStream").field("id", &self.id).finish()
    }
}

impl<T, C> DataStream<T, C>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
{
    /// Starts building a stream around an arbitrary fetch implementation.
    pub fn builder<F>(fetcher: F) -> DataStreamBuilder<T, C, F, AdvanceByCount>
    where
        F: Fetch<T, C> + 'static,
    {
        DataStreamBuilder::new(fetcher)
    }

    /// Starts building a stream around a synchronous fetch function.
    pub fn from_fn<F, E>(f: F) -> DataStreamBuilder<T, C, FnFetch<F>, AdvanceByCount>
    where
        F: Fn(QueryWindow<C::Position>) -> std::result::Result<Vec<T>, E> + Send + Sync + 'static,
        E: Into<StreamError> + 'static,
    {
        DataStreamBuilder::new(FnFetch::new(f))
    }

    /// Starts building a stream around an asynchronous fetch function.
    pub fn from_async_fn<F, Fut, E>(f: F) -> DataStreamBuilder<T, C, AsyncFnFetch<F>, AdvanceByCount>
    where
        F: Fn(QueryWindow<C::Position>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<Vec<T>, E>> + Send + 'static,
        E: Into<StreamError> + 'static,
    {
        DataStreamBuilder::new(AsyncFnFetch::new(f))
    }

    /// Assembles a stream from already-erased parts.
    pub(crate) fn from_parts(
        id: StreamId,
        fetcher: Arc<dyn Fetch<T, C>>,
        advance: Arc<dyn AdvancePolicy<T, C>>,
    ) -> Self {
        Self {
            id,
            fetcher,
            advance,
        }
    }

    pub fn id(&self) -> &StreamId {
        &self.id
    }

    /// Returns a copy of this stream under a different identity.
    pub fn with_id(mut self, id: impl Into<StreamId>) -> Self {
        self.id = id.into();
        self
    }

    /// Fetches one batch and advances the query's cursor.
    ///
    /// The returned batch records the cursor position from before the
    /// advance policy ran. Source failures are returned as-is; the cursor is
    /// left untouched in that case.
    #[tracing::instrument(skip(self, query), fields(stream = %self.id, batch_limit = ?query.batch_limit()))]
    pub async fn fetch(
        &self,
        query: &mut StreamQuery<'_, C>,
    ) -> Result<StreamQueryBatch<T, C::Position>> {
        let position = query.cursor().position().clone();
        let items = self.fetcher.fetch(query).await?;
        let batch = StreamQueryBatch::new(items, position);

        self.advance.advance(query, &batch);

        metrics::counter!("data_stream_fetches").increment(1);
        metrics::counter!("data_stream_items_fetched").increment(batch.len() as u64);
        tracing::debug!(items = batch.len(), from = ?batch.cursor(), "fetched batch");

        Ok(batch)
    }

    /// Builds a query from `cursor` and fetches one batch.
    pub async fn next_batch(
        &self,
        cursor: &mut C,
        batch_limit: Option<usize>,
    ) -> Result<StreamQueryBatch<T, C::Position>> {
        let mut query = StreamQuery::new(cursor, batch_limit);
        self.fetch(&mut query).await
    }

    /// Creates a cursor positioned before the first item.
    pub fn new_cursor(&self) -> C
    where
        C: Default,
    {
        C::default()
    }
}

/// Builder for [`DataStream`].
///
/// The advance policy defaults to [`AdvanceByCount`]; building with that
/// default only compiles for cursors whose increment counts items.
pub struct DataStreamBuilder<T, C, F, A> {
    fetcher: F,
    advance: A,
    id: Option<StreamId>,
    ids: Arc<dyn IdGenerator>,
    _marker: PhantomData<fn() -> (T, C)>,
}

impl<T, C, F> DataStreamBuilder<T, C, F, AdvanceByCount> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            advance: AdvanceByCount,
            id: None,
            ids: Arc::new(UuidGenerator),
            _marker: PhantomData,
        }
    }
}

impl<T, C, F, A> DataStreamBuilder<T, C, F, A>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
    F: Fetch<T, C> + 'static,
{
    /// Sets an explicit identity.
    pub fn id(mut self, id: impl Into<StreamId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the generator used when no explicit identity is given.
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the advance policy.
    pub fn advance<B>(self, policy: B) -> DataStreamBuilder<T, C, F, B>
    where
        B: AdvancePolicy<T, C> + 'static,
    {
        DataStreamBuilder {
            fetcher: self.fetcher,
            advance: policy,
            id: self.id,
            ids: self.ids,
            _marker: PhantomData,
        }
    }

    /// Replaces the advance policy with a closure. The closure takes full
    /// responsibility for moving the cursor, including not moving it.
    pub fn advance_with<G>(self, f: G) -> DataStreamBuilder<T, C, F, FnAdvance<G>>
    where
        G: Fn(&mut StreamQuery<'_, C>, &StreamQueryBatch<T, C::Position>)
            + Send
            + Sync
            + 'static,
    {
        self.advance(FnAdvance::new::<T, C>(f))
    }

    /// Disables cursor advancement for this stream.
    pub fn no_advance(self) -> DataStreamBuilder<T, C, F, NoAdvance> {
        self.advance(NoAdvance)
    }

    pub fn build(self) -> DataStream<T, C>
    where
        A: AdvancePolicy<T, C> + 'static,
    {
        let id = self.id.unwrap_or_else(|| self.ids.next_id());
        DataStream::from_parts(id, Arc::new(self.fetcher), Arc::new(self.advance))
    }
}
