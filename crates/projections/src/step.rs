//! One fetch-and-fold projection step.

use async_trait::async_trait;
use cursor::Cursor;
use data_stream::{DataStream, StreamQuery};

use crate::{Aggregator, CursorProjection, Result};

/// Folds the next batch of `stream` into a plain projection.
///
/// The projection carries no cursor, so the query starts from a fresh
/// cursor every time. An empty batch returns `projection` unchanged without
/// calling the aggregator.
#[tracing::instrument(skip_all, fields(stream = %stream.id()))]
pub async fn project_with<P, T, C, A>(
    stream: &DataStream<T, C>,
    aggregator: &A,
    projection: Option<P>,
) -> Result<Option<P>>
where
    T: Send + 'static,
    C: Cursor + Default + Send + 'static,
    A: Aggregator<P, T> + ?Sized,
{
    let mut cursor = C::default();
    let mut query = StreamQuery::unbounded(&mut cursor);
    let batch = stream.fetch(&mut query).await?;

    if batch.is_empty() {
        tracing::debug!("empty batch, projection unchanged");
        return Ok(projection);
    }

    metrics::counter!("projection_batches_applied").increment(1);
    tracing::debug!(items = batch.len(), "applying batch");
    Ok(Some(aggregator.aggregate(projection, batch.items())))
}

/// Folds the next batch of `stream` into a projection that carries its own
/// cursor.
///
/// The embedded cursor is queried and advanced in place by the stream's
/// advance policy, then the batch is folded in. An empty batch returns the
/// projection unchanged without calling the aggregator.
#[tracing::instrument(skip_all, fields(stream = %stream.id()))]
pub async fn project_cursored<P, T, C, A>(
    stream: &DataStream<T, C>,
    aggregator: &A,
    mut projection: P,
) -> Result<P>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
    P: CursorProjection<C>,
    A: Aggregator<P, T> + ?Sized,
{
    let batch = {
        let mut query = StreamQuery::unbounded(projection.cursor_mut());
        stream.fetch(&mut query).await?
    };

    if batch.is_empty() {
        tracing::debug!("empty batch, projection unchanged");
        return Ok(projection);
    }

    metrics::counter!("projection_batches_applied").increment(1);
    tracing::debug!(items = batch.len(), from = ?batch.cursor(), "applying batch");
    Ok(aggregator.aggregate(Some(projection), batch.items()))
}

/// Projection steps as methods on [`DataStream`].
#[async_trait]
pub trait ProjectExt<T, C: Cursor> {
    /// See [`project_with`].
    async fn project_with<P, A>(&self, aggregator: &A, projection: Option<P>) -> Result<Option<P>>
    where
        C: Default,
        P: Send,
        A: Aggregator<P, T> + ?Sized;

    /// See [`project_cursored`].
    async fn project_cursored<P, A>(&self, aggregator: &A, projection: P) -> Result<P>
    where
        P: CursorProjection<C> + Send,
        A: Aggregator<P, T> + ?Sized;
}

#[async_trait]
impl<T, C> ProjectExt<T, C> for DataStream<T, C>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
{
    async fn project_with<P, A>(&self, aggregator: &A, projection: Option<P>) -> Result<Option<P>>
    where
        C: Default,
        P: Send,
        A: Aggregator<P, T> + ?Sized,
    {
        crate::step::project_with(self, aggregator, projection).await
    }

    async fn project_cursored<P, A>(&self, aggregator: &A, projection: P) -> Result<P>
    where
        P: CursorProjection<C> + Send,
        A: Aggregator<P, T> + ?Sized,
    {
        crate::step::project_cursored(self, aggregator, projection).await
    }
}
