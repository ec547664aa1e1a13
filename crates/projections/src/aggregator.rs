//! Aggregators fold batches into projections.

/// Folds a batch of data into a projection.
///
/// `projection` is `None` the first time a plain projection is built; the
/// aggregator decides what an empty projection looks like.
pub trait Aggregator<P, T>: Send + Sync {
    fn aggregate(&self, projection: Option<P>, batch: &[T]) -> P;
}

/// Adapts a closure into an [`Aggregator`].
pub struct FnAggregator<F> {
    f: F,
}

impl<P, T, F> Aggregator<P, T> for FnAggregator<F>
where
    F: Fn(Option<P>, &[T]) -> P + Send + Sync,
{
    fn aggregate(&self, projection: Option<P>, batch: &[T]) -> P {
        (self.f)(projection, batch)
    }
}

/// Builds an aggregator from a closure.
pub fn aggregator_fn<P, T, F>(f: F) -> FnAggregator<F>
where
    F: Fn(Option<P>, &[T]) -> P + Send + Sync,
{
    FnAggregator { f }
}
