//! The fetch seam between a data stream and its underlying source.

use std::future::Future;

use async_trait::async_trait;
use cursor::Cursor;

use crate::{QueryWindow, Result, StreamError, StreamQuery};

/// Reads the next items of an ordered source for a query.
///
/// Implementations must respect the query's batch limit when present and
/// must not assume the cursor stays untouched after the call: the stream's
/// advance policy runs right after the fetch returns.
#[async_trait]
pub trait Fetch<T, C: Cursor>: Send + Sync {
    /// Returns the items following the query's cursor position, in order.
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<T>>;
}

/// Adapts a synchronous function into a [`Fetch`] implementation.
pub struct FnFetch<F> {
    f: F,
}

impl<F> FnFetch<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, C, F, E> Fetch<T, C> for FnFetch<F>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
    F: Fn(QueryWindow<C::Position>) -> std::result::Result<Vec<T>, E> + Send + Sync + 'static,
    E: Into<StreamError> + 'static,
{
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<T>> {
        (self.f)(query.window()).map_err(Into::into)
    }
}

/// Adapts an asynchronous function into a [`Fetch`] implementation.
pub struct AsyncFnFetch<F> {
    f: F,
}

impl<F> AsyncFnFetch<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, C, F, Fut, E> Fetch<T, C> for AsyncFnFetch<F>
where
    T: Send + 'static,
    C: Cursor + Send + 'static,
    F: Fn(QueryWindow<C::Position>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Vec<T>, E>> + Send + 'static,
    E: Into<StreamError> + 'static,
{
    async fn fetch(&self, query: &mut StreamQuery<'_, C>) -> Result<Vec<T>> {
        (self.f)(query.window()).await.map_err(Into::into)
    }
}
