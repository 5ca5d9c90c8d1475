//! The fetch function seam.

use std::future::Future;
use std::pin::Pin;

use crate::error::FetchError;

/// Boxed future returned by a [`Fetch`] implementation.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'static>>;

/// Something that can fetch results for a query.
///
/// Implementations must be safe to invoke while an earlier call is still
/// running, and must not mutate state the controller owns. Any
/// `Fn(String) -> impl Future<Output = Result<T, FetchError>>` closure
/// qualifies.
pub trait Fetch<T>: Send + Sync + 'static {
    /// Start fetching results for `query`.
    fn fetch(&self, query: String) -> FetchFuture<T>;
}

impl<T, F, Fut> Fetch<T> for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    fn fetch(&self, query: String) -> FetchFuture<T> {
        Box::pin(self(query))
    }
}
