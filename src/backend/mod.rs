//! Remote search endpoint
//!
//! The lookup treats the endpoint as an opaque async function. Hosts either
//! use [`HttpSearchBackend`] or wrap their own async closure with
//! [`backend_fn`].

mod errors;
mod http;
mod types;

pub use errors::BackendError;
pub use http::{DEFAULT_HTTP_TIMEOUT, HttpSearchBackend};
pub use types::{SearchRequest, SearchResponse};

use async_trait::async_trait;
use std::future::Future;

/// The single I/O boundary of an entity lookup
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search. Implementations must not retry.
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError>;
}

/// Backend built from an async closure, see [`backend_fn`]
#[derive(Clone)]
pub struct BackendFn<F> {
    f: F,
}

/// Adapt `f` into a [`SearchBackend`]
///
/// ```
/// use entity_lookup::backend::{BackendError, SearchResponse, backend_fn};
///
/// let backend = backend_fn(|_request| async {
///     Ok::<_, BackendError>(SearchResponse::ok(serde_json::json!([])))
/// });
/// # let _ = backend;
/// ```
pub fn backend_fn<F, Fut>(f: F) -> BackendFn<F>
where
    F: Fn(SearchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SearchResponse, BackendError>> + Send + 'static,
{
    BackendFn { f }
}

#[async_trait]
impl<F, Fut> SearchBackend for BackendFn<F>
where
    F: Fn(SearchRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SearchResponse, BackendError>> + Send + 'static,
{
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        (self.f)(request).await
    }
}

impl<F> std::fmt::Debug for BackendFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendFn").finish_non_exhaustive()
    }
}
