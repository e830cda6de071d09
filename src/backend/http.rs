//! HTTP implementation of [`SearchBackend`]
//!
//! POSTs a JSON [`SearchRequest`] to a single endpoint and decodes the
//! [`SearchResponse`] envelope. No retries: every failure is terminal for the
//! attempt that produced it.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::SearchBackend;
use super::errors::BackendError;
use super::types::{SearchRequest, SearchResponse};

/// Default per-request timeout applied by the HTTP client itself
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body echoed into a status error
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpSearchBackend {
    /// Create a backend for `endpoint` with the default timeout
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidEndpoint`] if the URL does not parse or
    /// is not http(s), and [`BackendError::Transport`] if the client cannot be
    /// built.
    pub fn new(endpoint: &str) -> Result<Self, BackendError> {
        Self::with_timeout(endpoint, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a backend with an explicit client timeout
    ///
    /// # Errors
    ///
    /// See [`HttpSearchBackend::new`].
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, BackendError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| BackendError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BackendError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_error(&self, error: reqwest::Error) -> BackendError {
        if error.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            error.into()
        }
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        debug!(
            endpoint = %self.endpoint,
            search_type = %request.search_type,
            page = ?request.page_number,
            "Sending search request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Search endpoint returned an error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(matches!(
            HttpSearchBackend::new("ftp://example.com/search"),
            Err(BackendError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            HttpSearchBackend::new("not a url"),
            Err(BackendError::InvalidEndpoint(_))
        ));
        assert!(HttpSearchBackend::new("https://example.com/search").is_ok());
    }
}
