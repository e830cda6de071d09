//! Transport-level failures of the search endpoint

use std::time::Duration;
use thiserror::Error;

/// Error raised while talking to the search endpoint
///
/// Every variant is a transport failure from the lookup's point of view. The
/// detail is logged for diagnostics and never shown to the user.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request could not be sent or the connection failed
    #[error("Search request failed: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success HTTP status
    #[error("Search endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a valid search envelope
    #[error("Failed to decode search response: {0}")]
    Decode(String),

    /// No response within the configured timeout
    #[error("Search request timed out after {0:?}")]
    Timeout(Duration),

    /// Endpoint URL is unusable
    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(String),

    /// Anything else a host-supplied backend reports
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            BackendError::Decode(error.to_string())
        } else {
            BackendError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(error: serde_json::Error) -> Self {
        BackendError::Decode(error.to_string())
    }
}

impl From<anyhow::Error> for BackendError {
    fn from(error: anyhow::Error) -> Self {
        BackendError::Other(error.to_string())
    }
}

impl BackendError {
    /// Whether the failure happened before any response arrived
    #[must_use]
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, BackendError::Transport(_) | BackendError::Timeout(_))
    }
}
