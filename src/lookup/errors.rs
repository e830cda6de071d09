use thiserror::Error;

use super::state::Phase;
use crate::backend::BackendError;
use crate::query::ValidationError;

/// Message shown when the endpoint reports failure without saying why
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

/// Message shown for every transport failure
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Failure of a lookup operation
#[derive(Debug, Error)]
pub enum LookupError {
    /// Input failed its syntax rule; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Endpoint answered `success: false`
    #[error("search rejected by endpoint: {}", .0.as_deref().unwrap_or("no message"))]
    Business(Option<String>),

    /// Network, decode or timeout failure
    #[error("search transport failure: {0}")]
    Transport(#[from] BackendError),

    #[error("no result with id '{0}'")]
    NotFound(String),

    #[error("cannot {action} while {phase:?}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("lookup is read-only")]
    ReadOnly,

    #[error("no search has been run yet")]
    NoSearchToRefresh,
}

impl LookupError {
    /// Text safe to show the user
    ///
    /// Transport details never leak; they are only logged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Validation(err) => err.to_string(),
            LookupError::Business(message) => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(SEARCH_FAILED_MESSAGE)
                .to_string(),
            LookupError::Transport(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
            LookupError::NotFound(_) => "The selected result is no longer available.".to_string(),
            LookupError::InvalidTransition { .. } => {
                "Clear the current selection before searching again.".to_string()
            }
            LookupError::ReadOnly => "This lookup is read-only.".to_string(),
            LookupError::NoSearchToRefresh => ValidationError::EmptyTerm.to_string(),
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Transport(_))
    }
}
