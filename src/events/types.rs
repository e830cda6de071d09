//! Event types delivered to the host container
//!
//! Every event carries the emitting component's identity and an ISO-8601
//! timestamp. Payloads are passed through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::SearchType;
use crate::results::ResultRow;

/// Identity of the lookup instance that emitted an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    pub component_name: String,
    pub instance_id: Uuid,
}

impl EventSource {
    #[must_use]
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            instance_id: Uuid::new_v4(),
        }
    }
}

/// Which layer a search failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Endpoint answered `success: false`
    Business,
    /// Network, decode or timeout failure
    Transport,
}

/// Events emitted by an entity lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LookupEvent {
    /// A request is about to be sent
    SearchStarted {
        #[serde(flatten)]
        source: EventSource,
        search_term: String,
        search_type: SearchType,
        page_number: usize,
        timestamp: DateTime<Utc>,
    },
    /// Results were normalized and stored
    SearchSucceeded {
        #[serde(flatten)]
        source: EventSource,
        search_term: String,
        search_type: SearchType,
        results: Vec<ResultRow>,
        result_count: usize,
        total_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// The search ended without results being stored
    SearchFailed {
        #[serde(flatten)]
        source: EventSource,
        error_message: String,
        failure: FailureKind,
        search_term: Option<String>,
        search_type: Option<SearchType>,
        timestamp: DateTime<Utc>,
    },
    /// A row was promoted to the selection
    SelectionMade {
        #[serde(flatten)]
        source: EventSource,
        selected_result: ResultRow,
        timestamp: DateTime<Utc>,
    },
    /// The selection and search state were reset
    SelectionCleared {
        #[serde(flatten)]
        source: EventSource,
        action: String,
        timestamp: DateTime<Utc>,
    },
    /// Input was rejected before searching
    ValidationFailed {
        #[serde(flatten)]
        source: EventSource,
        error_message: String,
        search_term: String,
        timestamp: DateTime<Utc>,
    },
}

impl LookupEvent {
    #[must_use]
    pub fn search_started(
        source: EventSource,
        search_term: impl Into<String>,
        search_type: SearchType,
        page_number: usize,
    ) -> Self {
        Self::SearchStarted {
            source,
            search_term: search_term.into(),
            search_type,
            page_number,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn search_succeeded(
        source: EventSource,
        search_term: impl Into<String>,
        search_type: SearchType,
        results: Vec<ResultRow>,
        total_count: usize,
    ) -> Self {
        Self::SearchSucceeded {
            source,
            search_term: search_term.into(),
            search_type,
            result_count: results.len(),
            results,
            total_count,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn search_failed(
        source: EventSource,
        error_message: impl Into<String>,
        failure: FailureKind,
        search_term: Option<String>,
        search_type: Option<SearchType>,
    ) -> Self {
        Self::SearchFailed {
            source,
            error_message: error_message.into(),
            failure,
            search_term,
            search_type,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn selection_made(source: EventSource, selected_result: ResultRow) -> Self {
        Self::SelectionMade {
            source,
            selected_result,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn selection_cleared(source: EventSource) -> Self {
        Self::SelectionCleared {
            source,
            action: "cleared".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn validation_failed(
        source: EventSource,
        error_message: impl Into<String>,
        search_term: impl Into<String>,
    ) -> Self {
        Self::ValidationFailed {
            source,
            error_message: error_message.into(),
            search_term: search_term.into(),
            timestamp: Utc::now(),
        }
    }

    /// Name the host listens for
    #[must_use]
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::SearchStarted { .. } => "searchstarted",
            Self::SearchSucceeded { .. } => "searchsuccess",
            Self::SearchFailed { .. } => "error",
            Self::SelectionMade { .. } => "entityselected",
            Self::SelectionCleared { .. } => "entitychanged",
            Self::ValidationFailed { .. } => "validationerror",
        }
    }

    #[must_use]
    pub fn source(&self) -> &EventSource {
        match self {
            Self::SearchStarted { source, .. }
            | Self::SearchSucceeded { source, .. }
            | Self::SearchFailed { source, .. }
            | Self::SelectionMade { source, .. }
            | Self::SelectionCleared { source, .. }
            | Self::ValidationFailed { source, .. } => source,
        }
    }

    #[must_use]
    pub fn component_name(&self) -> &str {
        &self.source().component_name
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SearchStarted { timestamp, .. }
            | Self::SearchSucceeded { timestamp, .. }
            | Self::SearchFailed { timestamp, .. }
            | Self::SelectionMade { timestamp, .. }
            | Self::SelectionCleared { timestamp, .. }
            | Self::ValidationFailed { timestamp, .. } => *timestamp,
        }
    }
}
