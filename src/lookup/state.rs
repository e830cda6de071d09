//! Immutable per-instance lookup state
//!
//! Every change goes through one of the `with_*` transitions, each of which
//! consumes the old state and returns the new one.

use serde::{Deserialize, Serialize};

use crate::pagination::{DEFAULT_PAGE_SIZE, PaginationMode, Paginator, ResultPage};
use crate::query::SearchQuery;
use crate::results::ResultRow;

/// Where the lookup is in its search/select cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    ResultsShown,
    NoResults,
    ErrorShown,
    /// Terminal until cleared
    Selected,
}

impl Phase {
    /// A search may start from anywhere except the selected view
    #[must_use]
    pub fn can_search(self) -> bool {
        !matches!(self, Phase::Selected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupState {
    phase: Phase,
    query: SearchQuery,
    /// Inline message from reactive validation of `query`
    validation_message: Option<String>,
    rows: Vec<ResultRow>,
    paginator: Paginator,
    pagination_mode: PaginationMode,
    display_threshold: usize,
    selected: Option<ResultRow>,
    error_message: Option<String>,
    loading: bool,
    /// Query of the most recent executed search
    last_search: Option<SearchQuery>,
}

impl Default for LookupState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, PaginationMode::ClientSide, DEFAULT_PAGE_SIZE)
    }
}

impl LookupState {
    #[must_use]
    pub fn new(page_size: usize, pagination_mode: PaginationMode, display_threshold: usize) -> Self {
        Self {
            phase: Phase::Idle,
            query: SearchQuery::empty(),
            validation_message: None,
            rows: Vec::new(),
            paginator: Paginator::new(page_size),
            pagination_mode,
            display_threshold,
            selected: None,
            error_message: None,
            loading: false,
            last_search: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    /// Every row of the last successful search (the fetched page when paging
    /// server-side)
    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    #[must_use]
    pub fn pagination_mode(&self) -> PaginationMode {
        self.pagination_mode
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ResultRow> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn last_search(&self) -> Option<&SearchQuery> {
        self.last_search.as_ref()
    }

    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Whether pagination controls should be visible
    #[must_use]
    pub fn show_pagination(&self) -> bool {
        self.paginator.total_count() > self.display_threshold
    }

    /// Rows visible on the current page
    #[must_use]
    pub fn current_page(&self) -> ResultPage {
        match self.pagination_mode {
            PaginationMode::ClientSide => self.paginator.slice(&self.rows),
            PaginationMode::ServerSide => ResultPage {
                items: self.rows.clone(),
                page_number: self.paginator.page_number(),
                page_size: self.paginator.page_size(),
                total_count: self.paginator.total_count(),
            },
        }
    }

    /// Replace the typed query; results and phase are untouched
    #[must_use]
    pub fn with_input(mut self, query: SearchQuery, validation_message: Option<String>) -> Self {
        self.query = query;
        self.validation_message = validation_message;
        self
    }

    #[must_use]
    pub fn with_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = Some(message.into());
        self
    }

    /// Enter `Searching` for `query`; rows of the previous search are dropped
    #[must_use]
    pub fn with_search_started(mut self, query: SearchQuery) -> Self {
        self.phase = Phase::Searching;
        self.query = query.clone();
        self.rows.clear();
        self.validation_message = None;
        self.error_message = None;
        self.loading = true;
        self.last_search = Some(query);
        self
    }

    /// Store normalized rows; `total_count` drives pagination
    #[must_use]
    pub fn with_results(mut self, rows: Vec<ResultRow>, total_count: usize, page_number: usize) -> Self {
        self.phase = if rows.is_empty() && total_count == 0 {
            Phase::NoResults
        } else {
            Phase::ResultsShown
        };
        self.rows = rows;
        self.paginator = self.paginator.with_total(total_count).go_to(page_number);
        self.error_message = None;
        self.loading = false;
        self
    }

    /// Show `message` and drop any stale rows
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.phase = Phase::ErrorShown;
        self.rows.clear();
        self.paginator = self.paginator.reset();
        self.error_message = Some(message.into());
        self.loading = false;
        self
    }

    /// Promote `row` and leave the search view
    #[must_use]
    pub fn with_selection(mut self, row: ResultRow) -> Self {
        self.phase = Phase::Selected;
        self.selected = Some(row);
        self.query = SearchQuery::empty();
        self.validation_message = None;
        self.rows.clear();
        self.paginator = self.paginator.reset();
        self.error_message = None;
        self.loading = false;
        self.last_search = None;
        self
    }

    #[must_use]
    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    #[must_use]
    pub fn with_loading_cleared(mut self) -> Self {
        self.loading = false;
        if self.phase == Phase::Searching {
            self.phase = Phase::Idle;
        }
        self
    }

    /// Back to `Idle` with nothing typed, found or selected
    #[must_use]
    pub fn cleared(self) -> Self {
        Self::new(
            self.paginator.page_size(),
            self.pagination_mode,
            self.display_threshold,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn row(id: &str) -> ResultRow {
        ResultRow {
            id: id.to_string(),
            identifier_number: "51824753556".into(),
            entity_name: "Acme".into(),
            entity_status: "Active".into(),
            entity_type: "N/A".into(),
            tax_registration_status: "N/A".into(),
            business_location: "N/A".into(),
            raw_data: Value::Null,
        }
    }

    #[test]
    fn search_then_results_then_selection() {
        let query = SearchQuery::new("51824753556", true);
        let state = LookupState::default().with_search_started(query.clone());
        assert_eq!(state.phase(), Phase::Searching);
        assert!(state.is_loading());

        let state = state.with_results(vec![row("result-0")], 1, 1);
        assert_eq!(state.phase(), Phase::ResultsShown);
        assert!(!state.is_loading());
        assert_eq!(state.last_search(), Some(&query));

        let state = state.with_selection(row("result-0"));
        assert_eq!(state.phase(), Phase::Selected);
        assert!(state.rows().is_empty());
        assert!(state.query().is_empty());
        assert!(!state.phase().can_search());
    }

    #[test]
    fn new_search_drops_previous_rows() {
        let state = LookupState::default()
            .with_search_started(SearchQuery::new("acme", true))
            .with_results(vec![row("result-0"), row("result-1")], 2, 1)
            .with_search_started(SearchQuery::new("acme pty", true));
        assert_eq!(state.phase(), Phase::Searching);
        assert!(state.rows().is_empty());
        assert!(state.current_page().items.is_empty());

        let state = state.with_loading_cleared();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_loading());
    }

    #[test]
    fn empty_results_are_not_an_error() {
        let state = LookupState::default()
            .with_search_started(SearchQuery::new("acme", true))
            .with_results(Vec::new(), 0, 1);
        assert_eq!(state.phase(), Phase::NoResults);
        assert!(state.error_message().is_none());
    }

    #[test]
    fn failure_clears_rows_and_loading() {
        let state = LookupState::default()
            .with_search_started(SearchQuery::new("acme", true))
            .with_results(vec![row("result-0")], 1, 1)
            .with_search_started(SearchQuery::new("acme pty", true))
            .with_failure("no match");
        assert_eq!(state.phase(), Phase::ErrorShown);
        assert_eq!(state.error_message(), Some("no match"));
        assert!(state.rows().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn cleared_keeps_only_page_configuration() {
        let state = LookupState::new(5, PaginationMode::ServerSide, 5)
            .with_search_started(SearchQuery::new("acme", true))
            .with_results(vec![row("result-0")], 12, 2)
            .cleared();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.paginator().page_size(), 5);
        assert_eq!(state.pagination_mode(), PaginationMode::ServerSide);
        assert!(state.last_search().is_none());
    }

    #[test]
    fn pagination_visibility_uses_threshold() {
        let rows: Vec<ResultRow> = (0..25).map(|i| row(&format!("result-{i}"))).collect();
        let state = LookupState::new(10, PaginationMode::ClientSide, 10).with_results(rows, 25, 3);
        assert!(state.show_pagination());
        assert_eq!(state.current_page().items.len(), 5);

        let few = LookupState::default().with_results(vec![row("result-0")], 1, 1);
        assert!(!few.show_pagination());
    }
}
