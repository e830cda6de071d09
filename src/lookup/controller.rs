//! `EntityLookup`: search execution, selection and the host-facing API

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, trace, warn};

use super::errors::LookupError;
use super::state::{LookupState, Phase};
use crate::backend::{BackendError, SearchBackend, SearchRequest, SearchResponse};
use crate::config::LookupConfig;
use crate::events::{EventSource, FailureKind, FilteredReceiver, LookupEvent, LookupEventBus};
use crate::pagination::{PaginationMode, ResultPage};
use crate::query::{QueryKind, SearchQuery, SearchType, ValidationError, validate_query};
use crate::results::{ResultRow, normalize};
use crate::runtime::{Debouncer, SearchGate, SearchTicket};

/// How a search call ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rows were stored; `count` is the total match count
    Results { count: usize },
    /// The endpoint matched nothing
    NoResults,
    /// A newer search, selection or clear took over; nothing was stored
    Superseded,
    /// A later keystroke arrived within the debounce window
    Debounced,
    /// The debounced term is not yet searchable
    Incomplete,
}

/// Snapshot answered to the host's validity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentValidity {
    pub is_valid: bool,
    pub has_selection: bool,
    pub search_term: String,
    pub search_type: Option<SearchType>,
    pub has_results: bool,
    pub error_message: Option<String>,
}

/// One incremental entity lookup
///
/// Owns its own query, results and selection. All methods take `&self`; the
/// state lock is never held across an await, so a lookup can be shared
/// behind an `Arc` and driven from several tasks. Only the newest search can
/// change state.
pub struct EntityLookup {
    config: LookupConfig,
    backend: Arc<dyn SearchBackend>,
    state: Mutex<LookupState>,
    bus: Arc<LookupEventBus>,
    source: EventSource,
    gate: SearchGate,
    debouncer: Debouncer,
}

impl std::fmt::Debug for EntityLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityLookup")
            .field("component_name", &self.source.component_name)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag when the search holding `ticket` ends, however it
/// ends, unless a newer search has taken ownership of the flag
struct LoadingGuard<'a> {
    lookup: &'a EntityLookup,
    ticket: SearchTicket,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.lookup.state.lock();
        if self.lookup.gate.is_current(self.ticket) && state.is_loading() {
            debug!(ticket = self.ticket.id(), "Clearing loading flag on early exit");
            *state = std::mem::take(&mut *state).with_loading_cleared();
        }
    }
}

impl EntityLookup {
    /// Create a lookup; any configured initial term is typed in but not
    /// searched
    pub fn new(config: LookupConfig, backend: impl SearchBackend + 'static) -> Self {
        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(config: LookupConfig, backend: Arc<dyn SearchBackend>) -> Self {
        let bus = config
            .event_bus()
            .cloned()
            .unwrap_or_else(|| Arc::new(LookupEventBus::new(config.event_capacity())));
        let state = LookupState::new(
            config.page_size(),
            config.pagination_mode(),
            config.result_display_threshold(),
        );

        let lookup = Self {
            source: EventSource::new(config.component_name()),
            debouncer: Debouncer::new(config.debounce_delay()),
            gate: SearchGate::new(),
            state: Mutex::new(state),
            bus,
            backend,
            config,
        };

        if let Some(term) = lookup.config.initial_search_term().map(str::to_owned) {
            lookup.apply_input(&term);
        }
        lookup
    }

    #[must_use]
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    #[must_use]
    pub fn event_bus(&self) -> &Arc<LookupEventBus> {
        &self.bus
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> LookupState {
        self.state.lock().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LookupEvent> {
        self.bus.subscribe()
    }

    pub fn subscribe_filtered<F>(&self, filter: F) -> FilteredReceiver<F>
    where
        F: Fn(&LookupEvent) -> bool + Send + Sync + 'static,
    {
        self.bus.subscribe_filtered(filter)
    }

    /// Record a keystroke: reclassify and revalidate the typed term
    pub fn input(&self, raw: &str) -> Result<QueryKind, LookupError> {
        if self.config.read_only() {
            return Err(LookupError::ReadOnly);
        }
        let phase = self.state.lock().phase();
        if phase == Phase::Selected {
            return Err(LookupError::InvalidTransition {
                action: "edit the search term",
                phase,
            });
        }
        Ok(self.apply_input(raw))
    }

    fn apply_input(&self, raw: &str) -> QueryKind {
        let rules = self.config.validation_rules();
        let query = SearchQuery::new(raw, rules.strip_internal_spaces);
        let kind = query.kind();
        let message = if query.cleaned().is_empty() {
            None
        } else {
            validate_query(&query, &rules).err().map(|e| e.to_string())
        };

        trace!(?kind, "Search term updated");
        self.transition(|state| state.with_input(query, message));
        kind
    }

    /// Validate and search the current term from page 1
    pub async fn search(&self) -> Result<SearchOutcome, LookupError> {
        self.ensure_searchable("search")?;

        let query = self.state.lock().query().clone();
        let rules = self.config.validation_rules();
        if let Err(err) = validate_query(&query, &rules) {
            debug!(error = %err, "Search blocked by validation");
            self.transition(|state| state.with_validation_message(err.to_string()));
            self.emit(LookupEvent::validation_failed(
                self.source.clone(),
                err.to_string(),
                query.raw_term(),
            ));
            return Err(err.into());
        }

        self.execute(query, 1).await
    }

    /// Type `raw`, wait for typing to pause, then search if nothing newer
    /// arrived
    pub async fn search_debounced(&self, raw: &str) -> Result<SearchOutcome, LookupError> {
        self.input(raw)?;
        if !self.debouncer.settle().await {
            trace!("Debounced search superseded by later input");
            return Ok(SearchOutcome::Debounced);
        }

        let searchable = {
            let state = self.state.lock();
            validate_query(state.query(), &self.config.validation_rules()).is_ok()
        };
        if !searchable {
            return Ok(SearchOutcome::Incomplete);
        }
        self.search().await
    }

    /// Re-run the last executed search, keeping the current page
    pub async fn refresh_data(&self) -> Result<SearchOutcome, LookupError> {
        self.ensure_searchable("refresh")?;
        let (query, page) = {
            let state = self.state.lock();
            match state.last_search() {
                Some(query) => (query.clone(), state.paginator().page_number()),
                None => return Err(LookupError::NoSearchToRefresh),
            }
        };
        self.execute(query, page).await
    }

    async fn execute(&self, query: SearchQuery, page_number: usize) -> Result<SearchOutcome, LookupError> {
        let search_type = query
            .search_type()
            .ok_or(LookupError::Validation(ValidationError::EmptyTerm))?;

        // Ticket and Searching phase change together, or a finished newer
        // search could be overwritten by this one's loading flag
        let ticket = {
            let mut state = self.state.lock();
            let ticket = self.gate.issue();
            *state = std::mem::take(&mut *state).with_search_started(query.clone());
            ticket
        };
        let _loading = LoadingGuard {
            lookup: self,
            ticket,
        };

        let mut request = SearchRequest::new(query.cleaned(), search_type);
        if self.config.pagination_mode() == PaginationMode::ServerSide {
            let page_size = self.state.lock().paginator().page_size();
            request = request.with_page(page_number, page_size);
        }

        debug!(ticket = ticket.id(), term = query.cleaned(), %search_type, page_number, "Search started");
        self.emit(LookupEvent::search_started(
            self.source.clone(),
            query.cleaned(),
            search_type,
            page_number,
        ));

        let Some(response) = self.gate.run(ticket, self.call_backend(request)).await else {
            debug!(ticket = ticket.id(), "Search superseded before completion");
            return Ok(SearchOutcome::Superseded);
        };

        match response {
            Ok(response) if response.success => {
                self.apply_success(ticket, &query, search_type, response, page_number)
            }
            Ok(response) => {
                let err = LookupError::Business(response.message);
                self.apply_failure(ticket, &query, search_type, FailureKind::Business, err)
            }
            Err(backend_err) => {
                error!(error = %backend_err, term = query.cleaned(), "Search request failed");
                let err = LookupError::Transport(backend_err);
                self.apply_failure(ticket, &query, search_type, FailureKind::Transport, err)
            }
        }
    }

    async fn call_backend(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        let call = self.backend.search(request);
        match self.config.request_timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(BackendError::Timeout(limit)),
            },
            None => call.await,
        }
    }

    fn apply_success(
        &self,
        ticket: SearchTicket,
        query: &SearchQuery,
        search_type: SearchType,
        response: SearchResponse,
        page_number: usize,
    ) -> Result<SearchOutcome, LookupError> {
        let rows = normalize(
            &response.data,
            self.config.field_mapping(),
            self.config.row_id_strategy(),
        );
        let total_count = match self.config.pagination_mode() {
            PaginationMode::ClientSide => rows.len(),
            PaginationMode::ServerSide => response.total_count.unwrap_or(rows.len()),
        };

        {
            let mut state = self.state.lock();
            if !self.gate.is_current(ticket) {
                debug!(ticket = ticket.id(), "Discarding stale search response");
                return Ok(SearchOutcome::Superseded);
            }
            *state = std::mem::take(&mut *state).with_results(rows.clone(), total_count, page_number);
        }

        info!(term = query.cleaned(), %search_type, total_count, "Search completed");
        self.emit(LookupEvent::search_succeeded(
            self.source.clone(),
            query.cleaned(),
            search_type,
            rows,
            total_count,
        ));

        Ok(if total_count == 0 {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results { count: total_count }
        })
    }

    fn apply_failure(
        &self,
        ticket: SearchTicket,
        query: &SearchQuery,
        search_type: SearchType,
        failure: FailureKind,
        err: LookupError,
    ) -> Result<SearchOutcome, LookupError> {
        let message = err.user_message();
        {
            let mut state = self.state.lock();
            if !self.gate.is_current(ticket) {
                debug!(ticket = ticket.id(), "Discarding stale search failure");
                return Ok(SearchOutcome::Superseded);
            }
            *state = std::mem::take(&mut *state).with_failure(message.clone());
        }

        self.emit(LookupEvent::search_failed(
            self.source.clone(),
            message,
            failure,
            Some(query.cleaned().to_string()),
            Some(search_type),
        ));
        Err(err)
    }

    /// Promote the row with `row_id` to the selection
    ///
    /// Unknown ids leave the state untouched.
    pub fn select(&self, row_id: &str) -> Result<ResultRow, LookupError> {
        if self.config.read_only() {
            return Err(LookupError::ReadOnly);
        }

        let row = {
            let mut state = self.state.lock();
            let Some(row) = state.rows().iter().find(|r| r.id == row_id).cloned() else {
                warn!(row_id, phase = ?state.phase(), "Selected id is not in the current results");
                return Err(LookupError::NotFound(row_id.to_string()));
            };
            self.gate.invalidate();
            self.debouncer.cancel();
            *state = std::mem::take(&mut *state).with_selection(row.clone());
            row
        };

        info!(row_id, identifier = %row.identifier_number, "Entity selected");
        self.emit(LookupEvent::selection_made(self.source.clone(), row.clone()));
        Ok(row)
    }

    /// Reset everything and notify the host
    pub fn clear_selection(&self) {
        self.reset();
        debug!("Selection cleared");
        self.emit(LookupEvent::selection_cleared(self.source.clone()));
    }

    /// Reset everything without notifying the host
    pub fn clear_search(&self) {
        self.reset();
        debug!("Search cleared");
    }

    fn reset(&self) {
        let mut state = self.state.lock();
        self.gate.invalidate();
        self.debouncer.cancel();
        *state = std::mem::take(&mut *state).cleared();
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<ResultRow> {
        self.state.lock().selected().cloned()
    }

    #[must_use]
    pub fn validate_component(&self) -> ComponentValidity {
        let state = self.state.lock();
        let query = state.query();
        let has_selection = state.selected().is_some();
        let input_valid = validate_query(query, &self.config.validation_rules()).is_ok();

        ComponentValidity {
            is_valid: if self.config.require_selection() {
                has_selection
            } else {
                has_selection || input_valid
            },
            has_selection,
            search_term: query.raw_term().to_string(),
            search_type: query.search_type(),
            has_results: state.has_results(),
            error_message: state
                .error_message()
                .or(state.validation_message())
                .map(str::to_owned),
        }
    }

    #[must_use]
    pub fn current_page(&self) -> ResultPage {
        self.state.lock().current_page()
    }

    /// Move to `page_number`, clamped into range
    ///
    /// Server-side paging fetches the page from the endpoint.
    pub async fn go_to_page(&self, page_number: usize) -> Result<ResultPage, LookupError> {
        let (target, last_search) = {
            let state = self.state.lock();
            if state.phase() != Phase::ResultsShown {
                return Err(LookupError::InvalidTransition {
                    action: "change page",
                    phase: state.phase(),
                });
            }
            let target = state.paginator().go_to(page_number);
            if target.page_number() == state.paginator().page_number() {
                return Ok(state.current_page());
            }
            (target, state.last_search().cloned())
        };

        match (self.config.pagination_mode(), last_search) {
            (PaginationMode::ServerSide, Some(query)) => {
                self.execute(query, target.page_number()).await?;
            }
            _ => self.transition(|state| state.with_paginator(target)),
        }
        Ok(self.current_page())
    }

    pub async fn next_page(&self) -> Result<ResultPage, LookupError> {
        let current = self.state.lock().paginator().page_number();
        self.go_to_page(current.saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> Result<ResultPage, LookupError> {
        let current = self.state.lock().paginator().page_number();
        self.go_to_page(current.saturating_sub(1)).await
    }

    /// Change the page size and return to page 1
    pub async fn set_page_size(&self, page_size: usize) -> Result<ResultPage, LookupError> {
        let refetch = {
            let mut state = self.state.lock();
            let paginator = state.paginator().with_page_size(page_size);
            *state = std::mem::take(&mut *state).with_paginator(paginator);
            match self.config.pagination_mode() {
                PaginationMode::ServerSide if state.phase() == Phase::ResultsShown => {
                    state.last_search().cloned()
                }
                _ => None,
            }
        };

        if let Some(query) = refetch {
            self.execute(query, 1).await?;
        }
        Ok(self.current_page())
    }

    /// Placeholder hint for the detected input kind
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        self.state.lock().query().kind().placeholder()
    }

    #[must_use]
    pub fn search_button_label(&self) -> &'static str {
        self.state.lock().query().kind().search_button_label()
    }

    /// Whether a search can be triggered right now
    #[must_use]
    pub fn is_search_enabled(&self) -> bool {
        if self.config.read_only() {
            return false;
        }
        let state = self.state.lock();
        !state.is_loading()
            && state.phase().can_search()
            && validate_query(state.query(), &self.config.validation_rules()).is_ok()
    }

    /// Message for an empty result set, `None` unless the last search matched
    /// nothing
    #[must_use]
    pub fn no_results_message(&self) -> Option<String> {
        let state = self.state.lock();
        (state.phase() == Phase::NoResults).then(|| {
            format!(
                "No matching results for {}, please check the inputs and try again.",
                state.query().cleaned()
            )
        })
    }

    fn ensure_searchable(&self, action: &'static str) -> Result<(), LookupError> {
        if self.config.read_only() {
            return Err(LookupError::ReadOnly);
        }
        let phase = self.state.lock().phase();
        if phase.can_search() {
            Ok(())
        } else {
            Err(LookupError::InvalidTransition { action, phase })
        }
    }

    fn transition(&self, f: impl FnOnce(LookupState) -> LookupState) {
        let mut state = self.state.lock();
        *state = f(std::mem::take(&mut *state));
    }

    fn emit(&self, event: LookupEvent) {
        let name = event.event_name();
        if self.bus.publish(event).is_err() {
            trace!(event = name, "No listeners for lookup event");
        }
    }
}
