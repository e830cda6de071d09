//! Builder methods available for all states

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::builder::LookupConfigBuilder;
use crate::events::LookupEventBus;
use crate::pagination::PaginationMode;
use crate::results::{FieldMapping, RowIdStrategy};

impl<State> LookupConfigBuilder<State> {
    #[must_use]
    pub fn record_id(mut self, record_id: impl Into<String>) -> Self {
        self.draft.record_id = Some(record_id.into());
        self
    }

    #[must_use]
    pub fn config_settings(mut self, settings: Value) -> Self {
        self.draft.config_settings = settings;
        self
    }

    /// Term searched as soon as the lookup is created
    #[must_use]
    pub fn initial_search_term(mut self, term: impl Into<String>) -> Self {
        self.draft.initial_search_term = Some(term.into());
        self
    }

    /// Disable searching and selection changes
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.draft.read_only = read_only;
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.draft.page_size = page_size;
        self
    }

    #[must_use]
    pub fn result_display_threshold(mut self, threshold: usize) -> Self {
        self.draft.result_display_threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn pagination_mode(mut self, mode: PaginationMode) -> Self {
        self.draft.pagination_mode = mode;
        self
    }

    #[must_use]
    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.draft.debounce_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Client-side ceiling on one request; `None` waits indefinitely
    #[must_use]
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.draft.request_timeout_ms =
            timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn strip_internal_spaces(mut self, strip: bool) -> Self {
        self.draft.strip_internal_spaces = strip;
        self
    }

    #[must_use]
    pub fn restrict_name_charset(mut self, restrict: bool) -> Self {
        self.draft.restrict_name_charset = restrict;
        self
    }

    #[must_use]
    pub fn row_id_strategy(mut self, strategy: RowIdStrategy) -> Self {
        self.draft.row_id_strategy = strategy;
        self
    }

    #[must_use]
    pub fn field_mapping(mut self, mapping: FieldMapping) -> Self {
        self.draft.field_mapping = mapping;
        self
    }

    #[must_use]
    pub fn require_selection(mut self, require: bool) -> Self {
        self.draft.require_selection = require;
        self
    }

    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.draft.event_capacity = capacity;
        self
    }

    #[must_use]
    pub fn event_bus(mut self, bus: Arc<LookupEventBus>) -> Self {
        self.draft.event_bus = Some(bus);
        self
    }
}
