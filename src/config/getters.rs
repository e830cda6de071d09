//! Accessors for `LookupConfig`

use serde_json::Value;
use std::time::Duration;

use super::types::LookupConfig;
use crate::pagination::PaginationMode;
use crate::query::ValidationRules;
use crate::results::{FieldMapping, RowIdStrategy};

impl LookupConfig {
    #[must_use]
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    #[must_use]
    pub fn config_settings(&self) -> &Value {
        &self.config_settings
    }

    #[must_use]
    pub fn initial_search_term(&self) -> Option<&str> {
        self.initial_search_term.as_deref()
    }

    #[must_use]
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total above which pagination controls are shown
    #[must_use]
    pub fn result_display_threshold(&self) -> usize {
        self.result_display_threshold.unwrap_or(self.page_size)
    }

    #[must_use]
    pub fn pagination_mode(&self) -> PaginationMode {
        self.pagination_mode
    }

    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            strip_internal_spaces: self.strip_internal_spaces,
            restrict_name_charset: self.restrict_name_charset,
        }
    }

    #[must_use]
    pub fn row_id_strategy(&self) -> RowIdStrategy {
        self.row_id_strategy
    }

    #[must_use]
    pub fn field_mapping(&self) -> &FieldMapping {
        &self.field_mapping
    }

    #[must_use]
    pub fn require_selection(&self) -> bool {
        self.require_selection
    }

    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }
}
