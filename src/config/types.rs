//! Core configuration type for an entity lookup instance

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::errors::ConfigError;
use crate::events::{DEFAULT_EVENT_CAPACITY, LookupEventBus};
use crate::pagination::{DEFAULT_PAGE_SIZE, PaginationMode};
use crate::results::{FieldMapping, RowIdStrategy};

/// Default component name reported in events
pub const DEFAULT_COMPONENT_NAME: &str = "entityLookup";

/// Configuration for one [`EntityLookup`](crate::EntityLookup)
///
/// Build with [`LookupConfig::builder`] or load from JSON with
/// [`LookupConfig::from_json`]. Missing JSON fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LookupConfig {
    pub(crate) component_name: String,
    pub(crate) record_id: Option<String>,
    /// Opaque host settings, passed through untouched
    pub(crate) config_settings: Value,
    /// Applied once when the lookup is created
    pub(crate) initial_search_term: Option<String>,
    pub(crate) read_only: bool,
    pub(crate) page_size: usize,
    /// Pagination controls appear only when the total exceeds this; defaults
    /// to the page size
    pub(crate) result_display_threshold: Option<usize>,
    pub(crate) pagination_mode: PaginationMode,
    pub(crate) debounce_delay_ms: u64,
    /// `None` disables the client-side timeout
    pub(crate) request_timeout_ms: Option<u64>,
    pub(crate) strip_internal_spaces: bool,
    pub(crate) restrict_name_charset: bool,
    pub(crate) row_id_strategy: RowIdStrategy,
    pub(crate) field_mapping: FieldMapping,
    /// Component validity additionally demands a selected row
    pub(crate) require_selection: bool,
    pub(crate) event_capacity: usize,

    /// Shared bus for hosts that observe several lookups at once
    #[serde(skip)]
    pub(crate) event_bus: Option<Arc<LookupEventBus>>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            record_id: None,
            config_settings: Value::Null,
            initial_search_term: None,
            read_only: false,
            page_size: DEFAULT_PAGE_SIZE,
            result_display_threshold: None,
            pagination_mode: PaginationMode::ClientSide,
            debounce_delay_ms: 300,
            request_timeout_ms: Some(30_000),
            strip_internal_spaces: true,
            restrict_name_charset: false,
            row_id_strategy: RowIdStrategy::Positional,
            field_mapping: FieldMapping::default(),
            require_selection: false,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            event_bus: None,
        }
    }
}

impl LookupConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.component_name.trim().is_empty() {
            return Err(ConfigError::EmptyComponentName);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.result_display_threshold == Some(0) {
            return Err(ConfigError::ZeroDisplayThreshold);
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        Ok(())
    }

    /// Attach a shared event bus
    #[must_use]
    pub fn with_event_bus(mut self, bus: Arc<LookupEventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    #[must_use]
    pub fn event_bus(&self) -> Option<&Arc<LookupEventBus>> {
        self.event_bus.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn json_document_fills_defaults() {
        let config = LookupConfig::from_json(
            r#"{"componentName": "supplierAbn", "pageSize": 5, "paginationMode": "server_side"}"#,
        )
        .unwrap();

        assert_eq!(config.component_name(), "supplierAbn");
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.pagination_mode(), PaginationMode::ServerSide);
        assert_eq!(config.debounce_delay(), Duration::from_millis(300));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.result_display_threshold(), 5);
        assert!(config.event_bus().is_none());
    }

    #[test]
    fn json_document_is_validated() {
        assert_eq!(
            LookupConfig::from_json(r#"{"pageSize": 0}"#).unwrap_err(),
            ConfigError::ZeroPageSize
        );
        assert_eq!(
            LookupConfig::from_json(r#"{"resultDisplayThreshold": 0}"#).unwrap_err(),
            ConfigError::ZeroDisplayThreshold
        );
        assert!(matches!(
            LookupConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
