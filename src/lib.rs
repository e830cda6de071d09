//! Incremental ABN/ACN/name entity lookup
//!
//! Classifies a typed term, validates it, searches a remote registry
//! endpoint, normalizes the heterogeneous results into uniform rows, pages
//! them, and lets the user promote one row to a selection. Every observable
//! transition is published as a [`LookupEvent`].

pub mod backend;
pub mod config;
pub mod events;
pub mod lookup;
pub mod pagination;
pub mod query;
pub mod results;
pub mod runtime;

pub use backend::{
    BackendError, HttpSearchBackend, SearchBackend, SearchRequest, SearchResponse, backend_fn,
};
pub use config::{ConfigError, LookupConfig, LookupConfigBuilder};
pub use events::{EventBusError, EventSource, FailureKind, LookupEvent, LookupEventBus};
pub use lookup::{
    ComponentValidity, EntityLookup, LookupError, LookupState, Phase, SearchOutcome,
};
pub use pagination::{PaginationMode, Paginator, ResultPage, page};
pub use query::{
    QueryKind, SearchQuery, SearchType, ValidationError, ValidationRules, classify, validate,
};
pub use results::{FieldMapping, ResultRow, RowIdStrategy, normalize};
