//! Notifications emitted to the host container
//!
//! Every observable transition of a lookup is published on a
//! [`LookupEventBus`]. Hosts subscribe to all events or to a filtered subset.

pub mod bus;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod streaming;
pub mod types;

pub use bus::LookupEventBus;
pub use config::{DEFAULT_EVENT_CAPACITY, EventBusConfig};
pub use errors::EventBusError;
pub use metrics::{EventBusMetrics, MetricsSnapshot};
pub use streaming::FilteredReceiver;
pub use types::{EventSource, FailureKind, LookupEvent};
