use std::sync::Arc;
use tokio::sync::broadcast;

use crate::events::config::EventBusConfig;
use crate::events::metrics::EventBusMetrics;
use crate::events::types::LookupEvent;

/// Event bus shared between a lookup and its host
///
/// Clones publish into the same channel and share metrics.
#[derive(Debug, Clone)]
pub struct LookupEventBus {
    pub(super) sender: broadcast::Sender<LookupEvent>,
    pub(super) config: Arc<EventBusConfig>,
    pub(super) metrics: EventBusMetrics,
}

impl LookupEventBus {
    /// Create a bus buffering at most `capacity` events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(EventBusConfig {
            capacity,
            ..Default::default()
        })
    }

    #[must_use]
    pub fn with_config(config: EventBusConfig) -> Self {
        let config = EventBusConfig {
            capacity: config.capacity.max(1),
            ..config
        };
        let (sender, _) = broadcast::channel(config.capacity);
        Self {
            sender,
            config: Arc::new(config),
            metrics: EventBusMetrics::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &EventBusMetrics {
        &self.metrics
    }

    /// Events currently buffered for the slowest subscriber
    #[must_use]
    pub fn buffer_len(&self) -> usize {
        self.sender.len()
    }
}
