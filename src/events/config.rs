//! Configuration for the lookup event bus

/// Default number of buffered events per bus
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Maximum number of events buffered for slow subscribers
    pub capacity: usize,
    /// Whether to collect publish/drop counters
    pub enable_metrics: bool,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_CAPACITY,
            enable_metrics: true,
        }
    }
}
