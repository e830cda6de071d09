use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Lock-free counters for event bus activity
///
/// Clones share the same counters, so every handle to a bus reports the
/// same numbers.
#[derive(Debug, Clone, Default)]
pub struct EventBusMetrics {
    events_published: Arc<AtomicU64>,
    events_undelivered: Arc<AtomicU64>,
    peak_subscribers: Arc<AtomicUsize>,
}

impl EventBusMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivered(&self, subscribers: usize) {
        self.events_published.fetch_add(1, Ordering::SeqCst);
        let _ = self.peak_subscribers.fetch_max(subscribers, Ordering::SeqCst);
    }

    pub fn record_undelivered(&self) {
        self.events_undelivered.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_published: self.events_published.load(Ordering::SeqCst),
            events_undelivered: self.events_undelivered.load(Ordering::SeqCst),
            peak_subscribers: self.peak_subscribers.load(Ordering::SeqCst),
        }
    }

    pub fn reset(&self) {
        self.events_published.store(0, Ordering::SeqCst);
        self.events_undelivered.store(0, Ordering::SeqCst);
        self.peak_subscribers.store(0, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Events handed to at least one subscriber
    pub events_published: u64,
    /// Events emitted while nobody was listening
    pub events_undelivered: u64,
    pub peak_subscribers: usize,
}

impl MetricsSnapshot {
    #[must_use]
    pub fn total_events(&self) -> u64 {
        self.events_published + self.events_undelivered
    }

    /// Share of events that reached a subscriber, 1.0 when nothing was sent
    #[must_use]
    pub fn delivery_rate(&self) -> f64 {
        let total = self.total_events();
        if total == 0 {
            return 1.0;
        }
        self.events_published as f64 / total as f64
    }
}
