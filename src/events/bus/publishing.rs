use crate::events::errors::EventBusError;
use crate::events::types::LookupEvent;

use super::core::LookupEventBus;

impl LookupEventBus {
    /// Publish an event to all current subscribers
    ///
    /// Returns the number of subscribers that will see the event, or
    /// [`EventBusError::NoSubscribers`] when nobody is listening. The event is
    /// dropped in that case.
    pub fn publish(&self, event: LookupEvent) -> Result<usize, EventBusError> {
        let name = event.event_name();
        match self.sender.send(event) {
            Ok(subscribers) => {
                if self.config.enable_metrics {
                    self.metrics.record_delivered(subscribers);
                }
                log::trace!("Published {name} to {subscribers} subscribers");
                Ok(subscribers)
            }
            Err(_) => {
                if self.config.enable_metrics {
                    self.metrics.record_undelivered();
                }
                log::trace!("Dropped {name}: no active subscribers");
                Err(EventBusError::NoSubscribers)
            }
        }
    }

    /// Publish events in order; returns how many reached a subscriber
    pub fn publish_batch(&self, events: impl IntoIterator<Item = LookupEvent>) -> usize {
        events
            .into_iter()
            .map(|event| self.publish(event))
            .filter(Result::is_ok)
            .count()
    }

    /// Human-readable counter summary
    #[must_use]
    pub fn metrics_report(&self) -> String {
        if !self.config.enable_metrics {
            return "Metrics disabled".to_string();
        }
        let snapshot = self.metrics.snapshot();
        format!(
            "Lookup Event Metrics:\n\
             - Events Published: {}\n\
             - Events Undelivered: {}\n\
             - Peak Subscribers: {}\n\
             - Delivery Rate: {:.2}%",
            snapshot.events_published,
            snapshot.events_undelivered,
            snapshot.peak_subscribers,
            snapshot.delivery_rate() * 100.0
        )
    }
}
