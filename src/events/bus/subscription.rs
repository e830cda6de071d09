use tokio::sync::broadcast;

use crate::events::streaming::FilteredReceiver;
use crate::events::types::LookupEvent;

use super::core::LookupEventBus;

impl LookupEventBus {
    /// Receive every event published after this call
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LookupEvent> {
        self.sender.subscribe()
    }

    /// Receive only events accepted by `filter`
    pub fn subscribe_filtered<F>(&self, filter: F) -> FilteredReceiver<F>
    where
        F: Fn(&LookupEvent) -> bool + Send + Sync + 'static,
    {
        FilteredReceiver::new(self.subscribe(), filter)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}
