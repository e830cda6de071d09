//! Filtered receivers for selective event consumption

use std::sync::Arc;
use tokio::sync::broadcast;

use super::errors::EventBusError;
use super::types::LookupEvent;

/// Receiver that only yields events accepted by a predicate
pub struct FilteredReceiver<F>
where
    F: Fn(&LookupEvent) -> bool + Send + Sync + 'static,
{
    receiver: broadcast::Receiver<LookupEvent>,
    filter: Arc<F>,
}

impl<F> FilteredReceiver<F>
where
    F: Fn(&LookupEvent) -> bool + Send + Sync + 'static,
{
    pub fn new(receiver: broadcast::Receiver<LookupEvent>, filter: F) -> Self {
        Self {
            receiver,
            filter: Arc::new(filter),
        }
    }

    /// Wait for the next event that passes the filter
    pub async fn recv(&mut self) -> Result<LookupEvent, EventBusError> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if (self.filter)(&event) => return Ok(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Closed) => return Err(EventBusError::Shutdown),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    return Err(EventBusError::ReceiverLagged(skipped));
                }
            }
        }
    }

    /// Drain buffered events until one passes the filter; `Ok(None)` when
    /// nothing matching is buffered
    pub fn try_recv(&mut self) -> Result<Option<LookupEvent>, EventBusError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if (self.filter)(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(EventBusError::Shutdown),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    return Err(EventBusError::ReceiverLagged(skipped));
                }
            }
        }
    }

    #[must_use]
    pub fn would_receive(&self, event: &LookupEvent) -> bool {
        (self.filter)(event)
    }
}
