//! Latest-wins admission for overlapping searches

use std::future::Future;
use tokio::sync::watch;

/// Handle for one admitted search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchTicket {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets; only the newest is current
///
/// Work wrapped in [`run`](Self::run) is dropped as soon as a newer ticket is
/// issued or the gate is invalidated.
#[derive(Debug)]
pub struct SearchGate {
    latest: watch::Sender<u64>,
}

impl Default for SearchGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchGate {
    #[must_use]
    pub fn new() -> Self {
        let (latest, _) = watch::channel(0);
        Self { latest }
    }

    /// Admit a new search, superseding any in flight
    pub fn issue(&self) -> SearchTicket {
        let mut issued = 0;
        self.latest.send_modify(|latest| {
            *latest += 1;
            issued = *latest;
        });
        SearchTicket(issued)
    }

    /// Supersede whatever is in flight without admitting anything new
    pub fn invalidate(&self) {
        self.latest.send_modify(|latest| *latest += 1);
    }

    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        *self.latest.borrow() == ticket.0
    }

    /// Drive `work` until it finishes or `ticket` stops being current
    ///
    /// Returns `None` when superseded; `work` is dropped at that point.
    pub async fn run<F>(&self, ticket: SearchTicket, work: F) -> Option<F::Output>
    where
        F: Future,
    {
        let mut latest = self.latest.subscribe();
        tokio::select! {
            biased;
            output = work => Some(output),
            _ = latest.wait_for(|latest| *latest != ticket.0) => None,
        }
    }
}
