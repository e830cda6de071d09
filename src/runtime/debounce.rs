//! Trailing-edge debounce for keystroke-driven searches

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Default quiet period before a typed query is searched
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Collapses bursts of calls into the last one
///
/// Each call to [`settle`](Self::settle) takes a generation number, waits out
/// the delay, and reports whether it is still the newest call. Callers that
/// get `false` were overtaken and should do nothing.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_DELAY)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the quiet period; `true` if no newer call arrived meanwhile
    pub async fn settle(&self) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Make every pending [`settle`](Self::settle) resolve to `false`
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
