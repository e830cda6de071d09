//! Async coordination primitives for the lookup controller

pub mod debounce;
pub mod gate;

pub use debounce::{DEFAULT_DEBOUNCE_DELAY, Debouncer};
pub use gate::{SearchGate, SearchTicket};
