//! The lookup state machine and its controller
//!
//! `Idle → Searching → {ResultsShown | NoResults | ErrorShown} → Selected`,
//! and back to `Idle` only through a clear.

pub mod controller;
pub mod errors;
pub mod state;

pub use controller::{ComponentValidity, EntityLookup, SearchOutcome};
pub use errors::{LookupError, SEARCH_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
pub use state::{LookupState, Phase};
