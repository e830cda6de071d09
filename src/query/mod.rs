//! Query classification and validation
//!
//! Turns raw keystrokes into a [`SearchQuery`] with a [`QueryKind`], and gates
//! searches behind per-kind syntax rules.

mod kind;
mod validation;

pub use kind::{
    DEFAULT_PLACEHOLDER, MIN_NAME_LENGTH, QueryKind, SearchQuery, SearchType, classify,
    classify_cleaned, clean_term,
};
pub use validation::{ValidationError, ValidationRules, validate, validate_query};
