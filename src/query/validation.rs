//! Per-kind syntactic validation of search terms
//!
//! Runs reactively on every keystroke (to enable or disable searching) and
//! once more immediately before a search fires.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::kind::{MIN_NAME_LENGTH, QueryKind, SearchQuery, clean_term};

static NAME_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\s&.\-]+$").expect("NAME_CHARSET: hardcoded regex is valid")
});

/// Rules that vary between lookup configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Remove internal whitespace from numeric input before checking digits
    pub strip_internal_spaces: bool,
    /// Restrict names to letters, digits, whitespace and `&.-`
    pub restrict_name_charset: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            strip_internal_spaces: true,
            restrict_name_charset: false,
        }
    }
}

/// Input rejected before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ABN must be exactly 11 digits")]
    Identifier11Digits,

    #[error("ACN must be exactly 9 digits")]
    Identifier9Digits,

    #[error("Company name must be at least 2 characters")]
    NameTooShort,

    #[error("Company name may only contain letters, digits, spaces, '&', '.' and '-'")]
    NameCharset,

    #[error("Please enter a search term")]
    EmptyTerm,
}

/// Validate `term` against the rule for `kind`
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first rule the cleaned term
/// violates. `Unclassified` always fails with [`ValidationError::EmptyTerm`].
pub fn validate(term: &str, kind: QueryKind, rules: &ValidationRules) -> Result<(), ValidationError> {
    let cleaned = clean_term(term, rules.strip_internal_spaces);

    match kind {
        QueryKind::Identifier11 => {
            if is_all_digits(&cleaned, 11) {
                Ok(())
            } else {
                Err(ValidationError::Identifier11Digits)
            }
        }
        QueryKind::Identifier9 => {
            if is_all_digits(&cleaned, 9) {
                Ok(())
            } else {
                Err(ValidationError::Identifier9Digits)
            }
        }
        QueryKind::FreeText => {
            if cleaned.chars().count() < MIN_NAME_LENGTH {
                return Err(ValidationError::NameTooShort);
            }
            if rules.restrict_name_charset && !NAME_CHARSET.is_match(&cleaned) {
                return Err(ValidationError::NameCharset);
            }
            Ok(())
        }
        QueryKind::Unclassified => Err(ValidationError::EmptyTerm),
    }
}

/// Validate a query using its own classification
///
/// # Errors
///
/// See [`validate`].
pub fn validate_query(query: &SearchQuery, rules: &ValidationRules) -> Result<(), ValidationError> {
    validate(query.raw_term(), query.kind(), rules)
}

fn is_all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}
