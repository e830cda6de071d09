//! Search term classification
//!
//! Inspects raw input on every keystroke and decides which kind of query it
//! represents. Classification is cheap and side-effect free; only the remote
//! call is gated by validation and debouncing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Minimum trimmed length of a free-text name query
pub const MIN_NAME_LENGTH: usize = 2;

/// Placeholder shown before anything classifiable has been typed
pub const DEFAULT_PLACEHOLDER: &str = "Search by Business name, ABN or ACN";

static ELEVEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("static regex is valid"));

static NINE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9}$").expect("static regex is valid"));

/// Kind of query a search term represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QueryKind {
    /// Exactly 11 digits (business-number-like)
    Identifier11,
    /// Exactly 9 digits (company-number-like)
    Identifier9,
    /// Name search, at least two characters
    FreeText,
    /// Too short to search
    #[default]
    Unclassified,
}

impl QueryKind {
    /// Wire search type for this kind, `None` when the term is not searchable
    #[must_use]
    pub fn search_type(self) -> Option<SearchType> {
        match self {
            QueryKind::Identifier11 => Some(SearchType::Abn),
            QueryKind::Identifier9 => Some(SearchType::Acn),
            QueryKind::FreeText => Some(SearchType::Name),
            QueryKind::Unclassified => None,
        }
    }

    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            QueryKind::Identifier11 => "Enter 11-digit ABN",
            QueryKind::Identifier9 => "Enter 9-digit ACN",
            QueryKind::FreeText => "Enter company name",
            QueryKind::Unclassified => DEFAULT_PLACEHOLDER,
        }
    }

    /// Identifier-11 lookups verify a known number; everything else searches
    #[must_use]
    pub fn search_button_label(self) -> &'static str {
        match self {
            QueryKind::Identifier11 => "Verify",
            _ => "Search",
        }
    }

    #[must_use]
    pub fn is_searchable(self) -> bool {
        self != QueryKind::Unclassified
    }
}

/// Search type sent to the remote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    #[serde(rename = "ABN")]
    Abn,
    #[serde(rename = "ACN")]
    Acn,
    #[serde(rename = "NAME")]
    Name,
}

impl SearchType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Abn => "ABN",
            SearchType::Acn => "ACN",
            SearchType::Name => "NAME",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw term before classification
///
/// Leading and trailing whitespace is always removed. When
/// `strip_internal_spaces` is set, all whitespace is removed so that
/// `"51 824 753 556"` classifies as an 11-digit identifier. Internal spaces
/// are only dropped when what remains is purely numeric; names keep theirs.
#[must_use]
pub fn clean_term(raw: &str, strip_internal_spaces: bool) -> String {
    let trimmed = raw.trim();
    if strip_internal_spaces {
        let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        if !compact.is_empty() && compact.chars().all(|c| c.is_ascii_digit()) {
            return compact;
        }
    }
    trimmed.to_string()
}

/// Classify an already-cleaned term
#[must_use]
pub fn classify_cleaned(cleaned: &str) -> QueryKind {
    if ELEVEN_DIGITS.is_match(cleaned) {
        QueryKind::Identifier11
    } else if NINE_DIGITS.is_match(cleaned) {
        QueryKind::Identifier9
    } else if cleaned.chars().count() >= MIN_NAME_LENGTH {
        QueryKind::FreeText
    } else {
        QueryKind::Unclassified
    }
}

/// Classify a raw term, stripping internal spaces from numeric input
#[must_use]
pub fn classify(raw: &str) -> QueryKind {
    classify_cleaned(&clean_term(raw, true))
}

/// One search attempt's input
///
/// Rebuilt on every keystroke; the value sent to the endpoint is always
/// [`SearchQuery::cleaned`], never the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    raw_term: String,
    cleaned: String,
    kind: QueryKind,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw_term: impl Into<String>, strip_internal_spaces: bool) -> Self {
        let raw_term = raw_term.into();
        let cleaned = clean_term(&raw_term, strip_internal_spaces);
        let kind = classify_cleaned(&cleaned);
        Self {
            raw_term,
            cleaned,
            kind,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn raw_term(&self) -> &str {
        &self.raw_term
    }

    #[must_use]
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    #[must_use]
    pub fn search_type(&self) -> Option<SearchType> {
        self.kind.search_type()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw_term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_classify_by_length() {
        assert_eq!(classify("51824753556"), QueryKind::Identifier11);
        assert_eq!(classify("004085616"), QueryKind::Identifier9);
        assert_eq!(classify("1234567890"), QueryKind::FreeText);
        assert_eq!(classify("7"), QueryKind::Unclassified);
    }

    #[test]
    fn non_ascii_digits_are_not_identifiers() {
        assert_eq!(classify("١٢٣٤٥٦٧٨٩٠١"), QueryKind::FreeText);
        assert_eq!(classify("١٢٣٤٥٦٧٨٩"), QueryKind::FreeText);
    }

    #[test]
    fn spaced_identifier_is_compacted() {
        assert_eq!(classify(" 51 824 753 556 "), QueryKind::Identifier11);
        assert_eq!(clean_term("004 085 616", true), "004085616");
        assert_eq!(clean_term("004 085 616", false), "004 085 616");
    }

    #[test]
    fn names_keep_internal_spaces() {
        assert_eq!(clean_term("  Big Bang Aged Care ", true), "Big Bang Aged Care");
        assert_eq!(classify("ab"), QueryKind::FreeText);
        assert_eq!(classify(" a "), QueryKind::Unclassified);
    }

    #[test]
    fn search_types_and_labels() {
        assert_eq!(QueryKind::Identifier11.search_type(), Some(SearchType::Abn));
        assert_eq!(QueryKind::Identifier9.search_type(), Some(SearchType::Acn));
        assert_eq!(QueryKind::FreeText.search_type(), Some(SearchType::Name));
        assert_eq!(QueryKind::Unclassified.search_type(), None);
        assert_eq!(QueryKind::Identifier11.search_button_label(), "Verify");
        assert_eq!(QueryKind::FreeText.search_button_label(), "Search");
        assert_eq!(QueryKind::Unclassified.placeholder(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn search_type_serializes_to_wire_names() {
        let json = serde_json::to_string(&SearchType::Abn).unwrap();
        assert_eq!(json, "\"ABN\"");
        assert_eq!(SearchType::Name.to_string(), "NAME");
    }
}
