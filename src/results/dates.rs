//! Effective-date rendering for status fields

use chrono::NaiveDate;

/// Register sentinel meaning "no date"
pub const ZERO_DATE: &str = "0001-01-01";

/// Render an effective date as `DD Mon YYYY`
///
/// Accepts `YYYY-MM-DD` optionally followed by a time part. Returns `None`
/// for blank input and for the [`ZERO_DATE`] sentinel so it never reaches a
/// status string. Dates that do not parse are returned verbatim.
#[must_use]
pub fn format_effective_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(ZERO_DATE) {
        return None;
    }

    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date.format("%d %b %Y").to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}
