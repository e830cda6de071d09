//! Canonical normalized entity row

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized search result
///
/// `id` is unique within the result set it came from. With positional ids it
/// is not stable across searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub id: String,
    pub identifier_number: String,
    pub entity_name: String,
    /// Status, with `from <date>` appended when an effective date is known
    pub entity_status: String,
    pub entity_type: String,
    pub tax_registration_status: String,
    pub business_location: String,
    /// The source element this row was normalized from
    pub raw_data: Value,
}

impl ResultRow {
    /// Identifier grouped for display, see [`format_identifier`]
    #[must_use]
    pub fn formatted_identifier(&self) -> String {
        format_identifier(&self.identifier_number)
    }
}

/// Group register identifiers for display
///
/// 11 digits render as `51 824 753 556`, 9 digits as `004 085 616`. Anything
/// else is returned unchanged.
#[must_use]
pub fn format_identifier(identifier: &str) -> String {
    let digits: String = identifier.chars().filter(|c| !c.is_whitespace()).collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return identifier.to_string();
    }

    let groups: &[usize] = match digits.len() {
        11 => &[2, 3, 3, 3],
        9 => &[3, 3, 3],
        _ => return identifier.to_string(),
    };

    let mut out = String::with_capacity(digits.len() + groups.len());
    let mut start = 0;
    for (i, len) in groups.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&digits[start..start + len]);
        start += len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_identifiers() {
        assert_eq!(format_identifier("51824753556"), "51 824 753 556");
        assert_eq!(format_identifier("004085616"), "004 085 616");
        assert_eq!(format_identifier("51 824 753 556"), "51 824 753 556");
        assert_eq!(format_identifier("N/A"), "N/A");
        assert_eq!(format_identifier("12345"), "12345");
    }
}
