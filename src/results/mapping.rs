//! Field-mapping table from register response fields to [`ResultRow`] fields
//!
//! Each canonical field has an ordered list of source paths. Dotted paths
//! walk nested objects (`entity_status.entity_status_code`); plain names read
//! flat aliases. The first non-empty value wins, otherwise [`NOT_AVAILABLE`].
//!
//! [`ResultRow`]: super::ResultRow

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal used when no source path yields a value
pub const NOT_AVAILABLE: &str = "N/A";

/// How row ids are derived during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIdStrategy {
    /// `result-{index}`, unique within one result set only
    #[default]
    Positional,
    /// The identifier number, falling back to `result-{index}` when the
    /// identifier is missing or repeats within the result set
    BusinessKey,
}

/// Source paths for one canonical field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Candidate paths in precedence order
    pub paths: Vec<String>,

    /// Candidate effective-date paths; a usable date adds a `from <date>` suffix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date_paths: Vec<String>,

    /// Replaces the value when a date is present (`Registered from <date>`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dated_label: Option<String>,
}

impl FieldSpec {
    #[must_use]
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            date_paths: Vec::new(),
            dated_label: None,
        }
    }

    #[must_use]
    pub fn dated_by<I, S>(mut self, date_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_paths = date_paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dated_label(mut self, label: impl Into<String>) -> Self {
        self.dated_label = Some(label.into());
        self
    }

    /// First non-empty value along [`FieldSpec::paths`]
    #[must_use]
    pub fn extract(&self, item: &Value) -> Option<String> {
        first_value(item, &self.paths)
    }

    /// First non-empty raw date along [`FieldSpec::date_paths`]
    #[must_use]
    pub fn extract_date(&self, item: &Value) -> Option<String> {
        first_value(item, &self.date_paths)
    }
}

/// Mapping for every canonical [`ResultRow`](super::ResultRow) field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub identifier_number: FieldSpec,
    pub entity_name: FieldSpec,
    pub entity_status: FieldSpec,
    pub entity_type: FieldSpec,
    pub tax_registration_status: FieldSpec,
    pub business_location: FieldSpec,
}

impl FieldMapping {
    /// Business-register table covering nested register records and the
    /// flat shapes returned by simplified endpoints
    #[must_use]
    pub fn business_register() -> Self {
        Self {
            identifier_number: FieldSpec::new(["abn.identifier_value", "abnNumber", "ABN"]),
            entity_name: FieldSpec::new([
                "other_trading_name.organisation_name",
                "main_name.organisation_name",
                "entityName",
                "entity_name",
                "businessName",
            ]),
            entity_status: FieldSpec::new([
                "entity_status.entity_status_code",
                "abnStatus",
                "status",
            ])
            .dated_by(["entity_status.effective_from"]),
            entity_type: FieldSpec::new(["entity_type.entity_description", "entityType"]),
            tax_registration_status: FieldSpec::new(["goods_and_services_tax.status", "gstStatus"])
                .dated_by(["goods_and_services_tax.effective_from"])
                .with_dated_label("Registered"),
            business_location: FieldSpec::new([
                "main_business_location",
                "business_location",
                "businessLocation",
            ]),
        }
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::business_register()
    }
}

/// Walk a dotted path through nested objects
#[must_use]
pub fn lookup_path<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(item, |current, segment| current.as_object()?.get(segment))
}

/// Render a scalar JSON value; null, blank strings and containers yield `None`
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn first_value(item: &Value, paths: &[String]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup_path(item, path).and_then(scalar_to_string))
}
