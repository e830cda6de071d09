//! Normalization of raw endpoint data into [`ResultRow`]s

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use super::dates::format_effective_date;
use super::mapping::{FieldMapping, FieldSpec, NOT_AVAILABLE, RowIdStrategy};
use super::row::ResultRow;

/// Normalize `raw` into rows using `mapping`
///
/// * `null`, `false`, empty strings and empty arrays produce no rows.
/// * A single object is treated as a one-element collection.
/// * Array elements that are not objects carry no fields and are skipped;
///   ids stay dense over the rows actually produced.
#[must_use]
pub fn normalize(raw: &Value, mapping: &FieldMapping, ids: RowIdStrategy) -> Vec<ResultRow> {
    let items: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![raw],
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            if is_truthy_scalar(raw) {
                debug!("Ignoring scalar search data that cannot be normalized");
            }
            Vec::new()
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    let mut used_ids = HashSet::new();

    for item in items {
        if !item.is_object() {
            debug!("Skipping non-object search result element");
            continue;
        }

        let index = rows.len();
        let identifier_number = text_field(&mapping.identifier_number, item);
        let id = row_id(ids, index, &identifier_number, &mut used_ids);

        rows.push(ResultRow {
            id,
            identifier_number,
            entity_name: text_field(&mapping.entity_name, item),
            entity_status: dated_field(&mapping.entity_status, item),
            entity_type: text_field(&mapping.entity_type, item),
            tax_registration_status: dated_field(&mapping.tax_registration_status, item),
            business_location: text_field(&mapping.business_location, item),
            raw_data: item.clone(),
        });
    }

    rows
}

fn text_field(spec: &FieldSpec, item: &Value) -> String {
    spec.extract(item).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Value with an optional `from <date>` suffix
///
/// With a `dated_label`, a usable date replaces the value entirely
/// (`Registered from 01 Jul 2000`). Without one, the suffix is only added when
/// a value exists.
fn dated_field(spec: &FieldSpec, item: &Value) -> String {
    let value = spec.extract(item);
    let date = spec
        .extract_date(item)
        .and_then(|raw| format_effective_date(&raw));

    match (&spec.dated_label, value, date) {
        (Some(label), _, Some(date)) => format!("{label} from {date}"),
        (None, Some(value), Some(date)) => format!("{value} from {date}"),
        (_, Some(value), None) => value,
        (_, None, _) => NOT_AVAILABLE.to_string(),
    }
}

fn row_id(
    strategy: RowIdStrategy,
    index: usize,
    identifier: &str,
    used: &mut HashSet<String>,
) -> String {
    let positional = || format!("result-{index}");

    let id = match strategy {
        RowIdStrategy::Positional => positional(),
        RowIdStrategy::BusinessKey => {
            if identifier != NOT_AVAILABLE && !used.contains(identifier) {
                identifier.to_string()
            } else {
                positional()
            }
        }
    };

    used.insert(id.clone());
    id
}

fn is_truthy_scalar(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}
