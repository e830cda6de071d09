//! Result store: normalization of heterogeneous endpoint data
//!
//! Endpoint data may be a single object or an array, with nested register
//! records or flat aliases. A [`FieldMapping`] table drives extraction into
//! uniform [`ResultRow`]s so one lookup implementation serves every response
//! shape.

mod dates;
mod mapping;
mod normalize;
mod row;

pub use dates::{ZERO_DATE, format_effective_date};
pub use mapping::{FieldMapping, FieldSpec, NOT_AVAILABLE, RowIdStrategy, lookup_path, scalar_to_string};
pub use normalize::normalize;
pub use row::{ResultRow, format_identifier};
