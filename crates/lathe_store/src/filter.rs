//! Record filters for [`RecordStore`](crate::RecordStore) scans.

use serde_json::Value;

/// Predicate applied by [`find`](crate::RecordStore::find).
///
/// Filters are deliberately small: the lathe components only ever scan
/// whole relations or select on a single field's equality.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Matches every record.
    #[default]
    All,

    /// Matches records whose `field` is present and equal to `value`.
    FieldEq {
        /// Field name looked up on the record object.
        field: String,
        /// Value the field must equal.
        value: Value,
    },
}

impl Filter {
    /// Equality filter on a single record field.
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether `record` satisfies the filter.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::FieldEq { field, value } => record.get(field) == Some(value),
        }
    }
}
