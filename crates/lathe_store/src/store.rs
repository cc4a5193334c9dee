//! The record store trait.

use serde_json::Value;

use crate::error::StoreResult;
use crate::filter::Filter;

/// A single stored record: a JSON value, conventionally an object.
pub type Record = Value;

/// Keyed JSON records grouped into named relations.
///
/// The contract every implementation must honor:
///
/// - `put` replaces the whole record at `(relation, key)` atomically;
///   readers never observe a partial record.
/// - `find` returns records in ascending key order. Component behavior
///   such as route tie-breaking is deterministic only under that
///   ordering.
/// - Unknown relations read as empty; writing to one creates it.
pub trait RecordStore {
    /// Reads the record at `(relation, key)`, if present.
    fn get(&self, relation: &str, key: &str) -> StoreResult<Option<Record>>;

    /// Inserts or replaces the record at `(relation, key)`.
    fn put(&mut self, relation: &str, key: &str, record: Record) -> StoreResult<()>;

    /// Removes the record at `(relation, key)`; reports whether one existed.
    fn delete(&mut self, relation: &str, key: &str) -> StoreResult<bool>;

    /// Returns every record of `relation` matching `filter`, ascending by key.
    fn find(&self, relation: &str, filter: &Filter) -> StoreResult<Vec<Record>>;
}
