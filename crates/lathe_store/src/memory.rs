//! In-memory record store.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::error::{StoreError, StoreResult};
use crate::filter::Filter;
use crate::store::{Record, RecordStore};

type Relations = BTreeMap<String, BTreeMap<String, Record>>;

/// A `BTreeMap`-backed [`RecordStore`].
///
/// Cloning yields another handle onto the same relations, so a graph, a
/// cache, and a plan can share one store the way they would share one
/// database. Scans come back in ascending key order for free.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    relations: Arc<RwLock<Relations>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, relation: &str, key: &str) -> StoreResult<Option<Record>> {
        let relations = self.relations.read().map_err(|_| StoreError::Poisoned)?;
        Ok(relations.get(relation).and_then(|r| r.get(key)).cloned())
    }

    fn put(&mut self, relation: &str, key: &str, record: Record) -> StoreResult<()> {
        let mut relations = self.relations.write().map_err(|_| StoreError::Poisoned)?;
        relations
            .entry(relation.to_string())
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    fn delete(&mut self, relation: &str, key: &str) -> StoreResult<bool> {
        let mut relations = self.relations.write().map_err(|_| StoreError::Poisoned)?;
        match relations.get_mut(relation) {
            Some(records) => Ok(records.remove(key).is_some()),
            None => Ok(false),
        }
    }

    fn find(&self, relation: &str, filter: &Filter) -> StoreResult<Vec<Record>> {
        let relations = self.relations.read().map_err(|_| StoreError::Poisoned)?;
        let records = match relations.get(relation) {
            Some(records) => records,
            None => return Ok(Vec::new()),
        };
        Ok(records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
