//! The build cache component.
//!
//! `check` decides in a fixed precedence order: no entry, then the
//! caller's determinism flag, then the stale flag, then hash equality.
//! A stale entry with a matching hash is still `changed`; only
//! `record` clears staleness.

use chrono::Utc;
use lathe_common::step_key;
use lathe_store::{Filter, RecordStore};
use tracing::{debug, trace};

use crate::entry::{CacheEntry, CheckOutcome, InvalidateOutcome};
use crate::error::CacheError;

const ENTRIES_RELATION: &str = "entries";

/// Content-hash keyed cache of generation step results.
///
/// Entries are never deleted: every invalidation shape flags entries
/// stale and leaves them in place, so `status` always shows the full
/// history of what has ever been recorded.
pub struct BuildCache<S> {
    store: S,
}

impl<S: RecordStore> BuildCache<S> {
    /// Creates a cache over `store`.
    pub fn new(store: S) -> Self {
        BuildCache { store }
    }

    /// Decides whether the step identified by `step_key` must run.
    ///
    /// `deterministic` describes the step as the caller is about to run
    /// it; passing `false` forces a rerun whatever is stored. `check`
    /// never mutates cache state.
    pub fn check(
        &self,
        step_key: &str,
        input_hash: &str,
        deterministic: bool,
    ) -> Result<CheckOutcome, CacheError> {
        let entry = match self.load_entry(step_key)? {
            Some(entry) => entry,
            None => {
                trace!(step_key, "cache miss: never recorded");
                return Ok(CheckOutcome::Changed {
                    previous_hash: None,
                });
            }
        };
        if !deterministic {
            trace!(step_key, "cache miss: nondeterministic step");
            return Ok(CheckOutcome::Changed {
                previous_hash: Some(entry.input_hash),
            });
        }
        if entry.stale {
            trace!(step_key, "cache miss: entry is stale");
            return Ok(CheckOutcome::Changed {
                previous_hash: Some(entry.input_hash),
            });
        }
        if entry.input_hash != input_hash {
            trace!(step_key, "cache miss: input hash drift");
            return Ok(CheckOutcome::Changed {
                previous_hash: Some(entry.input_hash),
            });
        }
        trace!(step_key, "cache hit");
        Ok(CheckOutcome::Unchanged {
            last_run: entry.last_run,
            output_ref: entry.output_ref,
        })
    }

    /// Records the result of a step that ran.
    ///
    /// Whole-entry upsert: `last_run` is stamped with the current time
    /// and the stale flag is cleared. Returns the stored entry.
    pub fn record(
        &mut self,
        step_key: &str,
        input_hash: &str,
        output_hash: &str,
        output_ref: Option<&str>,
        source_locator: Option<&str>,
        deterministic: bool,
    ) -> Result<CacheEntry, CacheError> {
        let entry = CacheEntry {
            step_key: step_key.to_string(),
            input_hash: input_hash.to_string(),
            output_hash: output_hash.to_string(),
            output_ref: output_ref.map(str::to_string),
            source_locator: source_locator.map(str::to_string),
            deterministic,
            last_run: Utc::now(),
            stale: false,
        };
        self.store_entry(&entry)?;
        debug!(step_key, "cache entry recorded");
        Ok(entry)
    }

    /// Flags one entry stale. Unknown keys report
    /// [`InvalidateOutcome::NotFound`] and change nothing.
    pub fn invalidate(&mut self, step_key: &str) -> Result<InvalidateOutcome, CacheError> {
        match self.load_entry(step_key)? {
            Some(mut entry) => {
                entry.stale = true;
                self.store_entry(&entry)?;
                debug!(step_key, "cache entry invalidated");
                Ok(InvalidateOutcome::Invalidated)
            }
            None => Ok(InvalidateOutcome::NotFound),
        }
    }

    /// Flags every entry recorded from `source_locator` stale; returns
    /// the affected step keys.
    pub fn invalidate_by_source(
        &mut self,
        source_locator: &str,
    ) -> Result<Vec<String>, CacheError> {
        let flagged =
            self.flag_matching(|entry| entry.source_locator.as_deref() == Some(source_locator))?;
        debug!(source_locator, count = flagged.len(), "source invalidation swept");
        Ok(flagged)
    }

    /// Flags every entry whose step key carries `kind_name` as one of
    /// its colon-delimited segments; returns the affected step keys.
    ///
    /// Matching is exact per segment, so invalidating `"Gen"` leaves
    /// `ns:WidgetGen:spec1` alone.
    pub fn invalidate_by_kind(&mut self, kind_name: &str) -> Result<Vec<String>, CacheError> {
        let flagged =
            self.flag_matching(|entry| step_key::has_segment(&entry.step_key, kind_name))?;
        debug!(kind = kind_name, count = flagged.len(), "kind invalidation swept");
        Ok(flagged)
    }

    /// Flags every entry stale; returns how many were flagged.
    pub fn invalidate_all(&mut self) -> Result<usize, CacheError> {
        let flagged = self.flag_matching(|_| true)?;
        debug!(count = flagged.len(), "full cache invalidation");
        Ok(flagged.len())
    }

    /// Every entry with all fields, ascending by step key.
    pub fn status(&self) -> Result<Vec<CacheEntry>, CacheError> {
        self.store
            .find(ENTRIES_RELATION, &Filter::All)?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(CacheError::from))
            .collect()
    }

    /// Step keys of currently-stale entries, ascending.
    pub fn stale_steps(&self) -> Result<Vec<String>, CacheError> {
        let records = self
            .store
            .find(ENTRIES_RELATION, &Filter::field_eq("stale", true))?;
        records
            .into_iter()
            .map(|record| {
                let entry: CacheEntry = serde_json::from_value(record)?;
                Ok(entry.step_key)
            })
            .collect()
    }

    fn load_entry(&self, step_key: &str) -> Result<Option<CacheEntry>, CacheError> {
        match self.store.get(ENTRIES_RELATION, step_key)? {
            Some(record) => Ok(Some(serde_json::from_value(record)?)),
            None => Ok(None),
        }
    }

    fn store_entry(&mut self, entry: &CacheEntry) -> Result<(), CacheError> {
        self.store
            .put(ENTRIES_RELATION, &entry.step_key, serde_json::to_value(entry)?)?;
        Ok(())
    }

    fn flag_matching<F>(&mut self, matches: F) -> Result<Vec<String>, CacheError>
    where
        F: Fn(&CacheEntry) -> bool,
    {
        let records = self.store.find(ENTRIES_RELATION, &Filter::All)?;
        let mut flagged = Vec::new();
        for record in records {
            let mut entry: CacheEntry = serde_json::from_value(record)?;
            if matches(&entry) {
                entry.stale = true;
                self.store_entry(&entry)?;
                flagged.push(entry.step_key);
            }
        }
        Ok(flagged)
    }
}
