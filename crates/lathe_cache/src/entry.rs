//! Cache entry records and operation outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The recorded result of one generation step.
///
/// Keyed by `step_key` in storage; an entry is upserted whole by
/// `record` and only ever mutated by the stale flag afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Step identifier, conventionally `namespace:generator:spec`.
    pub step_key: String,
    /// Hash of the inputs the step consumed, as supplied by the caller.
    pub input_hash: String,
    /// Hash of what the step produced.
    pub output_hash: String,
    /// Where the output landed (a path or artifact id), if the caller
    /// tracks one.
    pub output_ref: Option<String>,
    /// The source the inputs came from, for source-scoped invalidation.
    pub source_locator: Option<String>,
    /// Whether the step claims to produce identical output for
    /// identical input. Recorded for provenance; `check` trusts the
    /// flag passed on the call.
    pub deterministic: bool,
    /// When the step last ran and was recorded.
    pub last_run: DateTime<Utc>,
    /// Whether the entry has been invalidated since it was recorded.
    pub stale: bool,
}

/// Outcome of [`check`](crate::BuildCache::check).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The step must run. `previous_hash` is the stored input hash, or
    /// `None` when the step has never been recorded.
    Changed {
        /// Input hash from the existing entry, if any.
        previous_hash: Option<String>,
    },
    /// The step can be skipped; the cached output stands.
    Unchanged {
        /// When the cached result was recorded.
        last_run: DateTime<Utc>,
        /// Where the cached output lives, if tracked.
        output_ref: Option<String>,
    },
}

/// Outcome of [`invalidate`](crate::BuildCache::invalidate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidateOutcome {
    /// The entry is now flagged stale.
    Invalidated,
    /// No entry exists for the step key; nothing changed.
    NotFound,
}
