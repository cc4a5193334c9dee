//! Run and step records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Well-known step status values, the ones summaries count.
///
/// The status field is an open string set; generators are free to
/// record anything ("skipped", "partial"). Only these three influence
/// the executed/cached/failed counts.
pub mod status {
    /// The step ran and succeeded.
    pub const DONE: &str = "done";
    /// The step was skipped because its cached result was fresh.
    pub const CACHED: &str = "cached";
    /// The step ran and failed.
    pub const FAILED: &str = "failed";
}

/// Unique identifier of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generates a fresh id: `run-` followed by a v4 UUID.
    pub fn generate() -> Self {
        RunId(format!("run-{}", Uuid::new_v4()))
    }

    /// Wraps an existing id, e.g. one read back from history.
    pub fn from_raw(id: impl Into<String>) -> Self {
        RunId(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Run identifier.
    pub id: RunId,
    /// When `begin` created the run.
    pub started_at: DateTime<Utc>,
    /// When `complete` stamped it, or `None` while active and forever
    /// after an abandoned run.
    pub completed_at: Option<DateTime<Utc>>,
}

/// The outcome of one step within a run.
///
/// Keyed by `(run, step_key)` in storage: re-recording a step within
/// the same run replaces the earlier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Run this record belongs to.
    pub run: RunId,
    /// Step identifier, conventionally `namespace:generator:spec`.
    pub step_key: String,
    /// Step status; see [`status`] for the counted values.
    pub status: String,
    /// How many files the step produced, 0 when unreported.
    pub files_produced: u64,
    /// How long the step took in milliseconds, 0 when unreported.
    pub duration_ms: u64,
    /// Whether the step was served from the build cache.
    pub cached: bool,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}

/// Outcome of [`begin`](crate::GenerationPlan::begin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A fresh run is now active.
    Started(Run),
    /// Another run is already active; nothing changed. Complete it
    /// before beginning the next one.
    AlreadyActive(RunId),
}

/// Outcome of [`record_step`](crate::GenerationPlan::record_step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStepOutcome {
    /// The record was written under the active run.
    Recorded(StepRecord),
    /// No run is active; nothing was written.
    NoActiveRun,
}

/// Outcome of [`complete`](crate::GenerationPlan::complete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The run is stamped complete and the active slot is clear.
    Completed(Run),
    /// No run was active.
    NoActiveRun,
}
