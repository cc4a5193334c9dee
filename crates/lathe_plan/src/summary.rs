//! Per-run aggregation.

use serde::{Deserialize, Serialize};

use crate::run::{status, Run, StepRecord};

/// Aggregated counts over one run's step records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// All step records of the run.
    pub total: u64,
    /// Records with status [`status::DONE`].
    pub executed: u64,
    /// Records with status [`status::CACHED`].
    pub cached: u64,
    /// Records with status [`status::FAILED`].
    pub failed: u64,
    /// Sum of step durations in milliseconds, across every record.
    pub total_duration_ms: u64,
    /// Sum of files produced, across every record.
    pub files_produced: u64,
}

impl RunSummary {
    /// Folds step records into counts.
    ///
    /// Statuses outside the well-known three contribute to `total` and
    /// the duration/file sums only.
    pub fn from_steps<'a, I>(steps: I) -> Self
    where
        I: IntoIterator<Item = &'a StepRecord>,
    {
        let mut summary = RunSummary::default();
        for step in steps {
            summary.total += 1;
            match step.status.as_str() {
                status::DONE => summary.executed += 1,
                status::CACHED => summary.cached += 1,
                status::FAILED => summary.failed += 1,
                _ => {}
            }
            summary.total_duration_ms += step.duration_ms;
            summary.files_produced += step.files_produced;
        }
        summary
    }
}

/// One run in [`history`](crate::GenerationPlan::history) output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The run itself, timestamps included.
    pub run: Run,
    /// Counts over the run's step records.
    pub summary: RunSummary,
}
