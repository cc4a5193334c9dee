//! The generation plan: a ledger of pipeline runs.
//!
//! One run is active at a time, tracked by a persisted slot rather
//! than process state, so a plan reopened over the same store resumes
//! where the last one stood. Step records land under the active run
//! keyed by step, summaries count them by status, and history reads
//! back past runs newest first. Runs are never deleted; a run that
//! never completed stays visibly incomplete, which is how crashed
//! passes show up.

#![warn(missing_docs)]

pub mod error;
pub mod plan;
pub mod run;
pub mod summary;

pub use error::PlanError;
pub use plan::{GenerationPlan, DEFAULT_HISTORY_LIMIT};
pub use run::{status, BeginOutcome, CompleteOutcome, RecordStepOutcome, Run, RunId, StepRecord};
pub use summary::{HistoryEntry, RunSummary};
