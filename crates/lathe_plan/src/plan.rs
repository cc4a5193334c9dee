//! The generation plan component.

use chrono::Utc;
use lathe_store::{Filter, RecordStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::PlanError;
use crate::run::{BeginOutcome, CompleteOutcome, RecordStepOutcome, Run, RunId, StepRecord};
use crate::summary::{HistoryEntry, RunSummary};

const RUN_RELATION: &str = "run";
const STEP_RELATION: &str = "step";
const ACTIVE_RELATION: &str = "active";
const ACTIVE_KEY: &str = "current";

/// Conventional history depth when a caller has no better idea.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// The single-slot pointer at the currently active run.
#[derive(Debug, Serialize, Deserialize)]
struct ActiveSlot {
    run: RunId,
}

/// Ledger of generation runs and their step records.
///
/// All state lives in the record store, including which run is active,
/// so the ledger survives the process that wrote it.
pub struct GenerationPlan<S> {
    store: S,
}

impl<S: RecordStore> GenerationPlan<S> {
    /// Creates a plan ledger over `store`.
    pub fn new(store: S) -> Self {
        GenerationPlan { store }
    }

    /// Starts a run and makes it the active one.
    ///
    /// Refused while another run is active: the prior run would
    /// otherwise be orphaned without a trace. Callers see
    /// [`BeginOutcome::AlreadyActive`] with the blocking run's id and
    /// decide for themselves whether to `complete` it.
    pub fn begin(&mut self) -> Result<BeginOutcome, PlanError> {
        if let Some(active) = self.active_run()? {
            debug!(run = active.as_str(), "begin refused: run already active");
            return Ok(BeginOutcome::AlreadyActive(active));
        }
        let run = Run {
            id: RunId::generate(),
            started_at: Utc::now(),
            completed_at: None,
        };
        self.store
            .put(RUN_RELATION, run.id.as_str(), serde_json::to_value(&run)?)?;
        let slot = ActiveSlot {
            run: run.id.clone(),
        };
        self.store
            .put(ACTIVE_RELATION, ACTIVE_KEY, serde_json::to_value(&slot)?)?;
        debug!(run = run.id.as_str(), "run started");
        Ok(BeginOutcome::Started(run))
    }

    /// Records the outcome of one step under the active run.
    ///
    /// With no active run nothing is written and nothing fails; steps
    /// reported outside a run are deliberately dropped rather than
    /// attributed to an invented one. Unreported counters normalize to
    /// zero. Re-recording a step key within the same run replaces the
    /// earlier record.
    pub fn record_step(
        &mut self,
        step_key: &str,
        status: &str,
        files_produced: Option<u64>,
        duration_ms: Option<u64>,
        cached: bool,
    ) -> Result<RecordStepOutcome, PlanError> {
        let run_id = match self.active_run()? {
            Some(run_id) => run_id,
            None => {
                trace!(step_key, "step record dropped: no active run");
                return Ok(RecordStepOutcome::NoActiveRun);
            }
        };
        let record = StepRecord {
            run: run_id.clone(),
            step_key: step_key.to_string(),
            status: status.to_string(),
            files_produced: files_produced.unwrap_or(0),
            duration_ms: duration_ms.unwrap_or(0),
            cached,
            recorded_at: Utc::now(),
        };
        let key = format!("{}:{}", run_id.as_str(), step_key);
        self.store
            .put(STEP_RELATION, &key, serde_json::to_value(&record)?)?;
        trace!(run = run_id.as_str(), step_key, status, "step recorded");
        Ok(RecordStepOutcome::Recorded(record))
    }

    /// Stamps the active run complete and clears the active slot.
    pub fn complete(&mut self) -> Result<CompleteOutcome, PlanError> {
        let run_id = match self.active_run()? {
            Some(run_id) => run_id,
            None => return Ok(CompleteOutcome::NoActiveRun),
        };
        let mut run = self.load_run(&run_id)?;
        run.completed_at = Some(Utc::now());
        self.store
            .put(RUN_RELATION, run.id.as_str(), serde_json::to_value(&run)?)?;
        self.store.delete(ACTIVE_RELATION, ACTIVE_KEY)?;
        debug!(run = run.id.as_str(), "run completed");
        Ok(CompleteOutcome::Completed(run))
    }

    /// The currently active run, if any.
    pub fn active_run(&self) -> Result<Option<RunId>, PlanError> {
        match self.store.get(ACTIVE_RELATION, ACTIVE_KEY)? {
            Some(record) => {
                let slot: ActiveSlot = serde_json::from_value(record)?;
                Ok(Some(slot.run))
            }
            None => Ok(None),
        }
    }

    /// Every step record of `run`, ascending by step key.
    ///
    /// Unknown runs read as empty, the same as a run that recorded
    /// nothing.
    pub fn status(&self, run: &RunId) -> Result<Vec<StepRecord>, PlanError> {
        self.store
            .find(STEP_RELATION, &Filter::field_eq("run", run.as_str()))?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(PlanError::from))
            .collect()
    }

    /// Counts over `run`'s step records.
    pub fn summary(&self, run: &RunId) -> Result<RunSummary, PlanError> {
        Ok(RunSummary::from_steps(&self.status(run)?))
    }

    /// Up to `limit` runs, newest `started_at` first (run id breaks
    /// ties), each with its summary counts.
    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, PlanError> {
        let mut runs = self
            .store
            .find(RUN_RELATION, &Filter::All)?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(PlanError::from))
            .collect::<Result<Vec<Run>, _>>()?;
        runs.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| b.id.as_str().cmp(a.id.as_str()))
        });
        runs.truncate(limit);
        runs.into_iter()
            .map(|run| {
                let summary = self.summary(&run.id)?;
                Ok(HistoryEntry { run, summary })
            })
            .collect()
    }

    fn load_run(&self, run_id: &RunId) -> Result<Run, PlanError> {
        match self.store.get(RUN_RELATION, run_id.as_str())? {
            Some(record) => Ok(serde_json::from_value(record)?),
            None => Err(PlanError::Inconsistent {
                reason: format!("active slot points at unknown run '{run_id}'"),
            }),
        }
    }
}
