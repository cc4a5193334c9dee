//! Conformance test helpers for the lathe pipeline core.
//!
//! Provides a fully wired pipeline (kind graph, build cache and
//! generation plan over one shared in-memory store) plus a pass driver
//! that consults the components the way an orchestrator would, for
//! assertion in integration tests.

#![warn(missing_docs)]

use lathe_cache::{BuildCache, CheckOutcome};
use lathe_common::ContentHash;
use lathe_config::{load_manifest_from_str, register_manifest};
use lathe_graph::KindGraph;
use lathe_plan::{status, BeginOutcome, CompleteOutcome, GenerationPlan, Run};
use lathe_store::MemoryStore;

/// The three pipeline components wired over one shared in-memory store.
pub struct Pipeline {
    /// The shared backing store; clone it to open more component views.
    pub store: MemoryStore,
    /// Kind graph over the shared store.
    pub graph: KindGraph<MemoryStore>,
    /// Build cache over the shared store.
    pub cache: BuildCache<MemoryStore>,
    /// Generation plan over the shared store.
    pub plan: GenerationPlan<MemoryStore>,
}

/// Result of driving one generation pass through the pipeline.
pub struct PassResult {
    /// The completed run record.
    pub run: Run,
    /// Step keys that ran because the cache reported a change, in pass order.
    pub executed: Vec<String>,
    /// Step keys skipped because the cache was still valid, in pass order.
    pub skipped: Vec<String>,
}

/// Creates an empty pipeline over a fresh in-memory store.
pub fn fresh_pipeline() -> Pipeline {
    let store = MemoryStore::new();
    Pipeline {
        graph: KindGraph::new(store.clone()),
        cache: BuildCache::new(store.clone()),
        plan: GenerationPlan::new(store.clone()),
        store,
    }
}

/// Manifest text for a three-stage pipeline: spec -> module -> artifact.
pub fn sample_manifest() -> &'static str {
    r#"
[pipeline]
name = "sample"
description = "three-stage conformance pipeline"

[kinds.spec]
category = "source"

[kinds.module]
category = "intermediate"

[kinds.artifact]
category = "output"

[[edges]]
from = "spec"
to = "module"
relation = "generates"
transform = "SpecLower"

[[edges]]
from = "module"
to = "artifact"
relation = "emits"
transform = "ArtifactEmit"
"#
}

/// Creates a pipeline with [`sample_manifest`] already registered.
pub fn sample_pipeline() -> Pipeline {
    let mut pipeline = fresh_pipeline();
    let manifest = load_manifest_from_str(sample_manifest()).unwrap();
    register_manifest(&manifest, &mut pipeline.graph).unwrap();
    pipeline
}

/// Content hash of `input` in the hex form the cache stores.
pub fn hash_of(input: &str) -> String {
    ContentHash::of(input).hex()
}

/// Drives one generation pass over `steps`, each `(step key, input text)`.
///
/// Begins a run, checks every step against the cache, records results
/// for the steps that ran, reports every step to the plan, and
/// completes the run. Panics when a run is already active; conformance
/// scenarios always complete what they begin.
pub fn run_pass(pipeline: &mut Pipeline, steps: &[(&str, &str)]) -> PassResult {
    let started = match pipeline.plan.begin().unwrap() {
        BeginOutcome::Started(run) => run,
        BeginOutcome::AlreadyActive(id) => panic!("run {id} is still active"),
    };

    let mut executed = Vec::new();
    let mut skipped = Vec::new();
    for (step_key, input) in steps {
        let input_hash = hash_of(input);
        match pipeline.cache.check(step_key, &input_hash, true).unwrap() {
            CheckOutcome::Changed { .. } => {
                let output_hash = hash_of(&format!("generated from {input}"));
                pipeline
                    .cache
                    .record(step_key, &input_hash, &output_hash, None, None, true)
                    .unwrap();
                pipeline
                    .plan
                    .record_step(step_key, status::DONE, Some(1), Some(5), false)
                    .unwrap();
                executed.push(step_key.to_string());
            }
            CheckOutcome::Unchanged { .. } => {
                pipeline
                    .plan
                    .record_step(step_key, status::CACHED, None, None, true)
                    .unwrap();
                skipped.push(step_key.to_string());
            }
        }
    }

    let run = match pipeline.plan.complete().unwrap() {
        CompleteOutcome::Completed(run) => run,
        CompleteOutcome::NoActiveRun => panic!("run {} vanished mid-pass", started.id),
    };

    PassResult {
        run,
        executed,
        skipped,
    }
}
