//! Manifest types deserialized from `lathe.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level pipeline manifest parsed from `lathe.toml`.
#[derive(Debug, Deserialize)]
pub struct PipelineManifest {
    /// Pipeline metadata (name, description).
    pub pipeline: PipelineMeta,
    /// Declared artifact kinds, keyed by kind name.
    #[serde(default)]
    pub kinds: BTreeMap<String, KindDecl>,
    /// Declared production edges, in declaration order.
    #[serde(default)]
    pub edges: Vec<EdgeDecl>,
}

/// Pipeline metadata required in every `lathe.toml`.
#[derive(Debug, Deserialize)]
pub struct PipelineMeta {
    /// The pipeline name.
    pub name: String,
    /// A brief description of what the pipeline generates.
    #[serde(default)]
    pub description: String,
}

/// One artifact kind declaration, `[kinds.<Name>]`.
#[derive(Debug, Clone, Deserialize)]
pub struct KindDecl {
    /// Free-form category, e.g. `"source"`, `"intermediate"`,
    /// `"target"`.
    pub category: String,
}

/// One production edge declaration, `[[edges]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDecl {
    /// Kind the step consumes.
    pub from: String,
    /// Kind the step produces.
    pub to: String,
    /// Relation label, e.g. `"generates"`.
    pub relation: String,
    /// Generator that performs the step.
    #[serde(default)]
    pub transform: Option<String>,
}
