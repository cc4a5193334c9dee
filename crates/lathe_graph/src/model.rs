//! Graph records and operation outcomes.

use serde::{Deserialize, Serialize};

/// A named category of build products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kind {
    /// Unique kind name, e.g. `"SchemaArtifact"`.
    pub name: String,
    /// Free-form caller vocabulary, e.g. `"source"` or `"target"`.
    /// Immutable after the first `define`.
    pub category: String,
}

/// A directed production step between two kinds.
///
/// Identity is the full `(from, to, relation)` triple: parallel edges
/// between the same pair under different relations are independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Kind consumed by the step.
    pub from: String,
    /// Kind produced by the step.
    pub to: String,
    /// Relation label, e.g. `"generates"`.
    pub relation: String,
    /// Transform performing the step, when one is known.
    pub transform: Option<String>,
}

impl Edge {
    /// Storage key: the identity triple joined with ':'.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.from, self.to, self.relation)
    }
}

/// One step of a route: the kind arrived at, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// Kind this hop arrives at.
    pub kind: String,
    /// Relation travelled.
    pub relation: String,
    /// Transform performing the step, if the edge names one.
    pub transform: Option<String>,
}

/// An incoming edge seen from the produced kind's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    /// Upstream kind the production step consumes.
    pub kind: String,
    /// Relation label of the edge.
    pub relation: String,
    /// Transform performing the step, if named.
    pub transform: Option<String>,
}

/// An outgoing edge seen from the consumed kind's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    /// Downstream kind the step produces.
    pub kind: String,
    /// Relation label of the edge.
    pub relation: String,
    /// Transform performing the step, if named.
    pub transform: Option<String>,
}

/// Full dump of the graph: every kind and every edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    /// All kinds, ascending by name.
    pub kinds: Vec<Kind>,
    /// All edges, ascending by storage key.
    pub edges: Vec<Edge>,
}

/// Outcome of [`define`](crate::KindGraph::define).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineOutcome {
    /// First registration; the kind is now stored.
    Defined(Kind),
    /// The name was already registered; the stored kind is returned
    /// unchanged.
    Exists(Kind),
}

/// Outcome of [`connect`](crate::KindGraph::connect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The edge was inserted (or an existing triple upserted).
    Connected(Edge),
    /// The edge was rejected; nothing changed.
    Invalid {
        /// Why the edge was rejected.
        message: String,
    },
}

/// Outcome of [`route`](crate::KindGraph::route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A shortest path, one hop per edge travelled. Empty when routing
    /// a kind to itself.
    Path(Vec<Hop>),
    /// No directed path exists.
    Unreachable,
}

/// Outcome of [`validate`](crate::KindGraph::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// At least one direct edge connects the pair.
    Valid,
    /// No direct edge; transitive reachability does not count.
    Invalid {
        /// Why the pair is invalid.
        message: String,
    },
}
