//! The kind graph: what produces what in a generation pipeline.
//!
//! Kinds are named categories of build products ("ConceptSpec",
//! "SchemaArtifact"); edges are directed, relation-labeled production
//! steps between them, optionally naming the transform that performs
//! the step. The graph stays acyclic by construction: `connect`
//! rejects any edge that would close a directed cycle. On top of that
//! sit shortest-path routing, direct-adjacency validation, and the
//! transitive impact query that drives cascading cache invalidation.

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod model;

mod traverse;

pub use error::GraphError;
pub use graph::KindGraph;
pub use model::{
    ConnectOutcome, Consumer, DefineOutcome, Edge, GraphSnapshot, Hop, Kind, Producer,
    RouteOutcome, ValidateOutcome,
};
