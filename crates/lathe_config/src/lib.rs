//! Pipeline manifests: declaring kinds and edges in `lathe.toml`.
//!
//! A manifest names the pipeline, declares its artifact kinds under
//! `[kinds.<Name>]`, and lists production edges under `[[edges]]`.
//! Loading validates shape (required fields, declared endpoints, no
//! self-loops); [`register_manifest`] then feeds the declarations into
//! a [`KindGraph`](lathe_graph::KindGraph), where cycle rejection and
//! the other insert-time checks apply.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod register;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_manifest, load_manifest_from_str};
pub use register::register_manifest;
pub use types::{EdgeDecl, KindDecl, PipelineManifest, PipelineMeta};
