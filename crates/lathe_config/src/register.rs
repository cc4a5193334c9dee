//! Wiring a manifest into a kind graph.

use lathe_graph::{ConnectOutcome, KindGraph};
use lathe_store::RecordStore;

use crate::error::ConfigError;
use crate::types::PipelineManifest;

/// Registers every declared kind and edge of `manifest` into `graph`.
///
/// Kinds go first (name order), then edges in declaration order, so an
/// edge may reference any kind in the manifest. A declaration the
/// graph rejects, such as an edge that would close a cycle, surfaces
/// as [`ConfigError::ValidationError`] carrying the graph's message.
/// Registering the same manifest twice is harmless: kinds report
/// existing and edges upsert.
pub fn register_manifest<S: RecordStore>(
    manifest: &PipelineManifest,
    graph: &mut KindGraph<S>,
) -> Result<(), ConfigError> {
    for (name, decl) in &manifest.kinds {
        graph.define(name, &decl.category)?;
    }
    for edge in &manifest.edges {
        let outcome = graph.connect(
            &edge.from,
            &edge.to,
            &edge.relation,
            edge.transform.as_deref(),
        )?;
        if let ConnectOutcome::Invalid { message } = outcome {
            return Err(ConfigError::ValidationError(message));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_manifest_from_str;
    use lathe_store::MemoryStore;

    fn sample_manifest() -> PipelineManifest {
        load_manifest_from_str(
            r#"
[pipeline]
name = "widgets"

[kinds.ConceptSpec]
category = "source"

[kinds.SchemaArtifact]
category = "intermediate"

[[edges]]
from = "ConceptSpec"
to = "SchemaArtifact"
relation = "generates"
transform = "SchemaGen"
"#,
        )
        .unwrap()
    }

    #[test]
    fn registers_kinds_and_edges() {
        let manifest = sample_manifest();
        let mut graph = KindGraph::new(MemoryStore::new());
        register_manifest(&manifest, &mut graph).unwrap();
        let snapshot = graph.snapshot().unwrap();
        assert_eq!(snapshot.kinds.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].transform.as_deref(), Some("SchemaGen"));
    }

    #[test]
    fn reregistration_is_harmless() {
        let manifest = sample_manifest();
        let mut graph = KindGraph::new(MemoryStore::new());
        register_manifest(&manifest, &mut graph).unwrap();
        register_manifest(&manifest, &mut graph).unwrap();
        let snapshot = graph.snapshot().unwrap();
        assert_eq!(snapshot.kinds.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
    }

    #[test]
    fn cycle_in_manifest_surfaces_as_validation_error() {
        let manifest = load_manifest_from_str(
            r#"
[pipeline]
name = "cyclic"

[kinds.A]
category = "x"

[kinds.B]
category = "y"

[[edges]]
from = "A"
to = "B"
relation = "r"

[[edges]]
from = "B"
to = "A"
relation = "r"
"#,
        )
        .unwrap();
        let mut graph = KindGraph::new(MemoryStore::new());
        let err = register_manifest(&manifest, &mut graph).unwrap_err();
        match err {
            ConfigError::ValidationError(message) => assert!(message.contains("cycle")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
