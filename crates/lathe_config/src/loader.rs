//! Manifest loading and validation.

use crate::error::ConfigError;
use crate::types::PipelineManifest;
use std::path::Path;

/// Loads and validates a `lathe.toml` manifest from a project directory.
///
/// Reads `<project_dir>/lathe.toml`, parses it, and validates shape.
pub fn load_manifest(project_dir: &Path) -> Result<PipelineManifest, ConfigError> {
    let manifest_path = project_dir.join("lathe.toml");
    let content = std::fs::read_to_string(&manifest_path)?;
    load_manifest_from_str(&content)
}

/// Parses and validates a `lathe.toml` manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_manifest_from_str(content: &str) -> Result<PipelineManifest, ConfigError> {
    let manifest: PipelineManifest =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validates required fields and the shape of declared edges.
///
/// Cycle detection is not done here; the kind graph enforces
/// acyclicity when the manifest is registered.
fn validate_manifest(manifest: &PipelineManifest) -> Result<(), ConfigError> {
    if manifest.pipeline.name.is_empty() {
        return Err(ConfigError::MissingField("pipeline.name".to_string()));
    }
    for (name, kind) in &manifest.kinds {
        if kind.category.is_empty() {
            return Err(ConfigError::MissingField(format!("kinds.{name}.category")));
        }
    }
    for edge in &manifest.edges {
        if edge.from == edge.to {
            return Err(ConfigError::ValidationError(format!(
                "edge '{}' -> '{}' is a self-loop",
                edge.from, edge.to
            )));
        }
        if !manifest.kinds.contains_key(&edge.from) {
            return Err(ConfigError::UnknownKind(edge.from.clone()));
        }
        if !manifest.kinds.contains_key(&edge.to) {
            return Err(ConfigError::UnknownKind(edge.to.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[pipeline]
name = "widgets"
"#;
        let manifest = load_manifest_from_str(toml).unwrap();
        assert_eq!(manifest.pipeline.name, "widgets");
        assert!(manifest.pipeline.description.is_empty());
        assert!(manifest.kinds.is_empty());
        assert!(manifest.edges.is_empty());
    }

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
[pipeline]
name = "widgets"
description = "generates widget schemas and docs"

[kinds.ConceptSpec]
category = "source"

[kinds.SchemaArtifact]
category = "intermediate"

[kinds.DocArtifact]
category = "target"

[[edges]]
from = "ConceptSpec"
to = "SchemaArtifact"
relation = "generates"
transform = "SchemaGen"

[[edges]]
from = "SchemaArtifact"
to = "DocArtifact"
relation = "documents"
"#;
        let manifest = load_manifest_from_str(toml).unwrap();
        assert_eq!(manifest.kinds.len(), 3);
        assert_eq!(manifest.kinds["ConceptSpec"].category, "source");
        assert_eq!(manifest.edges.len(), 2);
        assert_eq!(manifest.edges[0].transform.as_deref(), Some("SchemaGen"));
        assert!(manifest.edges[1].transform.is_none());
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[pipeline]
name = ""
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn empty_category_errors() {
        let toml = r#"
[pipeline]
name = "widgets"

[kinds.ConceptSpec]
category = ""
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn edge_with_undeclared_kind_errors() {
        let toml = r#"
[pipeline]
name = "widgets"

[kinds.ConceptSpec]
category = "source"

[[edges]]
from = "ConceptSpec"
to = "Ghost"
relation = "generates"
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        match err {
            ConfigError::UnknownKind(kind) => assert_eq!(kind, "Ghost"),
            other => panic!("expected unknown kind, got {other:?}"),
        }
    }

    #[test]
    fn self_loop_edge_errors() {
        let toml = r#"
[pipeline]
name = "widgets"

[kinds.ConceptSpec]
category = "source"

[[edges]]
from = "ConceptSpec"
to = "ConceptSpec"
relation = "loops"
"#;
        let err = load_manifest_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_manifest_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_manifest(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
