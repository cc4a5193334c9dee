//! Error types for manifest loading and registration.

/// Errors that can occur when loading, validating, or registering a
/// `lathe.toml` manifest.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the manifest file.
    #[error("failed to read manifest: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse manifest: {0}")]
    ParseError(String),

    /// An edge references a kind not declared under `[kinds]`.
    #[error("unknown kind '{0}' referenced by an edge")]
    UnknownKind(String),

    /// A required field is missing from the manifest.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A manifest value failed validation, or the kind graph rejected
    /// a declared edge.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The kind graph failed while registering declarations.
    #[error("failed to register manifest: {0}")]
    GraphError(#[from] lathe_graph::GraphError),
}
