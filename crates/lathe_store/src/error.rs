//! Error type shared by all record store implementations.

use thiserror::Error;

/// Result alias for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a record store backend.
///
/// Components treat these as opaque: a failing store call aborts the
/// component operation and the error propagates unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not read or write a record.
    #[error("storage backend failure in relation '{relation}': {reason}")]
    Backend {
        /// Relation the failing operation addressed.
        relation: String,
        /// Backend-specific description of the failure.
        reason: String,
    },

    /// A lock guarding shared store state was poisoned by a panic.
    #[error("store lock poisoned")]
    Poisoned,
}
