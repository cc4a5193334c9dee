//! Generation plan errors.

use lathe_store::StoreError;
use thiserror::Error;

/// Failures surfaced by generation plan operations.
///
/// Lifecycle outcomes (a refused `begin`, a step dropped for want of
/// an active run) are enum values on the `Ok` path; only storage,
/// decoding, and integrity failures land here.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The record store failed.
    #[error("plan storage failure: {source}")]
    Store {
        /// Underlying store error.
        #[from]
        source: StoreError,
    },

    /// A stored record did not decode as its expected shape.
    #[error("malformed plan record: {reason}")]
    Codec {
        /// Decoder message.
        reason: String,
    },

    /// Stored plan state contradicts itself.
    #[error("inconsistent plan state: {reason}")]
    Inconsistent {
        /// What does not line up.
        reason: String,
    },
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Codec {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inconsistent_display_carries_reason() {
        let err = PlanError::Inconsistent {
            reason: "active slot points at unknown run 'run-x'".to_string(),
        };
        assert!(err.to_string().contains("run-x"));
    }
}
