//! Kind graph errors.

use lathe_store::StoreError;
use thiserror::Error;

/// Failures surfaced by kind graph operations.
///
/// Domain outcomes such as a rejected edge are not errors; they are
/// [`ConnectOutcome`](crate::ConnectOutcome) values. Only storage and
/// decoding failures land here.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The record store failed.
    #[error("graph storage failure: {source}")]
    Store {
        /// Underlying store error.
        #[from]
        source: StoreError,
    },

    /// A stored record did not decode as its expected shape.
    #[error("malformed graph record: {reason}")]
    Codec {
        /// Decoder message.
        reason: String,
    },
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Codec {
            reason: err.to_string(),
        }
    }
}
