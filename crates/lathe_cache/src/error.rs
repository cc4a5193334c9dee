//! Build cache errors.

use lathe_store::StoreError;
use thiserror::Error;

/// Failures surfaced by build cache operations.
///
/// Freshness decisions and invalidation results are
/// [`CheckOutcome`](crate::CheckOutcome) and
/// [`InvalidateOutcome`](crate::InvalidateOutcome) values, never
/// errors; only storage and decoding failures land here.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The record store failed.
    #[error("cache storage failure: {source}")]
    Store {
        /// Underlying store error.
        #[from]
        source: StoreError,
    },

    /// A stored entry did not decode as a cache entry.
    #[error("malformed cache entry: {reason}")]
    Codec {
        /// Decoder message.
        reason: String,
    },
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Codec {
            reason: err.to_string(),
        }
    }
}
