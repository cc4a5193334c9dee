//! The build cache: skip generation steps whose inputs are unchanged.
//!
//! Callers hash generator inputs themselves and hand the cache opaque
//! hash strings keyed by step. `check` answers "can this step be
//! skipped", `record` stores the result of a step that ran, and the
//! invalidation operations flag entries as stale without ever deleting
//! them, so cache state is always inspectable after the fact.

#![warn(missing_docs)]

pub mod cache;
pub mod entry;
pub mod error;

pub use cache::BuildCache;
pub use entry::{CacheEntry, CheckOutcome, InvalidateOutcome};
pub use error::CacheError;
