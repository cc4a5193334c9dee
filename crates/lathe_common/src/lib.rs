//! Shared primitives for the lathe pipeline core.
//!
//! Two small conventions live here so every crate agrees on them: the
//! colon-delimited step key format ([`StepKey`]) and the content hash
//! callers feed the build cache ([`ContentHash`]). The core itself
//! never hashes content; the hash type exists for orchestrators and
//! tests that need realistic input hashes.

#![warn(missing_docs)]

pub mod hash;
pub mod step_key;

pub use hash::ContentHash;
pub use step_key::StepKey;
