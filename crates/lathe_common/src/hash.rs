//! Content hashing for cache freshness decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 128-bit XXH3 hash of generator input content.
///
/// The build cache compares opaque hash strings and never reads files
/// itself, so whoever drives the pipeline hashes the spec or source
/// content and passes `hash.to_string()` into `check` and `record`.
/// Two inputs with the same `ContentHash` are treated as identical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes `content` with XXH3-128.
    pub fn of(content: impl AsRef<[u8]>) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(content.as_ref());
        Self(hash.to_le_bytes())
    }

    /// The 32-character lowercase hex form, as stored by the cache.
    pub fn hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ContentHash({:02x}{:02x}{:02x}{:02x}..)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
