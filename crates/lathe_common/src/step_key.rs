//! The colon-delimited step key convention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A build step identifier of the form `namespace:generator:spec`.
///
/// The pipeline core treats step keys as opaque strings everywhere
/// except kind-scoped cache invalidation, which splits a key on ':'
/// and compares whole segments. `StepKey` builds well-formed keys and
/// centralizes that matching; [`has_segment`] does the same for raw
/// strings already in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepKey(String);

impl StepKey {
    /// Builds a key from its three conventional segments.
    pub fn new(namespace: &str, generator: &str, spec: &str) -> Self {
        Self(format!("{namespace}:{generator}:{spec}"))
    }

    /// Wraps an already-formatted key without validation.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The colon-delimited segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }

    /// Whether `name` equals one of the key's segments exactly.
    pub fn matches_segment(&self, name: &str) -> bool {
        has_segment(&self.0, name)
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<StepKey> for String {
    fn from(key: StepKey) -> Self {
        key.0
    }
}

/// Whether `name` equals one of `key`'s colon-delimited segments.
///
/// Matching is exact per segment: `"Gen"` matches `ns:Gen:spec1` but
/// never `ns:WidgetGen:spec1`. Substring containment is not segment
/// membership.
pub fn has_segment(key: &str, name: &str) -> bool {
    key.split(':').any(|segment| segment == name)
}
