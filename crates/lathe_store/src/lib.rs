//! Storage collaborator for the lathe pipeline core.
//!
//! Every lathe component persists its state through the [`RecordStore`]
//! trait: named relations of JSON records with whole-record atomic
//! upserts and a deterministic scan order. The crate ships
//! [`MemoryStore`], a `BTreeMap`-backed implementation used by the test
//! suites and by embedders that do not need durability; the trait is
//! the seam for durable backends.

#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::MemoryStore;
pub use store::{Record, RecordStore};
