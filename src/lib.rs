//! setassoc: a fixed-capacity, set-associative in-memory cache.
//!
//! Slots are split into equal sets; a key's hash tag selects one set and all
//! work for that key stays inside it. Victim selection ([`policy`]) and key
//! hashing ([`hash`]) are pluggable strategies.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod cache;
pub mod entry;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{CacheConfig, CacheGeometry, SetAssociativeCacheBuilder};
pub use crate::cache::{SetAssociativeCache, SetRange};
pub use crate::error::{ConfigError, ContractViolationError, InvariantError};
pub use crate::metrics::snapshot::SetAssociativeMetricsSnapshot;
