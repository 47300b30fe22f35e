//! Error types for the setassoc library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache geometry is invalid (capacity not
//!   an exact multiple of the set width).
//! - [`ContractViolationError`]: Returned by `put` when a supplied evictor
//!   picks a victim outside the set being evicted.
//! - [`InvariantError`]: Returned by `check_invariants` when the slot array
//!   disagrees with the cache's bookkeeping.
//!
//! ## Example Usage
//!
//! ```
//! use setassoc::error::ConfigError;
//! use setassoc::SetAssociativeCache;
//!
//! let cache: Result<SetAssociativeCache<u64, i32>, ConfigError> =
//!     SetAssociativeCache::try_new(64, 4);
//! assert!(cache.is_ok());
//!
//! // 10 slots cannot be split into sets of 4
//! let bad = SetAssociativeCache::<u64, i32>::try_new(10, 4);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheConfig::validate`](crate::builder::CacheConfig::validate)
/// and every constructor that goes through it. No slots are allocated when
/// this error is returned.
///
/// # Example
///
/// ```
/// use setassoc::SetAssociativeCache;
///
/// let err = SetAssociativeCache::<u64, u64>::try_new(1, 2).unwrap_err();
/// assert!(err.to_string().contains("multiple"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// ContractViolationError
// ---------------------------------------------------------------------------

/// Error returned when an [`Evictor`](crate::policy::Evictor) selects a slot
/// outside the inclusive range `[start, end]` it was asked to choose from.
///
/// This signals a broken strategy implementation rather than a data
/// condition. The cache never clamps the index; the failed `put` leaves every
/// slot untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractViolationError {
    index: usize,
    start: usize,
    end: usize,
}

impl ContractViolationError {
    /// Creates a new error for the victim `index` returned for set `[start, end]`.
    #[inline]
    pub fn new(index: usize, start: usize, end: usize) -> Self {
        Self { index, start, end }
    }

    /// The out-of-range index the evictor returned.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// First slot of the set that was being evicted.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last slot (inclusive) of the set that was being evicted.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Display for ContractViolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "evictor returned slot {} but must return a value in [{}, {}]",
            self.index, self.start, self.end
        )
    }
}

impl std::error::Error for ContractViolationError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by
/// [`SetAssociativeCache::check_invariants`](crate::cache::SetAssociativeCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
