//! # Cache Read-Side Trait
//!
//! A set-associative cache has no arbitrary removal and a fallible `put`, so
//! it does not fit a general `insert -> Option<V>` cache interface. What every
//! cache shape *does* share is the side-effect-free read surface below, which
//! lets monitoring and warm-up code stay generic over evictor and hash choices.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │          ReadOnlyCache<K, V>            │
//!   │                                         │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! None of these methods touch hit/miss counters or timestamps.

/// Side-effect-free queries shared by all cache configurations.
///
/// # Example
///
/// ```
/// use setassoc::traits::ReadOnlyCache;
/// use setassoc::SetAssociativeCache;
///
/// fn fill_ratio<C: ReadOnlyCache<u64, u64>>(cache: &C) -> f64 {
///     cache.len() as f64 / cache.capacity() as f64
/// }
///
/// let mut cache = SetAssociativeCache::<u64, u64>::try_new(8, 2)?;
/// assert_eq!(fill_ratio(&cache), 0.0);
///
/// cache.put(1, 1)?;
/// cache.put(2, 2)?;
/// assert_eq!(fill_ratio(&cache), 0.25);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is currently cached.
    fn contains(&self, key: &K) -> bool;

    /// Number of occupied slots.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots.
    fn capacity(&self) -> usize;
}
