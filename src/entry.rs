//! Cache slot holding at most one key/value pair plus its recency stamp.
//!
//! Every slot is allocated when the cache is built and starts out *invalid*
//! (empty). The first write makes it valid; after that it is only ever
//! overwritten, never released.
//!
//! ```text
//!   CacheEntry<K, V>
//!   ┌──────────────────────────────┬─────────────┐
//!   │ pair: Option<(K, V)>         │ timestamp   │
//!   │   None     → invalid slot    │ u64 logical │
//!   │   Some(..) → valid slot      │ clock value │
//!   └──────────────────────────────┴─────────────┘
//! ```
//!
//! Evictors only receive shared references to entries, so they can read
//! [`timestamp`](CacheEntry::timestamp) and the key but cannot mutate a slot.

/// A single storage slot of a [`SetAssociativeCache`](crate::SetAssociativeCache).
///
/// # Example
///
/// ```
/// use setassoc::entry::CacheEntry;
///
/// let slot: CacheEntry<u64, &str> = CacheEntry::empty();
/// assert!(!slot.is_valid());
/// assert_eq!(slot.key(), None);
/// assert_eq!(slot.timestamp(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    pair: Option<(K, V)>,
    timestamp: u64,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates an invalid (empty) slot with timestamp `0`.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            pair: None,
            timestamp: 0,
        }
    }

    /// Returns `true` once a key/value pair has been written to this slot.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.pair.is_some()
    }

    /// Logical clock value of the last write or read hit.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.pair.as_ref().map(|(k, _)| k)
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.pair.as_ref().map(|(_, v)| v)
    }

    /// Returns the stored pair, or `None` for an invalid slot.
    #[inline]
    pub fn pair(&self) -> Option<(&K, &V)> {
        self.pair.as_ref().map(|(k, v)| (k, v))
    }

    /// Returns `true` if the slot is valid and holds a key equal to `key`.
    #[inline]
    pub fn holds(&self, key: &K) -> bool
    where
        K: Eq,
    {
        matches!(&self.pair, Some((k, _)) if k == key)
    }

    /// Overwrites key, value and timestamp; the slot becomes valid.
    ///
    /// Returns the pair that was displaced, if the slot was already valid.
    #[inline]
    pub(crate) fn update(&mut self, key: K, value: V, timestamp: u64) -> Option<(K, V)> {
        self.timestamp = timestamp;
        self.pair.replace((key, value))
    }

    /// Replaces only the value of a valid slot, keeping its key.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V, timestamp: u64) -> Option<V> {
        let (_, slot_value) = self.pair.as_mut()?;
        self.timestamp = timestamp;
        Some(std::mem::replace(slot_value, value))
    }

    #[inline]
    pub(crate) fn touch(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.pair.as_mut().map(|(_, v)| v)
    }
}

impl<K, V> Default for CacheEntry<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}
