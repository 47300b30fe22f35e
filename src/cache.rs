//! Set-associative cache engine.
//!
//! A fixed array of slots is split into equal, contiguous *sets*. A key's
//! hash tag picks exactly one set; lookups and inserts only ever scan that
//! set, so the worst case is bounded by the set width, not the capacity.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                  SetAssociativeCache<K, V, E, H> Layout                  │
//! │                                                                          │
//! │   key ──► HashGenerator H ──► tag: i64                                   │
//! │                                  │                                       │
//! │                                  ▼                                       │
//! │          normalized = tag.rem_euclid(capacity)                           │
//! │          start      = normalized - normalized % lines_per_set            │
//! │          end        = start + lines_per_set - 1                          │
//! │                                  │                                       │
//! │                                  ▼                                       │
//! │   entries: Box<[CacheEntry<K, V>]>     (capacity = 8, lines_per_set = 4) │
//! │   ┌────┬────┬────┬────┬────┬────┬────┬────┐                              │
//! │   │ s0 │ s1 │ s2 │ s3 │ s4 │ s5 │ s6 │ s7 │                              │
//! │   └────┴────┴────┴────┴────┴────┴────┴────┘                              │
//! │   └────── set 0 ──────┘└────── set 1 ──────┘                             │
//! │                                                                          │
//! │   full set + new key ──► Evictor E::evict(entries, start, end) ──► slot  │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time                  | Side effects                         |
//! |---------------|-----------------------|--------------------------------------|
//! | `get`         | O(lines_per_set)      | hit/miss counter, timestamp on hit   |
//! | `put`         | O(lines_per_set)*     | update, fill a free slot, or evict   |
//! | `peek`        | O(lines_per_set)      | none                                 |
//! | `contains`    | O(lines_per_set)      | none                                 |
//! | `clear_stats` | O(1)                  | zeroes counters, keeps entries       |
//!
//! *plus the evictor's own cost when the set is full.
//!
//! ## Recency Clock
//!
//! Timestamps come from a logical `u64` clock that advances once per write
//! and once per read hit. Every stamped slot therefore has a distinct value
//! and LRU/MRU never fall back to index order among touched entries.
//!
//! ## Example Usage
//!
//! ```
//! use setassoc::SetAssociativeCache;
//!
//! // 4 slots, 2 per set: integer keys tag as themselves, so 0, 1 and 4 share set 0
//! let mut cache = SetAssociativeCache::<i32, &str>::try_new(4, 2)?;
//!
//! cache.put(0, "Test")?;
//! cache.put(1, "Test2")?;
//! cache.put(4, "Test3")?; // set 0 is full, LRU evicts key 0
//!
//! assert_eq!(cache.get(&0), None);
//! assert_eq!(cache.get(&4), Some(&"Test3"));
//! assert_eq!(cache.get(&1), Some(&"Test2"));
//! assert_eq!(cache.get(&2), None);
//!
//! assert_eq!((cache.hits(), cache.misses(), cache.evictions()), (2, 2, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Every operation that touches counters or timestamps
//! takes `&mut self`; share across threads behind an external lock.

use std::fmt;
use std::hash::Hash;
use std::ops::RangeInclusive;

use tracing::{debug, error, trace};

use crate::builder::{CacheConfig, CacheGeometry, SetAssociativeCacheBuilder};
use crate::entry::CacheEntry;
use crate::error::{ConfigError, ContractViolationError, InvariantError};
use crate::hash::{GenericHashGenerator, HashGenerator};
use crate::metrics::metrics_impl::SetAssociativeMetrics;
use crate::metrics::snapshot::SetAssociativeMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
use crate::policy::{Evictor, LruEvictor};
use crate::traits::ReadOnlyCache;

// ---------------------------------------------------------------------------
// SetRange
// ---------------------------------------------------------------------------

/// Inclusive slot range `[start, end]` of one set.
///
/// # Example
///
/// ```
/// use setassoc::cache::SetRange;
///
/// let range = SetRange::for_tag(13, 8, 4);
/// assert_eq!((range.start(), range.end()), (4, 7));
///
/// // negative tags wrap instead of producing a negative index
/// let range = SetRange::for_tag(-1, 8, 4);
/// assert_eq!((range.start(), range.end()), (4, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetRange {
    start: usize,
    end: usize,
}

impl SetRange {
    /// Folds `tag` into one of the `capacity / lines_per_set` sets.
    ///
    /// `capacity` must be a positive multiple of `lines_per_set` that fits in
    /// an `i64`; [`CacheConfig::validate`] guarantees both.
    #[inline]
    pub fn for_tag(tag: i64, capacity: usize, lines_per_set: usize) -> Self {
        debug_assert!(lines_per_set > 0 && capacity % lines_per_set == 0);
        let normalized = tag.rem_euclid(capacity as i64) as usize;
        let start = normalized - normalized % lines_per_set;
        Self {
            start,
            end: start + lines_per_set - 1,
        }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last slot of the set (inclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of slots in the set.
    #[inline]
    pub fn ways(&self) -> usize {
        self.end - self.start + 1
    }

    /// Position of this set among all sets.
    #[inline]
    pub fn set_index(&self) -> usize {
        self.start / self.ways()
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    #[inline]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

// ---------------------------------------------------------------------------
// SetAssociativeCache
// ---------------------------------------------------------------------------

/// Fixed-capacity key→value cache with set-associative placement.
///
/// # Type Parameters
///
/// - `K`: Key type, compared with `Eq` inside a set
/// - `V`: Value type
/// - `E`: [`Evictor`] choosing victims in full sets (default [`LruEvictor`])
/// - `H`: [`HashGenerator`] mapping keys to tags (default [`GenericHashGenerator`])
///
/// # Example
///
/// ```
/// use setassoc::SetAssociativeCache;
///
/// let mut cache = SetAssociativeCache::<&str, u32>::try_new(64, 4)?;
///
/// cache.put("apples", 3)?;
/// cache.put("apples", 5)?; // in-place update
///
/// assert_eq!(cache.get(&"apples"), Some(&5));
/// assert_eq!(cache.get(&"pears"), None);
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.evictions(), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SetAssociativeCache<K, V, E = LruEvictor, H = GenericHashGenerator> {
    entries: Box<[CacheEntry<K, V>]>,
    geometry: CacheGeometry,
    evictor: E,
    hash_generator: H,
    /// Logical clock; last value handed out as a timestamp.
    clock: u64,
    /// Number of valid slots.
    len: usize,
    metrics: SetAssociativeMetrics,
}

impl<K, V> SetAssociativeCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a cache with the default LRU evictor and generic hashing.
    ///
    /// A `0` for either argument selects its default.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `capacity` is not a multiple of `lines_per_set`.
    pub fn try_new(capacity: usize, lines_per_set: usize) -> Result<Self, ConfigError> {
        SetAssociativeCacheBuilder::new()
            .capacity(capacity)
            .lines_per_set(lines_per_set)
            .build()
    }
}

impl<K, V, E, H> SetAssociativeCache<K, V, E, H>
where
    K: Eq,
    E: Evictor<K, V>,
    H: HashGenerator<K>,
{
    /// Validates `config` and eagerly allocates every slot.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `capacity` is not a multiple of `lines_per_set`;
    /// nothing is allocated in that case.
    pub fn with_parts(
        config: CacheConfig,
        evictor: E,
        hash_generator: H,
    ) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;

        let entries: Box<[CacheEntry<K, V>]> = std::iter::repeat_with(CacheEntry::empty)
            .take(geometry.capacity())
            .collect();

        debug!(
            capacity = geometry.capacity(),
            lines_per_set = geometry.lines_per_set(),
            set_count = geometry.set_count(),
            "allocated set-associative cache"
        );

        Ok(Self {
            entries,
            geometry,
            evictor,
            hash_generator,
            clock: 0,
            len: 0,
            metrics: SetAssociativeMetrics::default(),
        })
    }

    /// Slot range a tag folds into.
    #[inline]
    pub fn calculate_block_range(&self, tag: i64) -> SetRange {
        SetRange::for_tag(
            tag,
            self.geometry.capacity(),
            self.geometry.lines_per_set(),
        )
    }

    /// Slot range `key` is confined to.
    #[inline]
    pub fn set_range(&self, key: &K) -> SetRange {
        self.calculate_block_range(self.hash_generator.hash(key))
    }

    /// Slots of the set `key` is confined to.
    pub fn set_entries(&self, key: &K) -> &[CacheEntry<K, V>] {
        &self.entries[self.set_range(key).indices()]
    }

    #[inline]
    fn find(&self, key: &K, range: SetRange) -> Option<usize> {
        range.indices().find(|&index| self.entries[index].holds(key))
    }

    #[inline]
    fn tick(&mut self) -> u64 {
        self.clock = self.clock.saturating_add(1);
        self.clock
    }

    /// Records a hit or miss and refreshes the timestamp of a hit.
    fn lookup(&mut self, key: &K) -> Option<usize> {
        let range = self.set_range(key);
        match self.find(key, range) {
            Some(index) => {
                self.metrics.record_get_hit();
                let now = self.tick();
                self.entries[index].touch(now);
                Some(index)
            },
            None => {
                self.metrics.record_get_miss();
                None
            },
        }
    }

    /// Retrieves a value, marking it as just used.
    ///
    /// A miss is not an error: it returns `None`, counts a miss and leaves
    /// every slot untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use setassoc::SetAssociativeCache;
    ///
    /// let mut cache = SetAssociativeCache::<u64, &str>::try_new(16, 4)?;
    /// cache.put(1, "one")?;
    ///
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// assert_eq!(cache.get(&2), None);
    /// assert_eq!((cache.hits(), cache.misses()), (1, 1));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.lookup(key)?;
        self.entries[index].value()
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.lookup(key)?;
        self.entries[index].value_mut()
    }

    /// Looks up a value without touching counters or timestamps.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let index = self.find(key, self.set_range(key))?;
        self.entries[index].value()
    }

    /// Returns `true` if `key` is cached. No side effects.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key, self.set_range(key)).is_some()
    }

    /// Stores `value` under `key`.
    ///
    /// 1. If `key` is already in its set, the value and timestamp are
    ///    replaced in place.
    /// 2. Otherwise the first free slot of the set is filled.
    /// 3. Otherwise the set is full: the eviction counter is bumped and the
    ///    evictor's chosen slot is overwritten.
    ///
    /// # Errors
    ///
    /// [`ContractViolationError`] if the evictor returns an index outside the
    /// set. The cache contents are left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use setassoc::SetAssociativeCache;
    ///
    /// let mut cache = SetAssociativeCache::<u64, u64>::try_new(4, 4)?;
    /// for key in 0..5 {
    ///     cache.put(key, key * 10)?;
    /// }
    ///
    /// // one set of four: the fifth key evicted the least recent one
    /// assert_eq!(cache.len(), 4);
    /// assert_eq!(cache.evictions(), 1);
    /// assert!(!cache.contains(&0));
    /// assert_eq!(cache.get(&4), Some(&40));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<(), ContractViolationError> {
        self.metrics.record_insert_call();
        let range = self.set_range(&key);

        let mut free_slot = None;
        for index in range.indices() {
            let entry = &self.entries[index];
            if entry.holds(&key) {
                let now = self.tick();
                self.entries[index].replace_value(value, now);
                self.metrics.record_insert_update();
                return Ok(());
            }
            if free_slot.is_none() && !entry.is_valid() {
                free_slot = Some(index);
            }
        }

        let target = match free_slot {
            Some(index) => {
                self.len += 1;
                index
            },
            None => self.select_victim(range)?,
        };

        let now = self.tick();
        self.entries[target].update(key, value, now);
        self.metrics.record_insert_new();
        Ok(())
    }

    /// Asks the evictor for a victim in the full set `range` and checks the answer.
    fn select_victim(&mut self, range: SetRange) -> Result<usize, ContractViolationError> {
        self.metrics.record_eviction();
        let victim = self.evictor.evict(&self.entries, range.start(), range.end());

        if !range.contains(victim) {
            self.metrics.record_contract_violation();
            error!(
                victim,
                start = range.start(),
                end = range.end(),
                "evictor selected a slot outside the set"
            );
            return Err(ContractViolationError::new(
                victim,
                range.start(),
                range.end(),
            ));
        }

        trace!(set = range.set_index(), victim, "evicting slot");
        Ok(victim)
    }

    /// Verifies the slot array against the cache's bookkeeping.
    ///
    /// Checks that `len` matches the valid slots, every valid key sits in the
    /// set its tag maps to, no set holds the same key twice, and no timestamp
    /// is ahead of the clock. `O(capacity * lines_per_set)`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let valid = self.entries.iter().filter(|entry| entry.is_valid()).count();
        if valid != self.len {
            return Err(InvariantError::new(format!(
                "len is {} but {} slots are valid",
                self.len, valid
            )));
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.timestamp() > self.clock {
                return Err(InvariantError::new(format!(
                    "slot {} has timestamp {} ahead of clock {}",
                    index,
                    entry.timestamp(),
                    self.clock
                )));
            }

            let Some(key) = entry.key() else {
                continue;
            };

            let range = self.set_range(key);
            if !range.contains(index) {
                return Err(InvariantError::new(format!(
                    "slot {} holds a key that maps to [{}, {}]",
                    index,
                    range.start(),
                    range.end()
                )));
            }
            if self.entries[range.start()..index]
                .iter()
                .any(|other| other.holds(key))
            {
                return Err(InvariantError::new(format!(
                    "slot {} duplicates a key already cached in its set",
                    index
                )));
            }
        }

        Ok(())
    }
}

impl<K, V, E, H> SetAssociativeCache<K, V, E, H> {
    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.geometry.capacity()
    }

    /// Slots per set.
    #[inline]
    pub fn lines_per_set(&self) -> usize {
        self.geometry.lines_per_set()
    }

    #[inline]
    pub fn set_count(&self) -> usize {
        self.geometry.set_count()
    }

    #[inline]
    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    /// Number of valid slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current value of the logical clock.
    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// All slots, in index order.
    #[inline]
    pub fn entries(&self) -> &[CacheEntry<K, V>] {
        &self.entries
    }

    #[inline]
    pub fn evictor(&self) -> &E {
        &self.evictor
    }

    #[inline]
    pub fn evictor_mut(&mut self) -> &mut E {
        &mut self.evictor
    }

    #[inline]
    pub fn hash_generator(&self) -> &H {
        &self.hash_generator
    }

    /// Number of `get` calls that found their key.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.metrics.get_hits
    }

    /// Number of `get` calls that returned `None`.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.metrics.get_misses
    }

    /// Number of `put` calls that hit a full set.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.metrics.evictions
    }

    #[inline]
    pub fn hit_ratio(&self) -> f64 {
        self.metrics.hit_ratio()
    }

    #[inline]
    pub fn metrics(&self) -> &SetAssociativeMetrics {
        &self.metrics
    }

    /// Zeroes every counter, including hits, misses and evictions. Cached
    /// entries and the clock are untouched.
    pub fn clear_stats(&mut self) {
        self.metrics.reset_metrics();
    }

    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> SetAssociativeMetricsSnapshot {
        SetAssociativeMetricsSnapshot {
            get_calls: self.metrics.get_calls(),
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evictions: self.metrics.evictions,
            contract_violations: self.metrics.contract_violations,
            hit_ratio: self.metrics.hit_ratio(),
            cache_len: self.len,
            capacity: self.geometry.capacity(),
            set_count: self.geometry.set_count(),
            lines_per_set: self.geometry.lines_per_set(),
        }
    }
}

impl<K, V, E, H> fmt::Debug for SetAssociativeCache<K, V, E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetAssociativeCache")
            .field("capacity", &self.geometry.capacity())
            .field("lines_per_set", &self.geometry.lines_per_set())
            .field("set_count", &self.geometry.set_count())
            .field("len", &self.len)
            .field("hits", &self.metrics.get_hits)
            .field("misses", &self.metrics.get_misses)
            .field("evictions", &self.metrics.evictions)
            .finish_non_exhaustive()
    }
}

impl<K, V, E, H> ReadOnlyCache<K, V> for SetAssociativeCache<K, V, E, H>
where
    K: Eq,
    E: Evictor<K, V>,
    H: HashGenerator<K>,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        SetAssociativeCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.geometry.capacity()
    }
}

impl<K, V, E, H> MetricsSnapshotProvider<SetAssociativeMetricsSnapshot>
    for SetAssociativeCache<K, V, E, H>
{
    fn snapshot(&self) -> SetAssociativeMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, E, H> MetricsReset for SetAssociativeCache<K, V, E, H> {
    fn reset_metrics(&mut self) {
        self.clear_stats();
    }
}
