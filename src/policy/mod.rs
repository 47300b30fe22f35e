//! Victim selection for full sets.
//!
//! When `put` finds every slot of a key's set occupied by other keys, the
//! cache asks its [`Evictor`] which slot to overwrite.
//!
//! ```text
//!   entries: [ s0 | s1 | s2 | s3 | s4 | s5 | s6 | s7 ]
//!                             └── set 1 ──┘
//!                             start=4     end=7 (inclusive)
//!
//!   evict(entries, 4, 7) ──► 4 <= victim <= 7
//! ```
//!
//! ## Contract
//!
//! - Called only when every entry in `[start, end]` is valid.
//! - Must return an index `i` with `start <= i <= end`. Anything else makes
//!   the triggering `put` fail with
//!   [`ContractViolationError`](crate::error::ContractViolationError).
//! - Receives the entries by shared reference for the duration of the call
//!   and cannot keep them.
//!
//! ## Policies
//!
//! | Policy                        | Victim                               | Ties          |
//! |-------------------------------|--------------------------------------|---------------|
//! | [`LruEvictor`](lru::LruEvictor)       | smallest timestamp           | lowest index  |
//! | [`MruEvictor`](mru::MruEvictor)       | largest timestamp            | lowest index  |
//! | [`RandomEvictor`](random::RandomEvictor) | uniform over the set      | n/a           |
//!
//! ## Custom Policies
//!
//! ```
//! use setassoc::entry::CacheEntry;
//! use setassoc::policy::Evictor;
//!
//! /// Always replaces the first way of the set.
//! struct FirstWay;
//!
//! impl<K, V> Evictor<K, V> for FirstWay {
//!     fn evict(&mut self, _entries: &[CacheEntry<K, V>], start: usize, _end: usize) -> usize {
//!         start
//!     }
//! }
//! ```

use crate::entry::CacheEntry;

pub mod lru;
pub mod mru;
pub mod random;

pub use lru::LruEvictor;
pub use mru::MruEvictor;
pub use random::RandomEvictor;

/// Chooses the slot to overwrite within a full set.
pub trait Evictor<K, V> {
    /// Returns the index of the victim slot in `[start, end]` (inclusive).
    fn evict(&mut self, entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize;
}

impl<K, V, E> Evictor<K, V> for &mut E
where
    E: Evictor<K, V> + ?Sized,
{
    #[inline]
    fn evict(&mut self, entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize {
        (**self).evict(entries, start, end)
    }
}

impl<K, V, E> Evictor<K, V> for Box<E>
where
    E: Evictor<K, V> + ?Sized,
{
    #[inline]
    fn evict(&mut self, entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize {
        (**self).evict(entries, start, end)
    }
}

/// Left-to-right scan keeping the first entry for which `better(candidate, best)`
/// holds strictly. Shared by the recency policies.
#[inline]
pub(crate) fn scan_by_timestamp<K, V>(
    entries: &[CacheEntry<K, V>],
    start: usize,
    end: usize,
    better: impl Fn(u64, u64) -> bool,
) -> usize {
    let mut victim = start;
    let mut victim_ts = entries[start].timestamp();
    for (offset, entry) in entries[start..=end].iter().enumerate() {
        let ts = entry.timestamp();
        if better(ts, victim_ts) {
            victim = start + offset;
            victim_ts = ts;
        }
    }
    victim
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entry::CacheEntry;

    /// Builds a fully valid slot array with the given timestamps.
    pub(crate) fn entries_with_timestamps(timestamps: &[u64]) -> Vec<CacheEntry<usize, usize>> {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                let mut entry = CacheEntry::empty();
                entry.update(i, i * 10, ts);
                entry
            })
            .collect()
    }
}
