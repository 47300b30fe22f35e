//! LRU (Least Recently Used) victim selection.
//!
//! Picks the slot with the smallest timestamp in the set. The default policy
//! of [`SetAssociativeCache`](crate::SetAssociativeCache).
//!
//! ## Algorithm
//!
//! ```text
//!   set [start..=end]:   ts = [ 7 | 3 | 9 | 3 ]
//!                                  ▲       ▲
//!                          first minimum   later tie, ignored
//!
//!   victim = start + 1
//! ```
//!
//! - Single left-to-right scan, `O(lines_per_set)`.
//! - The candidate only moves on a strictly smaller timestamp, so ties go to
//!   the lowest index.
//! - With a coarse clock, ties collapse LRU into "first way wins"; the cache's
//!   logical clock never produces ties among written slots.
//!
//! ## Example Usage
//!
//! ```
//! use setassoc::policy::lru::LruEvictor;
//! use setassoc::SetAssociativeCacheBuilder;
//!
//! let mut cache = SetAssociativeCacheBuilder::new()
//!     .capacity(2)
//!     .lines_per_set(2)
//!     .evictor(LruEvictor)
//!     .build::<&str, i32>()?;
//!
//! cache.put("a", 1)?;
//! cache.put("b", 2)?;
//! cache.get(&"a");       // "b" is now least recent
//! cache.put("c", 3)?;    // single set, so "b" is evicted
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::{scan_by_timestamp, Evictor};
use crate::entry::CacheEntry;

/// Evicts the least recently used slot of a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruEvictor;

impl<K, V> Evictor<K, V> for LruEvictor {
    #[inline]
    fn evict(&mut self, entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize {
        scan_by_timestamp(entries, start, end, |candidate, best| candidate < best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::test_support::entries_with_timestamps;

    #[test]
    fn picks_minimum_timestamp() {
        let entries = entries_with_timestamps(&[7, 3, 9, 5]);
        assert_eq!(LruEvictor.evict(&entries, 0, 3), 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let entries = entries_with_timestamps(&[4, 2, 8, 2]);
        assert_eq!(LruEvictor.evict(&entries, 0, 3), 1);

        let all_equal = entries_with_timestamps(&[6, 6, 6, 6]);
        assert_eq!(LruEvictor.evict(&all_equal, 0, 3), 0);
    }

    #[test]
    fn minimum_in_last_way() {
        let entries = entries_with_timestamps(&[10, 11, 12, 1]);
        assert_eq!(LruEvictor.evict(&entries, 0, 3), 3);
    }

    #[test]
    fn respects_set_bounds() {
        // slot 0 has the global minimum but belongs to another set
        let entries = entries_with_timestamps(&[0, 0, 9, 4, 6, 5]);
        assert_eq!(LruEvictor.evict(&entries, 2, 3), 3);
        assert_eq!(LruEvictor.evict(&entries, 4, 5), 5);
    }

    #[test]
    fn single_way_set_returns_start() {
        let entries = entries_with_timestamps(&[3, 1, 2]);
        assert_eq!(LruEvictor.evict(&entries, 2, 2), 2);
    }
}
