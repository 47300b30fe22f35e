//! MRU (Most Recently Used) victim selection.
//!
//! Picks the slot with the largest timestamp in the set, the opposite of
//! [`LruEvictor`](super::lru::LruEvictor). Useful for cyclic scans where the
//! entry just touched is the one least likely to be needed next.
//!
//! ## Algorithm
//!
//! ```text
//!   set [start..=end]:   ts = [ 4 | 9 | 2 | 9 ]
//!                                  ▲       ▲
//!                          first maximum   later tie, ignored
//!
//!   victim = start + 1
//! ```
//!
//! Same single scan as LRU with the comparison flipped; the candidate only
//! moves on a strictly larger timestamp.
//!
//! **Avoid MRU when** the workload has temporal locality: the hottest key of
//! a set is exactly what it throws away.

use super::{scan_by_timestamp, Evictor};
use crate::entry::CacheEntry;

/// Evicts the most recently used slot of a set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MruEvictor;

impl<K, V> Evictor<K, V> for MruEvictor {
    #[inline]
    fn evict(&mut self, entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize {
        scan_by_timestamp(entries, start, end, |candidate, best| candidate > best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::test_support::entries_with_timestamps;

    #[test]
    fn picks_maximum_timestamp() {
        let entries = entries_with_timestamps(&[4, 9, 2, 7]);
        assert_eq!(MruEvictor.evict(&entries, 0, 3), 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let entries = entries_with_timestamps(&[4, 9, 2, 9]);
        assert_eq!(MruEvictor.evict(&entries, 0, 3), 1);

        let all_equal = entries_with_timestamps(&[1, 1, 1, 1]);
        assert_eq!(MruEvictor.evict(&all_equal, 0, 3), 0);
    }

    #[test]
    fn respects_set_bounds() {
        let entries = entries_with_timestamps(&[99, 1, 3, 2]);
        assert_eq!(MruEvictor.evict(&entries, 2, 3), 2);
    }

    #[test]
    fn opposite_of_lru_on_distinct_timestamps() {
        use crate::policy::lru::LruEvictor;

        let entries = entries_with_timestamps(&[5, 1, 8, 3]);
        assert_eq!(LruEvictor.evict(&entries, 0, 3), 1);
        assert_eq!(MruEvictor.evict(&entries, 0, 3), 2);
    }
}
