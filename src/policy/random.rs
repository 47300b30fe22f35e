//! Random victim selection.
//!
//! Picks a uniformly random slot of the full set, ignoring timestamps. A
//! baseline for comparing the recency policies, and a reasonable choice when
//! access patterns show no locality.
//!
//! ## Example Usage
//!
//! ```
//! use setassoc::policy::random::RandomEvictor;
//! use setassoc::SetAssociativeCacheBuilder;
//!
//! let mut cache = SetAssociativeCacheBuilder::new()
//!     .capacity(8)
//!     .lines_per_set(4)
//!     .evictor(RandomEvictor::with_seed(7))
//!     .build::<u64, u64>()?;
//!
//! for key in 0..64 {
//!     cache.put(key, key * 2)?;
//! }
//! assert_eq!(cache.len(), 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Implementation Notes
//!
//! - Uses [`SmallRng`]: fast, not cryptographically secure.
//! - Seed with [`RandomEvictor::with_seed`] for reproducible runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::Evictor;
use crate::entry::CacheEntry;

/// Evicts a uniformly random slot of a set.
#[derive(Debug, Clone)]
pub struct RandomEvictor {
    rng: SmallRng,
}

impl RandomEvictor {
    /// Creates an evictor seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an evictor with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEvictor {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Evictor<K, V> for RandomEvictor {
    #[inline]
    fn evict(&mut self, _entries: &[CacheEntry<K, V>], start: usize, end: usize) -> usize {
        self.rng.gen_range(start..=end)
    }
}
