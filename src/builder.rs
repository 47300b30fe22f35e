//! Configuration and construction of [`SetAssociativeCache`].
//!
//! Every constructor argument is optional. [`CacheConfig`] holds the two
//! numeric knobs, [`SetAssociativeCacheBuilder`] adds the two strategies, and
//! [`CacheConfig::validate`] is the single place where defaults are filled in
//! and the geometry is checked, before anything is allocated.
//!
//! ## Defaults
//!
//! | Setting          | Default                         | Applied when     |
//! |------------------|---------------------------------|------------------|
//! | `capacity`       | [`DEFAULT_CAPACITY`] (32 Mi)    | `None` or `0`    |
//! | `lines_per_set`  | [`DEFAULT_LINES_PER_SET`] (4)   | `None` or `0`    |
//! | evictor          | [`LruEvictor`]                  | not supplied     |
//! | hash generator   | [`GenericHashGenerator`]        | not supplied     |
//!
//! ## Example
//!
//! ```rust
//! use setassoc::builder::SetAssociativeCacheBuilder;
//! use setassoc::policy::MruEvictor;
//!
//! let mut cache = SetAssociativeCacheBuilder::new()
//!     .capacity(1024)
//!     .lines_per_set(8)
//!     .evictor(MruEvictor)
//!     .build::<String, u32>()?;
//!
//! cache.put("hello".to_string(), 1)?;
//! assert_eq!(cache.get(&"hello".to_string()), Some(&1));
//! assert_eq!(cache.set_count(), 128);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::debug;

use crate::cache::SetAssociativeCache;
use crate::error::ConfigError;
use crate::hash::{GenericHashGenerator, HashGenerator};
use crate::policy::{Evictor, LruEvictor};

/// Slot count used when no capacity (or zero) is given: 32 Mi entries.
pub const DEFAULT_CAPACITY: usize = 32 * 1024 * 1024;

/// Set width used when no `lines_per_set` (or zero) is given.
pub const DEFAULT_LINES_PER_SET: usize = 4;

/// Numeric cache configuration. Unset fields take their defaults.
///
/// # Example
///
/// ```
/// use setassoc::builder::{CacheConfig, DEFAULT_CAPACITY};
///
/// let geometry = CacheConfig::default().validate()?;
/// assert_eq!(geometry.capacity(), DEFAULT_CAPACITY);
/// assert_eq!(geometry.lines_per_set(), 4);
///
/// let geometry = CacheConfig::new(4, 2).validate()?;
/// assert_eq!(geometry.set_count(), 2);
///
/// assert!(CacheConfig::new(1, 2).validate().is_err());
/// # Ok::<(), setassoc::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total number of slots.
    pub capacity: Option<usize>,
    /// Slots per set (associativity).
    pub lines_per_set: Option<usize>,
}

impl CacheConfig {
    /// Configuration with both fields set.
    pub fn new(capacity: usize, lines_per_set: usize) -> Self {
        Self {
            capacity: Some(capacity),
            lines_per_set: Some(lines_per_set),
        }
    }

    /// Fills in defaults and checks that the slots split evenly into sets.
    pub fn validate(&self) -> Result<CacheGeometry, ConfigError> {
        let capacity = match self.capacity {
            Some(capacity) if capacity > 0 => capacity,
            _ => {
                debug!(capacity = DEFAULT_CAPACITY, "no cache size specified, using default");
                DEFAULT_CAPACITY
            },
        };

        let lines_per_set = match self.lines_per_set {
            Some(lines) if lines > 0 => lines,
            _ => {
                debug!(
                    lines_per_set = DEFAULT_LINES_PER_SET,
                    "no set cardinality specified, using default"
                );
                DEFAULT_LINES_PER_SET
            },
        };

        if capacity % lines_per_set != 0 {
            return Err(ConfigError::new(format!(
                "capacity ({capacity}) must be an exact multiple of lines_per_set ({lines_per_set})"
            )));
        }

        if i64::try_from(capacity).is_err() {
            return Err(ConfigError::new(format!(
                "capacity ({capacity}) exceeds the range of a hash tag"
            )));
        }

        Ok(CacheGeometry {
            capacity,
            lines_per_set,
            set_count: capacity / lines_per_set,
        })
    }
}

/// Validated cache shape: `capacity == set_count * lines_per_set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    capacity: usize,
    lines_per_set: usize,
    set_count: usize,
}

impl CacheGeometry {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    #[inline]
    pub fn set_count(&self) -> usize {
        self.set_count
    }
}

/// Builder for [`SetAssociativeCache`] with pluggable strategies.
///
/// The evictor and hash generator are type parameters, so swapping either one
/// changes the builder's type and the cache is monomorphised over the choice.
#[derive(Debug, Clone)]
pub struct SetAssociativeCacheBuilder<E = LruEvictor, H = GenericHashGenerator> {
    config: CacheConfig,
    evictor: E,
    hash_generator: H,
    default_evictor: bool,
    default_hash_generator: bool,
}

impl SetAssociativeCacheBuilder {
    /// Creates a builder with every setting at its default.
    pub fn new() -> Self {
        Self {
            config: CacheConfig::default(),
            evictor: LruEvictor,
            hash_generator: GenericHashGenerator::new(),
            default_evictor: true,
            default_hash_generator: true,
        }
    }
}

impl Default for SetAssociativeCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, H> SetAssociativeCacheBuilder<E, H> {
    /// Sets the total slot count. `0` means "use the default".
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    /// Sets the number of slots per set. `0` means "use the default".
    pub fn lines_per_set(mut self, lines_per_set: usize) -> Self {
        self.config.lines_per_set = Some(lines_per_set);
        self
    }

    /// Replaces both numeric settings at once.
    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `evictor` to pick victims in full sets.
    pub fn evictor<E2>(self, evictor: E2) -> SetAssociativeCacheBuilder<E2, H> {
        SetAssociativeCacheBuilder {
            config: self.config,
            evictor,
            hash_generator: self.hash_generator,
            default_evictor: false,
            default_hash_generator: self.default_hash_generator,
        }
    }

    /// Uses `hash_generator` to map keys to tags.
    pub fn hash_generator<H2>(self, hash_generator: H2) -> SetAssociativeCacheBuilder<E, H2> {
        SetAssociativeCacheBuilder {
            config: self.config,
            evictor: self.evictor,
            hash_generator,
            default_evictor: self.default_evictor,
            default_hash_generator: false,
        }
    }

    /// Validates the configuration and allocates every slot.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `capacity` is not a multiple of `lines_per_set`.
    pub fn build<K, V>(self) -> Result<SetAssociativeCache<K, V, E, H>, ConfigError>
    where
        K: Eq,
        E: Evictor<K, V>,
        H: HashGenerator<K>,
    {
        if self.default_evictor {
            debug!("no cache evictor specified, using LRU");
        }
        if self.default_hash_generator {
            debug!(
                "no hash generator specified, using the key's Hash impl; \
                 keys whose hash changes while cached will not be found"
            );
        }
        SetAssociativeCache::with_parts(self.config, self.evictor, self.hash_generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::IdentityHashGenerator;
    use crate::policy::MruEvictor;

    mod config {
        use super::*;

        #[test]
        fn unset_fields_take_defaults() {
            let geometry = CacheConfig::default().validate().unwrap();
            assert_eq!(geometry.capacity(), DEFAULT_CAPACITY);
            assert_eq!(geometry.lines_per_set(), DEFAULT_LINES_PER_SET);
            assert_eq!(
                geometry.set_count(),
                DEFAULT_CAPACITY / DEFAULT_LINES_PER_SET
            );
        }

        #[test]
        fn zero_means_default() {
            let geometry = CacheConfig::new(0, 0).validate().unwrap();
            assert_eq!(geometry.capacity(), 32 * 1024 * 1024);
            assert_eq!(geometry.lines_per_set(), 4);
        }

        #[test]
        fn partial_defaults() {
            let geometry = CacheConfig {
                capacity: Some(64),
                lines_per_set: None,
            }
            .validate()
            .unwrap();
            assert_eq!(geometry.set_count(), 16);
        }

        #[test]
        fn rejects_uneven_split() {
            let err = CacheConfig::new(1, 2).validate().unwrap_err();
            assert!(err.message().contains("multiple"));

            assert!(CacheConfig::new(10, 4).validate().is_err());
            assert!(CacheConfig::new(6, 0).validate().is_err());
        }

        #[test]
        fn direct_mapped_and_fully_associative() {
            let direct = CacheConfig::new(8, 1).validate().unwrap();
            assert_eq!(direct.set_count(), 8);

            let full = CacheConfig::new(8, 8).validate().unwrap();
            assert_eq!(full.set_count(), 1);
        }
    }

    mod builder {
        use super::*;

        #[test]
        fn builds_with_custom_strategies() {
            let cache = SetAssociativeCacheBuilder::new()
                .capacity(8)
                .lines_per_set(2)
                .evictor(MruEvictor)
                .hash_generator(IdentityHashGenerator)
                .build::<i32, &str>()
                .unwrap();

            assert_eq!(cache.capacity(), 8);
            assert_eq!(cache.lines_per_set(), 2);
            assert_eq!(cache.set_count(), 4);
            assert!(cache.is_empty());
        }

        #[test]
        fn config_replaces_numeric_settings() {
            let cache = SetAssociativeCacheBuilder::new()
                .capacity(1)
                .config(CacheConfig::new(12, 3))
                .build::<u64, u64>()
                .unwrap();
            assert_eq!(cache.set_count(), 4);
        }

        #[test]
        fn invalid_geometry_fails_build() {
            let result = SetAssociativeCacheBuilder::new()
                .capacity(6)
                .lines_per_set(4)
                .build::<u64, u64>();
            assert!(result.is_err());
        }

        #[test]
        fn strategy_flags_track_overrides() {
            let builder = SetAssociativeCacheBuilder::new();
            assert!(builder.default_evictor);
            assert!(builder.default_hash_generator);

            let builder = builder.evictor(MruEvictor);
            assert!(!builder.default_evictor);
            assert!(builder.default_hash_generator);

            let builder = builder.hash_generator(IdentityHashGenerator);
            assert!(!builder.default_hash_generator);
        }
    }

    mod logging {
        use super::*;
        use std::io;
        use std::sync::{Arc, Mutex};
        use tracing::Level;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Capture {
            type Writer = Capture;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        fn logged_at(level: Level, f: impl FnOnce()) -> String {
            let capture = Capture::default();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(capture.clone())
                .with_ansi(false)
                .finish();
            tracing::subscriber::with_default(subscriber, f);
            let bytes = capture.0.lock().unwrap().clone();
            String::from_utf8(bytes).unwrap()
        }

        fn build_with_defaults() {
            SetAssociativeCacheBuilder::new()
                .capacity(8)
                .lines_per_set(2)
                .build::<u64, u64>()
                .unwrap();
        }

        #[test]
        fn default_hash_generator_is_quiet_at_warn() {
            let output = logged_at(Level::WARN, build_with_defaults);
            assert!(output.is_empty(), "unexpected output: {output}");
        }

        #[test]
        fn default_hash_generator_is_reported_at_debug() {
            let output = logged_at(Level::DEBUG, build_with_defaults);
            assert!(output.contains("no hash generator specified"));
            assert!(output.contains("DEBUG"));
        }
    }
}
