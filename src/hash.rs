//! Key → tag strategies.
//!
//! A [`HashGenerator`] maps a key to the signed 64-bit *tag* the cache folds
//! into a set index. Swapping the generator changes which field of a key
//! drives placement without touching any call site, which also lets one
//! object serve as its own key and value.
//!
//! ## Implementations
//!
//! | Type                       | Tag                                          |
//! |----------------------------|----------------------------------------------|
//! | [`GenericHashGenerator`]   | `K: Hash` through a `BuildHasher`; by default |
//! |                            | integers tag as themselves, the rest via Fx  |
//! | [`IdentityHashGenerator`]  | the integer key itself                       |
//! | `F: Fn(&K) -> i64`         | whatever the closure returns                 |
//!
//! Tags may be negative. The cache normalises them before indexing.
//!
//! ## Example Usage
//!
//! ```
//! use setassoc::hash::{GenericHashGenerator, HashGenerator, IdentityHashGenerator};
//!
//! let generic = GenericHashGenerator::new();
//! assert_eq!(generic.hash(&"user:1"), generic.hash(&"user:1"));
//! assert_eq!(generic.hash(&4_i32), 4);
//!
//! assert_eq!(IdentityHashGenerator.hash(&-5_i32), -5);
//!
//! struct Employee { id: i64, name: &'static str }
//! let by_id = |e: &Employee| e.id;
//! assert_eq!(by_id.hash(&Employee { id: 42, name: "ada" }), 42);
//! ```

use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

use rustc_hash::FxHasher;

/// Hasher that returns a lone integer unchanged and Fx-mixes everything else.
///
/// A key whose `Hash` impl writes exactly one primitive integer (`u8` through
/// `u64`, `i8` through `i64`, `usize`, `isize`) finishes with that integer,
/// sign-extended for signed types. Any byte write, 128-bit write or second
/// write switches to [`FxHasher`].
///
/// ```
/// use std::hash::BuildHasher;
/// use setassoc::hash::PassthroughBuildHasher;
///
/// let build = PassthroughBuildHasher::default();
/// assert_eq!(build.hash_one(42_u32), 42);
/// assert_eq!(build.hash_one(-3_i64) as i64, -3);
/// ```
#[derive(Default)]
pub struct IntegerPassthroughHasher {
    state: PassthroughState,
}

#[derive(Default)]
enum PassthroughState {
    #[default]
    Empty,
    Integer(u64),
    Mixed(FxHasher),
}

/// `BuildHasher` for [`IntegerPassthroughHasher`]; the default of [`GenericHashGenerator`].
pub type PassthroughBuildHasher = BuildHasherDefault<IntegerPassthroughHasher>;

impl IntegerPassthroughHasher {
    #[inline]
    fn write_integer(&mut self, value: u64) {
        if let PassthroughState::Mixed(fx) = &mut self.state {
            fx.write_u64(value);
            return;
        }
        if matches!(self.state, PassthroughState::Empty) {
            self.state = PassthroughState::Integer(value);
            return;
        }
        let mut fx = self.take_mixed();
        fx.write_u64(value);
        self.state = PassthroughState::Mixed(fx);
    }

    /// Moves the state into Fx mixing, carrying over a pending integer.
    fn take_mixed(&mut self) -> FxHasher {
        match std::mem::take(&mut self.state) {
            PassthroughState::Empty => FxHasher::default(),
            PassthroughState::Integer(pending) => {
                let mut fx = FxHasher::default();
                fx.write_u64(pending);
                fx
            },
            PassthroughState::Mixed(fx) => fx,
        }
    }
}

impl Hasher for IntegerPassthroughHasher {
    #[inline]
    fn finish(&self) -> u64 {
        match &self.state {
            PassthroughState::Empty => 0,
            PassthroughState::Integer(value) => *value,
            PassthroughState::Mixed(fx) => fx.finish(),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut fx = self.take_mixed();
        fx.write(bytes);
        self.state = PassthroughState::Mixed(fx);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.write_integer(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.write_integer(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.write_integer(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.write_integer(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_integer(i as u64);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.write_integer(i64::from(i) as u64);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.write_integer(i64::from(i) as u64);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.write_integer(i64::from(i) as u64);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.write_integer(i as u64);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.write_integer(i as i64 as u64);
    }

    fn write_u128(&mut self, i: u128) {
        self.write(&i.to_ne_bytes());
    }

    fn write_i128(&mut self, i: i128) {
        self.write(&i.to_ne_bytes());
    }
}

/// Maps a key to the integer tag used to pick its set.
///
/// Must be deterministic within a run: keys that compare equal must produce
/// the same tag. Tags need not be stable across runs.
pub trait HashGenerator<K> {
    fn hash(&self, key: &K) -> i64;
}

impl<K, F> HashGenerator<K> for F
where
    F: Fn(&K) -> i64,
{
    #[inline]
    fn hash(&self, key: &K) -> i64 {
        self(key)
    }
}

/// Default generator: delegates to the key's own [`Hash`] implementation.
///
/// The digest is produced by the `BuildHasher` `S` and reinterpreted as `i64`.
/// The default [`PassthroughBuildHasher`] tags a plain integer key with its
/// own value, so consecutive integers fill consecutive slots; other keys are
/// mixed with FxHash. Override with [`with_hasher`](Self::with_hasher).
///
/// Keys whose `Hash` output changes while they are cached (interior
/// mutability) will not be found again.
#[derive(Debug, Clone, Default)]
pub struct GenericHashGenerator<S = PassthroughBuildHasher> {
    build_hasher: S,
}

impl GenericHashGenerator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BuildHasher> GenericHashGenerator<S> {
    /// Uses `build_hasher` instead of the integer passthrough.
    ///
    /// ```
    /// use std::collections::hash_map::RandomState;
    /// use setassoc::hash::{GenericHashGenerator, HashGenerator};
    ///
    /// let generator = GenericHashGenerator::with_hasher(RandomState::new());
    /// assert_eq!(generator.hash(&17_u32), generator.hash(&17_u32));
    /// ```
    #[inline]
    pub fn with_hasher(build_hasher: S) -> Self {
        Self { build_hasher }
    }
}

impl<K, S> HashGenerator<K> for GenericHashGenerator<S>
where
    K: Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> i64 {
        self.build_hasher.hash_one(key) as i64
    }
}

/// Uses an integer key as its own tag.
///
/// Consecutive keys land in consecutive slots, so with `lines_per_set = N`
/// keys `0..N` share the first set, `N..2N` the second, and keys wrap around
/// every `capacity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityHashGenerator;

impl<K> HashGenerator<K> for IdentityHashGenerator
where
    K: Copy + Into<i64>,
{
    #[inline]
    fn hash(&self, key: &K) -> i64 {
        (*key).into()
    }
}
