pub use crate::builder::{CacheConfig, SetAssociativeCacheBuilder};
pub use crate::cache::{SetAssociativeCache, SetRange};
pub use crate::entry::CacheEntry;
pub use crate::error::{ConfigError, ContractViolationError};
pub use crate::hash::{GenericHashGenerator, HashGenerator, IdentityHashGenerator};
pub use crate::policy::{Evictor, LruEvictor, MruEvictor, RandomEvictor};
pub use crate::traits::ReadOnlyCache;
