//! Configuration for the bounded Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use bounded_lru::config::BoundedLruCacheConfig;
//! use bounded_lru::BoundedLruCache;
//!
//! let config = BoundedLruCacheConfig { capacity: 10_000 };
//! let cache: BoundedLruCache<String, Vec<u8>> = BoundedLruCache::init(config, None);
//! assert_eq!(cache.cap(), 10_000);
//! ```

use core::fmt;

/// Configuration for a bounded LRU cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Zero is
///   allowed and yields a cache that never retains anything.
///
/// Any value is accepted, including `usize::MAX`. Storage grows with the
/// number of entries actually stored, not with `capacity`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoundedLruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl BoundedLruCacheConfig {
    /// Creates a configuration for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl fmt::Debug for BoundedLruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
