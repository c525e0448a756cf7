//! Error types returned by the cache.
//!
//! - [`CacheError`]: the recoverable failure of a lookup. `get` on a key that
//!   is not resident (never inserted, evicted, removed, or dropped by a
//!   zero-capacity cache) returns [`CacheError::NotFound`].
//! - [`InvariantError`]: returned by
//!   [`BoundedLruCache::check_invariants`](crate::BoundedLruCache::check_invariants)
//!   when the index and the recency list disagree.
//!
//! Both implement `std::error::Error` when the `std` feature is enabled.

use alloc::string::String;
use core::fmt;

/// Error returned by cache lookups.
///
/// # Example
///
/// ```
/// use bounded_lru::{BoundedLruCache, CacheError};
///
/// let mut cache: BoundedLruCache<u32, u32> = BoundedLruCache::new(1);
/// cache.put(1, 0);
///
/// // A stored zero is a hit, not a miss.
/// assert_eq!(cache.get(&1), Ok(0));
/// assert_eq!(cache.get(&2), Err(CacheError::NotFound));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheError {
    /// The requested key is not present in the cache.
    NotFound,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound => f.write_str("key not found in cache"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CacheError {}

/// Error returned when the cache's internal invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantError {}
