#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Eviction walk-through
//!
//! ```rust
//! use bounded_lru::{BoundedLruCache, CacheError};
//!
//! let mut cache = BoundedLruCache::new(3);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//!
//! // Reading 1 promotes it, so 2 is now the least recently used entry.
//! assert_eq!(cache.get(&1), Ok("one"));
//! cache.put(4, "four");
//!
//! assert_eq!(cache.get(&2), Err(CacheError::NotFound));
//! assert_eq!(cache.get(&1), Ok("one"));
//! assert_eq!(cache.get(&3), Ok("three"));
//! assert_eq!(cache.get(&4), Ok("four"));
//! ```
//!
//! ## Zero capacity
//!
//! A cache built with capacity 0 accepts writes and drops them:
//!
//! ```rust
//! use bounded_lru::{BoundedLruCache, CacheError};
//!
//! let mut cache = BoundedLruCache::new(0);
//! cache.put(1, "one");
//! assert_eq!(cache.get(&1), Err(CacheError::NotFound));
//! assert!(cache.is_empty());
//! ```
//!
//! ## Sharing between threads
//!
//! The cache does no locking of its own. Wrap it in a mutex and hold the
//! lock across each call:
//!
//! ```rust
//! use bounded_lru::BoundedLruCache;
//! use std::sync::{Arc, Mutex};
//!
//! let cache = Arc::new(Mutex::new(BoundedLruCache::new(64)));
//! let writer = {
//!     let cache = Arc::clone(&cache);
//!     std::thread::spawn(move || cache.lock().unwrap().put("key", 42))
//! };
//! writer.join().unwrap();
//! assert_eq!(cache.lock().unwrap().get(&"key"), Ok(42));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the bounded LRU cache
//! - [`config`]: configuration structures
//! - [`metrics`]: counters collected while the cache runs
//! - [`error`]: error types

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Error types returned by cache operations.
pub mod error;

/// Arena-backed doubly linked list that tracks recency order.
///
/// Internal infrastructure; nodes are addressed by stable slot ids instead
/// of pointers.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Bounded Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// a new key arrives at capacity.
pub mod lru;

/// Cache metrics system.
///
/// Counters for hits, misses, insertions, updates and evictions, reported in
/// deterministic key order.
pub mod metrics;

pub use error::{CacheError, InvariantError};
pub use lru::BoundedLruCache;
pub use metrics::CacheMetrics;
