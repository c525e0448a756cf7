//! Cache Configuration Module
//!
//! Configuration structs have public fields so they can be built with a
//! struct literal and handed to [`BoundedLruCache::init`](crate::BoundedLruCache::init).

pub mod lru;

pub use lru::BoundedLruCacheConfig;
