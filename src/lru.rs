//! Bounded Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache with O(1) `get` and `put`.
//! When a new key arrives and the cache is full, the least recently used entry
//! is evicted to make room.
//!
//! # Algorithm
//!
//! Entries live in a recency list stored in a slot arena: each node holds the
//! key, the value and the slot ids of its neighbours. A hash table maps each
//! key to the slot id of its node. Every hit moves the node to the front of
//! the list; eviction takes the node at the back.
//!
//! ```text
//!   index (HashTable<SlotId>)          list (arena of nodes)
//!   hash("b") ─► slot 1 ───────┐
//!   hash("a") ─► slot 0 ──┐    │       head
//!   hash("c") ─► slot 2 ┐ │    │        │
//!                       │ │    └────► [1: b] ◄─► [2: c] ◄─► [0: a] ◄── tail (next victim)
//!                       └─┼──────────────────────┘            ▲
//!                         └───────────────────────────────────┘
//! ```
//!
//! Keys are stored once, inside the arena node. The index holds only slot
//! ids and re-hashes the key in the node when it needs to, so keys need
//! `Hash + Eq` but not `Clone`.
//!
//! # Performance Characteristics
//!
//! - `get`, `put`, `push`, `remove`, `pop_lru`: O(1) expected
//! - `iter`, `check_invariants`: O(n)
//! - Construction reserves room for at most 1024 entries whatever the
//!   capacity; storage grows with the entry count up to `capacity`. A full
//!   cache reuses the evicted entry's slot, so steady-state churn does not
//!   grow the arena.
//!
//! # Thread Safety
//!
//! This cache is not internally synchronized. For concurrent access, wrap it
//! in a `Mutex` and hold the lock for every call.

use crate::config::BoundedLruCacheConfig;
use crate::error::{CacheError, InvariantError};
use crate::list::{self, List, SlotId, MAX_PREALLOC};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;
use hashbrown::HashTable;
use log::{debug, trace};

/// A fixed-capacity Least Recently Used (LRU) cache.
///
/// The cache holds at most `cap` entries. Reading or writing a key makes it
/// the most recently used; inserting a new key into a full cache evicts the
/// least recently used one. A capacity of zero is allowed and produces a
/// cache that discards every write.
///
/// Values are handed out by clone (`get`) or by shared reference (`peek`,
/// `iter`); nothing returns a mutable handle into cache storage.
///
/// # Examples
///
/// ```
/// use bounded_lru::{BoundedLruCache, CacheError};
///
/// let mut cache = BoundedLruCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Ok(1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), Err(CacheError::NotFound));
/// assert_eq!(cache.get(&"apple"), Ok(1));
/// assert_eq!(cache.get(&"cherry"), Ok(3));
/// ```
pub struct BoundedLruCache<K, V, S = DefaultHashBuilder> {
    config: BoundedLruCacheConfig,
    list: List<(K, V)>,
    index: HashTable<SlotId>,
    hash_builder: S,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> BoundedLruCache<K, V> {
    /// Creates a new cache holding at most `cap` entries.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_lru::BoundedLruCache;
    ///
    /// let mut cache: BoundedLruCache<&str, i32> = BoundedLruCache::new(100);
    /// cache.put("key", 42);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn new(cap: usize) -> BoundedLruCache<K, V, DefaultHashBuilder> {
        BoundedLruCache::with_hasher(cap, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> BoundedLruCache<K, V, S> {
    /// Creates a new cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: usize, hash_builder: S) -> Self {
        BoundedLruCache {
            config: BoundedLruCacheConfig::new(cap),
            list: List::new(cap),
            index: HashTable::with_capacity(cap.min(MAX_PREALLOC)),
            hash_builder,
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Creates a new cache from a configuration.
    ///
    /// `hash_builder` defaults to `S::default()` when `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_lru::config::BoundedLruCacheConfig;
    /// use bounded_lru::BoundedLruCache;
    ///
    /// let config = BoundedLruCacheConfig { capacity: 2 };
    /// let mut cache: BoundedLruCache<&str, i32> = BoundedLruCache::init(config, None);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.get(&"a").unwrap(); // "a" becomes most recently used
    /// cache.put("c", 3); // "b" evicted (least recently used)
    /// assert!(!cache.contains(&"b"));
    /// ```
    pub fn init(config: BoundedLruCacheConfig, hash_builder: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.capacity, hash_builder.unwrap_or_default())
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the number of entries currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the counters collected so far.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Looks up `key`, promotes it to most recently used, and returns a clone
    /// of its value.
    ///
    /// Returns [`CacheError::NotFound`] if the key is not resident. A miss
    /// leaves the cache contents and order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let Some(id) = self.find(key) else {
            self.metrics.core.record_miss();
            return Err(CacheError::NotFound);
        };
        self.promote(id);
        self.metrics.core.record_hit();
        self.list
            .get(id)
            .map(|(_, value)| value.clone())
            .ok_or(CacheError::NotFound)
    }

    /// Returns a reference to the value of `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.find(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    /// Returns the least recently used entry, the next one to be evicted,
    /// without changing its recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let id = self.list.back_id()?;
        self.list.get(id).map(|(key, value)| (key, value))
    }

    /// Returns `true` if `key` is resident. Does not change recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// - If `key` is already resident its value is replaced; the size does
    ///   not change.
    /// - If the cache is full the least recently used entry is evicted first.
    /// - If the capacity is zero the write is discarded.
    pub fn put(&mut self, key: K, value: V) {
        let _ = self.push(key, value);
    }

    /// Same as [`put`](Self::put), but returns the pair that is no longer in
    /// the cache as a result of the call:
    ///
    /// - the previous `(key, value)` when `key` was already resident,
    /// - the evicted least recently used pair when the cache was full,
    /// - the given pair itself when the capacity is zero,
    /// - `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_lru::BoundedLruCache;
    ///
    /// let mut cache = BoundedLruCache::new(1);
    /// assert_eq!(cache.push("a", 1), None);
    /// assert_eq!(cache.push("a", 2), Some(("a", 1)));
    /// assert_eq!(cache.push("b", 3), Some(("a", 2)));
    /// ```
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(&key);

        if let Some(id) = self.find_hashed(hash, &key) {
            self.promote(id);
            self.metrics.record_update();
            return self.list.update(id, (key, value));
        }

        if self.cap() == 0 {
            trace!("zero-capacity cache discarded a write");
            self.metrics.record_rejection();
            return Some((key, value));
        }

        let evicted = if self.list.is_full() {
            let evicted = self.detach_lru();
            if evicted.is_some() {
                trace!(
                    "evicted least recently used entry (capacity {})",
                    self.cap()
                );
                self.metrics.core.record_eviction();
            }
            evicted
        } else {
            None
        };

        if let Some(id) = self.list.add((key, value)) {
            let list = &self.list;
            let hash_builder = &self.hash_builder;
            self.index.insert_unique(hash, id, |&other| {
                list.get(other)
                    .map_or(0, |(key, _)| hash_builder.hash_one(key))
            });
            self.metrics.core.record_insertion();
        }

        evicted
    }

    /// Removes `key` from the cache and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.hash_builder.hash_one(key);
        let list = &self.list;
        let entry = self
            .index
            .find_entry(hash, |&id| Self::key_matches(list, id, key))
            .ok()?;
        let (id, _) = entry.remove();
        let (_, value) = self.list.remove(id)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.detach_lru()?;
        self.metrics.core.record_removal();
        Some(popped)
    }

    /// Drops every entry. Capacity and metrics are kept.
    pub fn clear(&mut self) {
        debug!("clearing {} cache entries", self.list.len());
        self.index.clear();
        self.list.clear();
    }

    /// Iterates over entries from most to least recently used.
    ///
    /// Iteration does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Verifies that the index and the recency list agree.
    ///
    /// Checks that every resident key appears exactly once in both, that
    /// each index entry points at a live node holding that key, that the
    /// list links are consistent, and that the size is within capacity.
    /// Runs in O(n); intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.validate()?;

        if self.list.cap() != self.cap() {
            return Err(InvariantError::new(format!(
                "list capacity {} differs from configured capacity {}",
                self.list.cap(),
                self.cap()
            )));
        }
        if self.list.len() > self.cap() {
            return Err(InvariantError::new(format!(
                "cache holds {} entries but capacity is {}",
                self.list.len(),
                self.cap()
            )));
        }
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} entries but list has {}",
                self.index.len(),
                self.list.len()
            )));
        }

        for &id in self.index.iter() {
            let (key, _) = self.list.get(id).ok_or_else(|| {
                InvariantError::new(format!("index points at free slot {}", id.index()))
            })?;
            if self.find(key) != Some(id) {
                return Err(InvariantError::new(format!(
                    "slot {} is not reachable from its own key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn find<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_hashed(self.hash_builder.hash_one(key), key)
    }

    fn find_hashed<Q>(&self, hash: u64, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let list = &self.list;
        self.index
            .find(hash, |&id| Self::key_matches(list, id, key))
            .copied()
    }

    fn key_matches<Q>(list: &List<(K, V)>, id: SlotId, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        list.get(id).is_some_and(|(k, _)| k.borrow() == key)
    }

    fn promote(&mut self, id: SlotId) {
        if self.list.front_id() != Some(id) {
            self.list.move_to_front(id);
            self.metrics.record_promotion();
        }
    }

    /// Unlinks the tail entry from both the list and the index.
    fn detach_lru(&mut self) -> Option<(K, V)> {
        let id = self.list.back_id()?;
        let (key, value) = self.list.remove_last()?;
        let hash = self.hash_builder.hash_one(&key);
        let unindexed = match self.index.find_entry(hash, |&other| other == id) {
            Ok(entry) => {
                entry.remove();
                true
            }
            Err(_) => false,
        };
        debug_assert!(unindexed, "evicted slot {} missing from index", id.index());
        Some((key, value))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for BoundedLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.metrics();
        metrics.insert("capacity".to_string(), self.cap() as f64);
        metrics.insert("entries".to_string(), self.len() as f64);
        let utilization = if self.cap() > 0 {
            self.len() as f64 / self.cap() as f64
        } else {
            0.0
        };
        metrics.insert("utilization".to_string(), utilization);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for BoundedLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

/// Iterator over a cache's entries from most to least recently used.
///
/// Created by [`BoundedLruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a BoundedLruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn keys<K: Clone + Hash + Eq, V>(cache: &BoundedLruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.get(&"apple"), Ok(1));
        assert_eq!(cache.get(&"banana"), Ok(2));
        assert_eq!(cache.get(&"cherry"), Err(CacheError::NotFound));
        cache.put("apple", 3);
        assert_eq!(cache.get(&"apple"), Ok(3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), Err(CacheError::NotFound));
        assert_eq!(cache.get(&"apple"), Ok(3));
        assert_eq!(cache.get(&"cherry"), Ok(4));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_push_returns_displaced_pair() {
        let mut cache = BoundedLruCache::new(2);
        assert_eq!(cache.push("apple", 1), None);
        assert_eq!(cache.push("banana", 2), None);
        assert_eq!(cache.push("apple", 3), Some(("apple", 1)));
        assert_eq!(cache.push("cherry", 4), Some(("banana", 2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_recency_order() {
        let mut cache = BoundedLruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        assert_eq!(keys(&cache), [3, 2, 1]);

        cache.get(&1).unwrap();
        assert_eq!(keys(&cache), [1, 3, 2]);
        assert_eq!(cache.peek_lru(), Some((&2, &"two")));

        cache.put(2, "deux");
        assert_eq!(keys(&cache), [2, 1, 3]);
        assert_eq!(cache.peek_lru(), Some((&3, &"three")));
    }

    #[test]
    fn test_lru_peek_and_contains_do_not_promote() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);

        assert_eq!(cache.peek(&"apple"), Some(&1));
        assert!(cache.contains(&"apple"));
        assert_eq!(cache.peek(&"cherry"), None);
        assert!(!cache.contains(&"cherry"));

        cache.put("cherry", 3);
        assert!(!cache.contains(&"apple"));
        assert!(cache.contains(&"banana"));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), Err(CacheError::NotFound));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);

        // The freed slot means the next insert evicts nothing.
        assert_eq!(cache.push("cherry", 3), None);
        assert_eq!(cache.get(&"banana"), Ok(2));
        assert_eq!(cache.get(&"cherry"), Ok(3));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_pop_lru() {
        let mut cache = BoundedLruCache::new(3);
        assert_eq!(cache.pop_lru(), None);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        cache.get(&"a").unwrap();

        assert_eq!(cache.pop_lru(), Some(("b", 2)));
        assert_eq!(cache.pop_lru(), Some(("c", 3)));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&"a"));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.cap(), 2);
        assert!(cache.peek_lru().is_none());
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Ok(3));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_capacity_limits() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.put("cherry", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"apple"), Err(CacheError::NotFound));
        assert_eq!(cache.get(&"banana"), Ok(2));
        assert_eq!(cache.get(&"cherry"), Ok(3));
    }

    #[test]
    fn test_lru_zero_capacity() {
        let mut cache = BoundedLruCache::new(0);
        assert_eq!(cache.push(1, "one"), Some((1, "one")));
        cache.put(2, "two");
        assert_eq!(cache.get(&1), Err(CacheError::NotFound));
        assert_eq!(cache.get(&2), Err(CacheError::NotFound));
        assert!(cache.is_empty());
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.check_invariants().is_ok());
        assert_eq!(cache.lru_metrics().rejected_insertions, 2);
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = BoundedLruCache::new(1);
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.get(&1), Err(CacheError::NotFound));
        assert_eq!(cache.get(&2), Ok(20));
        cache.put(2, 21);
        assert_eq!(cache.get(&2), Ok(21));
        assert_eq!(cache.len(), 1);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_unbounded_capacity() {
        let mut cache = BoundedLruCache::new(usize::MAX);
        assert_eq!(cache.cap(), usize::MAX);
        for i in 0..2000u32 {
            cache.put(i, i * 2);
        }
        assert_eq!(cache.len(), 2000);
        assert_eq!(cache.get(&0), Ok(0));
        assert_eq!(cache.get(&1999), Ok(3998));
        assert_eq!(cache.lru_metrics().core.evictions, 0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing from index")]
    fn test_lru_eviction_flags_out_of_sync_index() {
        let mut cache = BoundedLruCache::new(1);
        cache.put(1, 10);
        cache.index.clear();
        cache.put(2, 20);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = BoundedLruCache::new(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Ok(1));
        assert_eq!(cache.get(&key2), Ok(2));
        // Borrowed lookups.
        assert_eq!(cache.get("apple"), Ok(1));
        assert_eq!(cache.peek("banana"), Some(&2));
        assert_eq!(cache.remove("banana"), Some(2));
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct NoCloneKey(u32);

    #[test]
    fn test_lru_keys_need_not_be_clone() {
        let mut cache = BoundedLruCache::new(2);
        cache.put(NoCloneKey(1), "one");
        cache.put(NoCloneKey(2), "two");
        cache.put(NoCloneKey(3), "three");
        assert_eq!(cache.get(&NoCloneKey(1)), Err(CacheError::NotFound));
        assert_eq!(cache.get(&NoCloneKey(3)), Ok("three"));
        assert!(cache.check_invariants().is_ok());
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_get_returns_independent_copy() {
        let mut cache = BoundedLruCache::new(2);
        cache.put(
            "apple",
            ComplexValue {
                val: 1,
                description: String::from("First fruit"),
            },
        );

        let mut copy = cache.get(&"apple").unwrap();
        copy.val = 99;
        copy.description.push_str(" (edited)");

        let stored = cache.peek(&"apple").unwrap();
        assert_eq!(stored.val, 1);
        assert_eq!(stored.description, "First fruit");
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = BoundedLruCache::new(2);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests"), Some(&0.0));
        assert_eq!(metrics.get("cache_hits"), Some(&0.0));
        assert_eq!(metrics.get("cache_misses"), Some(&0.0));
        assert_eq!(metrics.get("capacity"), Some(&2.0));

        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple").unwrap();
        cache.get(&"banana").unwrap();
        let _ = cache.get(&"cherry");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&2.0));
        assert_eq!(metrics.get("cache_misses"), Some(&1.0));
        assert_eq!(metrics.get("requests"), Some(&3.0));
        assert_eq!(metrics.get("promotions"), Some(&2.0));
        assert_eq!(metrics.get("utilization"), Some(&1.0));

        cache.put("cherry", 3);
        cache.put("cherry", 4);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("insertions"), Some(&3.0));
        assert_eq!(metrics.get("updates"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_promotion_of_head_is_not_counted() {
        let mut cache = BoundedLruCache::new(2);
        cache.put("a", 1);
        cache.get(&"a").unwrap();
        cache.get(&"a").unwrap();
        assert_eq!(cache.lru_metrics().promotions, 0);
        assert_eq!(cache.lru_metrics().core.cache_hits, 2);
    }

    #[test]
    fn test_lru_custom_hasher_via_init() {
        let config = BoundedLruCacheConfig { capacity: 3 };
        let mut cache: BoundedLruCache<u64, u64, DefaultHashBuilder> =
            BoundedLruCache::init(config, Some(DefaultHashBuilder::default()));
        for i in 0..10 {
            cache.put(i, i * 10);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(keys(&cache), [9, 8, 7]);
    }

    #[test]
    fn test_lru_debug_output() {
        let mut cache = BoundedLruCache::new(4);
        cache.put(1, 1);
        assert_eq!(
            format!("{:?}", cache),
            "BoundedLruCache { capacity: 4, len: 1 }"
        );
    }

    #[test]
    fn test_lru_iter_is_exact_size() {
        let mut cache = BoundedLruCache::new(4);
        for i in 0..3 {
            cache.put(i, i);
        }
        let iter = cache.iter();
        assert_eq!(iter.len(), 3);
        let collected: Vec<(&i32, &i32)> = (&cache).into_iter().collect();
        assert_eq!(collected, [(&2, &2), (&1, &1), (&0, &0)]);
    }

    #[test]
    fn test_lru_heavy_churn_keeps_invariants() {
        let mut cache = BoundedLruCache::new(16);
        for i in 0u32..2_000 {
            let key = (i * 7919) % 64;
            match i % 5 {
                0 | 1 => cache.put(key, i),
                2 => {
                    let _ = cache.get(&key);
                }
                3 => {
                    let _ = cache.remove(&key);
                }
                _ => {
                    let _ = cache.pop_lru();
                }
            }
            assert!(cache.len() <= 16);
        }
        assert!(cache.check_invariants().is_ok());
    }
}
