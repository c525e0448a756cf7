//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Number of `put`s that replaced the value of a resident key
    pub updates: u64,

    /// Number of accesses that moved an entry to the front of the recency
    /// order. Accesses to the entry that is already most recent do not count.
    pub promotions: u64,

    /// Number of `put`s dropped because the cache has zero capacity
    pub rejected_insertions: u64,
}

impl LruCacheMetrics {
    /// Creates a zeroed set of LRU counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an in-place value replacement.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry being moved to the most recently used position.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a write that a zero-capacity cache discarded.
    pub fn record_rejection(&mut self) {
        self.rejected_insertions += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert(
            "rejected_insertions".to_string(),
            self.rejected_insertions as f64,
        );
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
