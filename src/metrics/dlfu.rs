//! DLFU Cache Metrics
//!
//! Metrics specific to the decaying least-frequently-used cache algorithm:
//! the three access outcomes (cachehit / metahit / totalmiss), the current
//! increment and how often it has been rescaled, and tier occupancy.

extern crate alloc;

use super::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// DLFU-specific metrics.
#[derive(Debug, Clone)]
pub struct DlfuCacheMetrics {
    /// Number of `get` calls that were a cachehit.
    pub hit_count: u64,

    /// Number of `get` calls that were a metahit.
    pub mhit_count: u64,

    /// Number of `get` calls that were a totalmiss.
    pub miss_count: u64,

    /// Number of times the increment/priority rescale has run.
    pub rescale_count: u64,

    /// Current value of the increment `C`.
    pub increment: f64,

    /// Current number of entries held in the cache tier.
    pub cache_len: usize,

    /// Current number of entries held in the metadata tier.
    pub meta_len: usize,
}

impl DlfuCacheMetrics {
    /// Creates a fresh metrics instance with `C` at its initial value of 1.0.
    pub fn new() -> Self {
        Self {
            hit_count: 0,
            mhit_count: 0,
            miss_count: 0,
            rescale_count: 0,
            increment: 1.0,
            cache_len: 0,
            meta_len: 0,
        }
    }

    /// Records a cachehit.
    pub fn record_hit(&mut self) {
        self.hit_count += 1;
    }

    /// Records a metahit.
    pub fn record_mhit(&mut self) {
        self.mhit_count += 1;
    }

    /// Records a totalmiss.
    pub fn record_miss(&mut self) {
        self.miss_count += 1;
    }

    /// Records a rescale event.
    pub fn record_rescale(&mut self) {
        self.rescale_count += 1;
    }

    /// Refreshes the current increment and tier occupancy snapshot.
    pub fn sync(&mut self, increment: f64, cache_len: usize, meta_len: usize) {
        self.increment = increment;
        self.cache_len = cache_len;
        self.meta_len = meta_len;
    }

    /// Total `get` calls observed so far.
    pub fn requests(&self) -> u64 {
        self.hit_count + self.mhit_count + self.miss_count
    }

    /// Fraction of `get` calls that were a cachehit.
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            self.hit_count as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Fraction of `get` calls that were a metahit.
    pub fn mhit_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            self.mhit_count as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Fraction of `get` calls that were a totalmiss.
    pub fn miss_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            self.miss_count as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Converts DLFU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_len".to_string(), self.cache_len as f64);
        metrics.insert("hit_count".to_string(), self.hit_count as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("increment".to_string(), self.increment);
        metrics.insert("meta_len".to_string(), self.meta_len as f64);
        metrics.insert("mhit_count".to_string(), self.mhit_count as f64);
        metrics.insert("mhit_rate".to_string(), self.mhit_rate());
        metrics.insert("miss_count".to_string(), self.miss_count as f64);
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("rescale_count".to_string(), self.rescale_count as f64);
        metrics.insert("requests".to_string(), self.requests() as f64);
        metrics
    }
}

impl Default for DlfuCacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheMetrics for DlfuCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "DLFU"
    }
}
