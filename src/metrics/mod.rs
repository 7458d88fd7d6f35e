//! Cache Metrics System
//!
//! Provides BTreeMap-based metrics reporting for the cache.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several critical reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and benchmarking comparisons
//! - **Stable serialization**: JSON/CSV exports have predictable key ordering
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference (O(log n) vs O(1)) is negligible with a
//! handful of metric keys, but the deterministic behavior is invaluable for
//! reproducible tests.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;

pub mod dlfu;

pub use dlfu::DlfuCacheMetrics;

/// Trait implemented by the cache for metrics reporting.
///
/// Uses `BTreeMap` to ensure deterministic ordering of metrics, which is
/// essential for reproducible tests and consistent logged output.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification.
    fn algorithm_name(&self) -> &'static str;
}
