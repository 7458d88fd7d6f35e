//! Decaying Least-Frequently-Used (DLFU) cache.
//!
//! DLFU is a fixed-capacity associative store whose eviction policy ranks
//! entries by an exponentially decaying reference count approximating the
//! number of accesses over a sliding window of `T * size` recent lookups.
//! It is parameterized by a decay time constant `T` that continuously tunes
//! behavior between pure LRU (`T → 0`) and pure LFU (`T → ∞`).
//!
//! # How the Algorithm Works
//!
//! Rather than decaying every stored priority on every access — an O(N)
//! operation — DLFU grows a single shared increment `C` geometrically and
//! adds it to the touched entry's priority. Because the *logical* decayed
//! count of an entry is `priority / C`, growing `C` by a factor `alpha` is
//! mathematically identical to multiplying every logical count by `1/alpha`
//! at once. When `C` reaches 2.0 it is halved, along with every stored
//! priority in both tiers — an O(N) rescale that happens roughly every
//! `T * size * ln 2` accesses, making the amortized cost of decay O(1) per
//! access.
//!
//! ```text
//! For each touched entry i on a hit:
//!   priority_i += C
//!   C *= alpha          where alpha = exp(1 / (T * size))
//!   if C >= 2.0: rescale (C /= 2, every priority /= 2)
//! ```
//!
//! ## Two Tiers
//!
//! ```text
//! ┌───────────────────────────────┐        ┌───────────────────────────────┐
//! │  cache tier `c` (size)        │        │  metadata tier `m` (msize)    │
//! │  key -> (value, priority)     │──evict─▶│  key -> priority              │
//! │                                │        │                                │
//! │  DictPQueue<K, V>              │◀promote│  DictPQueue<K, ()>             │
//! └───────────────────────────────┘        └───────────────────────────────┘
//! ```
//!
//! A key evicted from `c` is not forgotten: its decayed count moves to `m`,
//! so that if the key is looked up again (a *metahit*) and subsequently
//! re-inserted, it re-enters `c` with its accumulated history intact rather
//! than starting cold. `m` itself has bounded capacity — the least valuable
//! metadata entry is dropped when a new c-evictee needs a slot.
//!
//! ## Special Cases
//!
//! - `Decay::Lfu` (`T = ∞`): `alpha = 1`, so `C` never grows; this is
//!   classical LFU, still with metadata retention.
//! - `Decay::Lru` (`T = 0`): `alpha = 1` as well, but every touch *assigns*
//!   `C` as the new priority rather than adding to it, so all entries tie on
//!   priority and eviction order falls out entirely from the queue's
//!   secondary (recency) tie-break — exactly LRU order.
//!
//! # Examples
//!
//! ```
//! use dlfu_cache::{DlfuCache, config::Decay};
//! use core::num::NonZeroUsize;
//!
//! let mut cache: DlfuCache<&str, i32> =
//!     DlfuCache::new(NonZeroUsize::new(2).unwrap(), Decay::Finite(4.0));
//!
//! cache.set("a", 1);
//! cache.set("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" has the lowest decayed count now; inserting "c" evicts it to the
//! // metadata tier rather than discarding it outright.
//! cache.set("c", 3);
//! assert_eq!(cache.get(&"b"), None);
//! ```
//!
//! # Thread Safety
//!
//! `DlfuCache` is **not thread-safe**. The contract is single-owner,
//! synchronous access; wrap it in a `Mutex` or `RwLock` for concurrent use.

extern crate alloc;

use crate::config::{Decay, DlfuCacheConfig};
use crate::dictpqueue::DictPQueue;
use crate::metrics::{CacheMetrics, DlfuCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Residency of a key with respect to the cache and metadata tiers.
///
/// `contains` is read-only and never mutates priorities or counters — it is
/// not an access for the purposes of the decay math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residency {
    /// The key is present in the cache tier, with a live value.
    InCache,
    /// The key is present only in the metadata tier: its decayed count is
    /// retained but its value has been discarded.
    InMeta,
    /// The key has never been seen, or has been evicted from both tiers.
    Absent,
}

/// Internal DLFU segment containing the algorithm itself.
///
/// Kept separate from [`DlfuCache`] so the public surface can stay a thin,
/// documented wrapper.
pub(crate) struct DlfuSegment<K, V, S = DefaultHashBuilder> {
    size: NonZeroUsize,
    msize: usize,
    decay: Decay,
    alpha: f64,
    increment: f64,
    c: DictPQueue<K, V, S>,
    m: DictPQueue<K, (), S>,
    metrics: DlfuCacheMetrics,
}

impl<K, V, S> DlfuSegment<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    pub(crate) fn new(config: DlfuCacheConfig) -> Self {
        Self::with_hasher(config, S::default())
    }
}

impl<K, V, S> DlfuSegment<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    pub(crate) fn with_hasher(config: DlfuCacheConfig, hash_builder: S) -> Self
    where
        S: Clone,
    {
        let alpha = config.decay().alpha(config.size());
        Self {
            size: config.size(),
            msize: config.msize(),
            decay: config.decay(),
            alpha,
            increment: 1.0,
            c: DictPQueue::with_hasher(hash_builder.clone()),
            m: DictPQueue::with_hasher(hash_builder),
            metrics: DlfuCacheMetrics::new(),
        }
    }

    fn touched_priority(&self, old_priority: f64) -> f64 {
        if self.decay.is_lru() {
            self.increment
        } else {
            old_priority + self.increment
        }
    }

    fn advance_after_hit(&mut self) {
        self.increment *= self.alpha;
        if self.increment >= 2.0 {
            self.rescale();
        }
    }

    fn rescale(&mut self) {
        self.increment /= 2.0;
        self.c.scale(0.5);
        self.m.scale(0.5);
        self.metrics.record_rescale();
    }

    fn sync_metrics(&mut self) {
        self.metrics.sync(self.increment, self.c.len(), self.m.len());
    }

    /// Implements the access protocol: cachehit, metahit, or totalmiss.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some((_, priority)) = self.c.peek_key(key) {
            let new_priority = self.touched_priority(priority);
            self.c.set_priority(key, new_priority);
            self.metrics.record_hit();
            self.advance_after_hit();
            self.sync_metrics();
            return self.c.get_mut(key).map(|v| &*v);
        }
        if let Some((_, priority)) = self.m.peek_key(key) {
            let new_priority = self.touched_priority(priority);
            self.m.set_priority(key, new_priority);
            self.metrics.record_mhit();
            self.advance_after_hit();
            self.sync_metrics();
            return None;
        }
        self.metrics.record_miss();
        self.sync_metrics();
        None
    }

    /// Implements the insertion protocol: update, direct admission, or the
    /// three-way evict/promote/admit dance.
    pub(crate) fn set(&mut self, key: K, value: V) {
        if let Some(slot) = self.c.get_mut(&key) {
            *slot = value;
            return;
        }
        let new_priority = if let Some((_, p)) = self.m.peek_key(&key) {
            let promoted = p + self.increment;
            self.m.remove(&key);
            promoted
        } else {
            self.increment
        };

        if self.c.len() < self.size.get() {
            self.c.put(key, value, new_priority);
            self.sync_metrics();
            return;
        }

        let evicted = self.c.swap(key, value, new_priority, None::<&K>);
        if let Some((evicted_key, _evicted_value, evicted_priority)) = evicted {
            self.admit_to_meta(evicted_key, evicted_priority);
        }
        self.sync_metrics();
    }

    fn admit_to_meta(&mut self, key: K, priority: f64) {
        if self.msize == 0 {
            return;
        }
        if self.m.len() < self.msize {
            self.m.put(key, (), priority);
        } else {
            // Reference policy: always admit the c-evictee, always drop
            // m's then-current min, even if the c-evictee's priority is
            // itself lower than m's min.
            self.m.swap(key, (), priority, None::<&K>);
        }
    }

    /// Implements explicit deletion: no backfill from `m` into `c`.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = if self.c.remove(key).is_some() {
            true
        } else {
            self.m.remove(key).is_some()
        };
        self.sync_metrics();
        removed
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> Residency
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.c.contains_key(key) {
            Residency::InCache
        } else if self.m.contains_key(key) {
            Residency::InMeta
        } else {
            Residency::Absent
        }
    }

    pub(crate) fn size(&self) -> NonZeroUsize {
        self.size
    }

    pub(crate) fn msize(&self) -> usize {
        self.msize
    }

    pub(crate) fn decay(&self) -> Decay {
        self.decay
    }

    pub(crate) fn increment(&self) -> f64 {
        self.increment
    }

    pub(crate) fn cache_len(&self) -> usize {
        self.c.len()
    }

    pub(crate) fn meta_len(&self) -> usize {
        self.m.len()
    }

    pub(crate) fn hit_count(&self) -> u64 {
        self.metrics.hit_count
    }

    pub(crate) fn mhit_count(&self) -> u64 {
        self.metrics.mhit_count
    }

    pub(crate) fn miss_count(&self) -> u64 {
        self.metrics.miss_count
    }

    pub(crate) fn metrics(&self) -> DlfuCacheMetrics {
        self.metrics.clone()
    }
}

// Implemented manually (rather than derived) so it never requires K/V: Debug.
impl<K, V, S> core::fmt::Debug for DlfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DlfuSegment")
            .field("size", &self.size)
            .field("msize", &self.msize)
            .field("decay", &self.decay)
            .field("increment", &self.increment)
            .field("cache_len", &self.c.len())
            .field("meta_len", &self.m.len())
            .finish()
    }
}

/// A decaying least-frequently-used cache of bounded capacity.
///
/// See the [module-level docs](self) for the algorithm. `S` is the hash
/// builder used by both tiers' key index; it defaults to this crate's
/// default hasher ([`hashbrown`'s][hashbrown::DefaultHashBuilder] when the
/// `hashbrown` feature is enabled, `std`'s `RandomState` otherwise).
#[derive(Debug)]
pub struct DlfuCache<K, V, S = DefaultHashBuilder> {
    segment: DlfuSegment<K, V, S>,
}

impl<K, V> DlfuCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a cache with `size` capacity and the given decay time
    /// constant, defaulting `msize` to `size`.
    pub fn new(size: NonZeroUsize, decay: Decay) -> Self {
        Self::from_config(DlfuCacheConfig::new(size, decay))
    }

    /// Creates a cache from a fully specified configuration.
    pub fn from_config(config: DlfuCacheConfig) -> Self {
        Self {
            segment: DlfuSegment::new(config),
        }
    }
}

impl<K, V, S> DlfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    /// Creates a cache from a configuration, using `S`'s default instance
    /// as the hash builder for both tiers.
    pub fn with_hasher_type(config: DlfuCacheConfig) -> Self {
        Self {
            segment: DlfuSegment::new(config),
        }
    }
}

impl<K, V, S> DlfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Creates a cache from a configuration and an explicit hasher
    /// instance, cloned for use by both tiers' key index.
    pub fn with_hasher(config: DlfuCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: DlfuSegment::with_hasher(config, hash_builder),
        }
    }
}

impl<K, V, S> DlfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Looks up `key`, implementing the cachehit / metahit / totalmiss
    /// access protocol.
    ///
    /// Returns `Some(&value)` on a cachehit. Returns `None` on a metahit or
    /// totalmiss — both are *key-missing* from the caller's point of view;
    /// use [`DlfuCache::contains`] if you need to distinguish them. Every
    /// hit (cachehit or metahit) bumps the touched entry's priority and
    /// advances the shared increment, possibly triggering a rescale.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.segment.get(key)
    }

    /// Inserts or overwrites `key` with `value`.
    ///
    /// If `key` is already in the cache tier, only its value is replaced —
    /// this is not treated as an access. Otherwise the key is admitted,
    /// possibly evicting the cache tier's minimum-priority entry to the
    /// metadata tier, and possibly displacing the metadata tier's own
    /// minimum in turn.
    pub fn set(&mut self, key: K, value: V) {
        self.segment.set(key, value);
    }

    /// Removes `key` from whichever tier holds it.
    ///
    /// Returns `true` if the key was present (in either tier) and has been
    /// removed. The freed cache-tier slot is not backfilled from the
    /// metadata tier; it is filled only by the next `set`.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.segment.remove(key)
    }

    /// Reports which tier `key` currently resides in, without mutating any
    /// state. Not counted as an access.
    pub fn contains<Q>(&self, key: &Q) -> Residency
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.segment.contains(key)
    }

    /// Capacity of the cache tier.
    pub fn size(&self) -> NonZeroUsize {
        self.segment.size()
    }

    /// Capacity of the metadata tier.
    pub fn msize(&self) -> usize {
        self.segment.msize()
    }

    /// The configured decay time constant.
    pub fn decay(&self) -> Decay {
        self.segment.decay()
    }

    /// The current value of the shared increment `C`. Always in `[1.0, 2.0)`
    /// between calls.
    pub fn increment(&self) -> f64 {
        self.segment.increment()
    }

    /// Current number of entries in the cache tier.
    pub fn cache_len(&self) -> usize {
        self.segment.cache_len()
    }

    /// Current number of entries in the metadata tier.
    pub fn meta_len(&self) -> usize {
        self.segment.meta_len()
    }

    /// Total number of cachehits observed.
    pub fn hit_count(&self) -> u64 {
        self.segment.hit_count()
    }

    /// Total number of metahits observed.
    pub fn mhit_count(&self) -> u64 {
        self.segment.mhit_count()
    }

    /// Total number of totalmisses observed.
    pub fn miss_count(&self) -> u64 {
        self.segment.miss_count()
    }
}

impl<K, V, S> CacheMetrics for DlfuCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "DLFU"
    }
}
