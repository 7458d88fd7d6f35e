//! End-to-end correctness scenarios for the DLFU cache.
//!
//! Each test sets up a small, deterministic cache and a fixed access
//! sequence, then asserts exactly which keys survive. Mirrors the explicit,
//! single-step-traced style used for the underlying eviction policies this
//! crate generalizes.

use core::num::NonZeroUsize;
use dlfu_cache::config::{Decay, DlfuCacheConfig};
use dlfu_cache::DlfuCache;

fn cache<V>(size: usize, decay: Decay, msize: usize) -> DlfuCache<&'static str, V> {
    let config = DlfuCacheConfig::new(NonZeroUsize::new(size).unwrap(), decay).with_msize(msize);
    DlfuCache::from_config(config)
}

/// S1 — LFU limit: with T = infinity and no metadata tier, eviction reduces
/// to plain access-count comparison.
#[test]
fn s1_lfu_limit_evicts_lowest_count() {
    let mut c = cache(2, Decay::Lfu, 0);

    c.set("A", 1);
    c.set("B", 2);
    c.get(&"A");
    c.get(&"A");
    c.get(&"A");
    c.get(&"B");

    c.set("C", 3);

    assert_eq!(c.get(&"A"), Some(&1));
    assert_eq!(c.get(&"C"), Some(&3));
    assert_eq!(c.get(&"B"), None);
}

/// S2 — LRU limit: with T = 0, every touch makes its entry the most
/// recently used, so eviction reduces to classical LRU order.
#[test]
fn s2_lru_limit_evicts_least_recently_used() {
    let mut c = cache(2, Decay::Lru, 0);

    c.set("A", 1);
    c.set("B", 2);
    c.get(&"A");
    c.set("C", 3);

    assert_eq!(c.get(&"A"), Some(&1));
    assert_eq!(c.get(&"C"), Some(&3));
    assert_eq!(c.get(&"B"), None);
}

/// S3 — a key evicted to the metadata tier produces a metahit (still a miss
/// to the caller) and, once reinserted, regains cache residency carrying
/// its accumulated history with it.
#[test]
fn s3_metadata_retention_and_promotion() {
    let mut c = cache(2, Decay::Finite(4.0), 2);

    c.set("A", 1);
    c.set("B", 2);
    for _ in 0..5 {
        c.get(&"A");
    }

    c.set("C", 3); // evicts B (lower count than A) to meta
    assert_eq!(c.contains(&"B"), dlfu_cache::Residency::InMeta);

    c.set("D", 4); // evicts the lower of {A, C} to meta; meta now holds two keys
    assert_eq!(c.meta_len(), 2);

    let before_mhit = c.mhit_count();
    assert_eq!(c.get(&"B"), None); // metahit: still a miss to the caller
    assert_eq!(c.mhit_count(), before_mhit + 1);

    c.set("B", 2); // promotion: B re-enters the cache tier with retained history
    assert_eq!(c.contains(&"B"), dlfu_cache::Residency::InCache);

    assert_eq!(c.hit_count(), 5);
    assert_eq!(c.miss_count(), 0);
}

/// S4 — rescale stability: repeatedly touching one key while another key's
/// occasional touches advance the shared increment through many rescale
/// boundaries must never corrupt it — it stays cache-resident and every
/// observable counter stays in its documented range throughout. (The exact
/// closed-form numerical check for the decayed count itself lives next to
/// the implementation, since it needs to read raw priorities that aren't
/// part of the public API.)
#[test]
fn s4_rescale_stability() {
    let mut c = cache(64, Decay::Finite(1.0), 64);

    c.set("k0", 0);
    c.set("other", 0);

    for _ in 0..10_000 {
        c.get(&"k0");
        c.get(&"other");
        assert!(c.increment() >= 1.0 && c.increment() < 2.0);
        assert!(c.cache_len() <= c.size().get());
    }

    assert_eq!(c.get(&"k0"), Some(&0));
    assert_eq!(c.contains(&"k0"), dlfu_cache::Residency::InCache);
}

/// S5 — explicit removal frees a cache-tier slot without any backfill from
/// the metadata tier; the metadata tier is untouched by a removal of a
/// cache-resident key.
#[test]
fn s5_explicit_removal_has_no_backfill() {
    let mut c = cache(2, Decay::Finite(4.0), 2);

    c.set("A", 1);
    c.set("B", 2);
    assert!(c.remove(&"A"));

    assert_eq!(c.meta_len(), 0);
    assert_eq!(c.cache_len(), 1);

    c.set("C", 3);

    assert_eq!(c.cache_len(), 2);
    assert_eq!(c.get(&"B"), Some(&2));
    assert_eq!(c.get(&"C"), Some(&3));
    assert_eq!(c.get(&"A"), None);
}

/// S6 — scan immunity: a long run of distinct, never-repeated keys should
/// not be able to dislodge a small set of genuinely popular incumbents once
/// T is large enough that a single touch can't outweigh history.
#[test]
fn s6_scan_immunity() {
    let mut c = cache(4, Decay::Finite(16.0), 4);

    for k in ["A", "B", "C", "D"] {
        c.set(k, 0);
        for _ in 0..8 {
            c.get(&k);
        }
    }

    for i in 0..200 {
        let key: &'static str = Box::leak(format!("scan{i}").into_boxed_str());
        c.set(key, i);
    }

    let mut survivors = 0;
    for k in ["A", "B", "C", "D"] {
        if c.contains(&k) == dlfu_cache::Residency::InCache {
            survivors += 1;
        }
    }
    assert_eq!(survivors, 4, "warmed incumbents must survive a long scan");
}

/// Overwriting a key already resident in the cache tier updates the value
/// without counting as an access (priority untouched).
#[test]
fn overwrite_in_cache_does_not_bump_priority() {
    let mut c = cache(2, Decay::Finite(4.0), 2);

    c.set("A", 1);
    let hits_before = c.hit_count();
    c.set("A", 100);

    assert_eq!(c.get(&"A"), Some(&100));
    assert_eq!(c.hit_count(), hits_before + 1); // only the get() above counts
}

/// `contains` is read-only: it must not mutate counters or priorities.
#[test]
fn contains_does_not_mutate_state() {
    let mut c = cache(2, Decay::Finite(4.0), 2);
    c.set("A", 1);

    let hits_before = c.hit_count();
    let misses_before = c.miss_count();
    assert_eq!(c.contains(&"A"), dlfu_cache::Residency::InCache);
    assert_eq!(c.contains(&"Z"), dlfu_cache::Residency::Absent);

    assert_eq!(c.hit_count(), hits_before);
    assert_eq!(c.miss_count(), misses_before);
}

#[test]
fn total_miss_on_absent_key() {
    let mut c: DlfuCache<&str, i32> = cache(2, Decay::Finite(4.0), 2);
    assert_eq!(c.get(&"nope"), None);
    assert_eq!(c.miss_count(), 1);
}
