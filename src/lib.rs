#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Module Map
//!
//! Three layers, leaves first:
//!
//! 1. [`pqueue`] — a priority queue storing entries ordered by a numeric
//!    priority; a min-orientation (top = minimum = most evictable). Exposes
//!    top-peek, push, pull (remove top or a referenced entry), an atomic
//!    push-plus-pull `swap`, and per-entry re-position.
//! 2. [`dictpqueue`] — a mapping view layered on a `pqueue`: keyed
//!    insertion, keyed lookup, keyed replacement, uniform priority rescale.
//! 3. [`dlfu`] — a mapping from key to value of bounded capacity, backed by
//!    two `dictpqueue`s: the cache tier (holds values) and the metadata
//!    tier (holds decayed counts for evicted keys). Maintains the shared
//!    increment and amortizes decay.
//!
//! A lookup consults the cache tier first, then the metadata tier; an
//! insertion may promote a key from metadata to cache, evict a key from
//! cache to metadata, and evict the lowest-priority metadata entry outright.
//! All ordering decisions reduce to priority-queue comparisons.

#![no_std]

extern crate alloc;

/// Generic binary min-heap over an arena of slots, addressable by stable
/// handle.
///
/// This is internal infrastructure: [`dictpqueue`] and [`dlfu`] are built
/// on it, but it has no notion of keys or capacity limits of its own.
pub mod pqueue;

/// A [`pqueue::PQueue`] with a hash index layered on top, so entries can be
/// addressed directly by key rather than only by handle or by being on top.
pub mod dictpqueue;

/// The decaying least-frequently-used cache itself.
pub mod dlfu;

/// Cache configuration: capacity, decay time constant, metadata-tier sizing.
pub mod config;

/// `BTreeMap`-based metrics reporting.
pub mod metrics;

/// The construction-time error type.
pub mod error;

pub use config::Decay;
pub use dlfu::{DlfuCache, Residency};
pub use error::CacheError;
