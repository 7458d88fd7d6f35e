//! Cache Configuration Module
//!
//! Configuration for the DLFU cache: capacity, decay time constant, and
//! metadata-tier sizing. As with the rest of this crate, configuration is a
//! plain, `Copy` struct rather than a builder with hidden state — construct
//! it and pass it to the cache constructor.
//!
//! # Examples
//!
//! ```
//! use dlfu_cache::config::{Decay, DlfuCacheConfig};
//! use dlfu_cache::DlfuCache;
//! use core::num::NonZeroUsize;
//!
//! let config = DlfuCacheConfig::new(NonZeroUsize::new(1000).unwrap(), Decay::Finite(4.0));
//! let cache: DlfuCache<u64, &str> = DlfuCache::from_config(config);
//! ```

pub mod dlfu;

pub use dlfu::{Decay, DlfuCacheConfig};
