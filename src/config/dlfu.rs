//! Configuration for the decaying least-frequently-used (DLFU) cache.

use core::fmt;
use core::num::NonZeroUsize;

/// The decay time constant `T`, expressed as a tri-state rather than a bare
/// float.
///
/// `T` tunes continuously between pure LRU (`T → 0`) and pure LFU
/// (`T → ∞`); both ends are degenerate limits of the same amortized-decay
/// math rather than genuinely different algorithms, but representing them
/// as a raw `f64` would let a caller construct a cache with a negative or
/// `NaN` time constant and corrupt the increment math the first time it
/// grows. Pinning the two limits down as variants makes them unrepresentable
/// as anything but what they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// `T = 0`: each touch makes its entry the most-recently-used; eviction
    /// order degenerates to pure LRU.
    Lru,
    /// `T = ∞`: the increment never grows; eviction order degenerates to
    /// pure LFU, with the metadata tier still retaining history.
    Lfu,
    /// A finite, strictly positive time constant. The effective history
    /// window is approximately `T * size` accesses.
    Finite(f64),
}

impl Decay {
    /// Returns the per-access growth factor `alpha = exp(1 / (T * size))`
    /// for this decay setting, given the cache-tier capacity.
    ///
    /// `Lru` and `Lfu` both return `1.0`: neither evaluates the formula, so
    /// there's no finite `t` to validate here. Call [`Decay::is_valid`]
    /// before constructing a `Finite` decay if it came from outside input.
    pub(crate) fn alpha(&self, size: NonZeroUsize) -> f64 {
        match self {
            Decay::Lru | Decay::Lfu => 1.0,
            Decay::Finite(t) => exp(1.0 / (t * size.get() as f64)),
        }
    }

    /// `true` for the `Lru` short-circuit: touches assign priority rather
    /// than accumulate it.
    pub(crate) fn is_lru(&self) -> bool {
        matches!(self, Decay::Lru)
    }

    /// Validates a candidate finite time constant: must be finite and
    /// non-negative. `Lru`/`Lfu` are always valid.
    pub(crate) fn is_valid(&self) -> bool {
        match self {
            Decay::Lru | Decay::Lfu => true,
            Decay::Finite(t) => t.is_finite() && *t >= 0.0,
        }
    }
}

// `core` has no transcendental functions. With `std` enabled, `f64::exp` is
// available; in a pure `no_std` build we fall back to `libm`, matching how
// other `no_std` crates in this ecosystem source exp/ln/etc.
fn exp(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.exp()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::exp(x)
    }
}

/// Configuration for a [`crate::dlfu::DlfuCache`].
///
/// # Examples
///
/// ```
/// use dlfu_cache::config::{Decay, DlfuCacheConfig};
/// use core::num::NonZeroUsize;
///
/// let config = DlfuCacheConfig::new(NonZeroUsize::new(100).unwrap(), Decay::Finite(4.0));
/// assert_eq!(config.size().get(), 100);
/// assert_eq!(config.msize(), 100);
/// ```
#[derive(Clone, Copy)]
pub struct DlfuCacheConfig {
    size: NonZeroUsize,
    decay: Decay,
    msize: usize,
}

impl DlfuCacheConfig {
    /// Creates a configuration with `msize` defaulted to `size`.
    ///
    /// Panics in debug builds if `decay` is an invalid `Finite` time
    /// constant (negative or NaN); use [`DlfuCacheConfig::try_new`] to
    /// handle that case explicitly instead.
    pub fn new(size: NonZeroUsize, decay: Decay) -> Self {
        debug_assert!(decay.is_valid(), "invalid decay time constant");
        Self {
            size,
            decay,
            msize: size.get(),
        }
    }

    /// Creates a configuration, rejecting an invalid `Finite` time constant
    /// instead of asserting.
    pub fn try_new(size: NonZeroUsize, decay: Decay) -> Result<Self, crate::error::CacheError> {
        if !decay.is_valid() {
            return Err(crate::error::CacheError::InvalidDecay);
        }
        Ok(Self {
            size,
            decay,
            msize: size.get(),
        })
    }

    /// Overrides the metadata-tier capacity.
    pub fn with_msize(mut self, msize: usize) -> Self {
        self.msize = msize;
        self
    }

    /// Capacity of the cache tier.
    pub fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Capacity of the metadata tier.
    pub fn msize(&self) -> usize {
        self.msize
    }

    /// The decay time constant.
    pub fn decay(&self) -> Decay {
        self.decay
    }
}

impl fmt::Debug for DlfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DlfuCacheConfig")
            .field("size", &self.size)
            .field("decay", &self.decay)
            .field("msize", &self.msize)
            .finish()
    }
}
