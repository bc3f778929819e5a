//! Injectable source of ignition thresholds
//!
//! Stochastic spread never touches ambient global randomness. Every threshold
//! comes from a `UniformSource`, so a seeded `StdRng` gives reproducible runs
//! and tests can pin the threshold entirely.

use rand::{Rng, RngCore};

/// Draws uniform values from a half-open range
pub trait UniformSource {
    /// Next value in `[low, high)`; callers guarantee `low < high`
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.random_range(low..high)
    }
}

/// Source that always returns the same threshold
///
/// Ignores the requested range. With `FixedThreshold(t)` the stochastic rule
/// becomes "ignite wherever normalised risk exceeds `t`".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedThreshold(pub f64);

impl UniformSource for FixedThreshold {
    #[inline]
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        self.0
    }
}
