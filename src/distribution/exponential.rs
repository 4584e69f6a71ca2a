//! Exponential distribution — the single-phase member of the family.
//!
//! The exponential is the degenerate phase-type process with one transient
//! state and rate `λ`: `pdf(x) = λ·e^(−λx)`, `cdf(x) = 1 − e^(−λx)`,
//! `E[X^k] = k!/λ^k`. It anchors the query contract in closed form and is
//! the reference case for `Erlang(rate, 1)`.

use crate::distribution::{
    errors::{DistError, DistResult},
    moments::{factorial, MomentCache},
    PhaseType,
};

/// Exponential distribution with rate `λ > 0`.
///
/// Invariant: `rate` is finite and strictly positive, enforced at
/// construction. Instances are immutable; the moment cache is the only
/// internal mutation.
#[derive(Debug, Clone)]
pub struct Exponential {
    /// Rate parameter `λ` (strictly positive, finite).
    pub rate: f64,
    moments: MomentCache,
}

impl Exponential {
    /// Construct a validated exponential distribution.
    ///
    /// # Errors
    /// - [`DistError::InvalidRate`] if `rate` is non-finite or `≤ 0`.
    pub fn new(rate: f64) -> DistResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DistError::InvalidRate { value: rate });
        }
        Ok(Exponential { rate, moments: MomentCache::new() })
    }
}

impl PhaseType for Exponential {
    /// `k! / λ^k`.
    fn moment(&self, k: u32) -> f64 {
        self.moments.get_or_compute(k, || factorial(k) / self.rate.powi(k as i32))
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.rate * (-self.rate * x).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        1.0 - (-self.rate * x).exp()
    }
}

impl std::fmt::Display for Exponential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Exponential(rate = {})", self.rate)
    }
}
