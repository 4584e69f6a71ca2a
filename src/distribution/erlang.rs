//! Erlang distribution — `phase` sequential exponential stages at a common
//! rate.
//!
//! Purpose
//! -------
//! Model the sojourn time of a linear continuous-time Markov chain: `phase`
//! transient states traversed in order, each with exponential holding time
//! at `rate`, absorbing after the last. Equivalent to a Gamma distribution
//! with integer shape, which keeps the cdf in closed form.
//!
//! Key behaviors
//! -------------
//! - pdf evaluated in the log domain via `ln_gamma` so large phase counts
//!   (the fitter caps at a configurable `max_phase`, commonly 1000) do not
//!   overflow `(phase − 1)!`.
//! - cdf through the regularized incomplete gamma function, whose internal
//!   scaling survives `λx` beyond the underflow range of `e^(−λx)`.
//! - Raw moments in rising-factorial form:
//!   `E[X^k] = (∏_{j=phase}^{phase+k−1} j) / rate^k`.
//! - [`Erlang::trans_matrix`] exposes the sub-generator of the sequential
//!   chain for block-diagonal assembly by the Hyper-Erlang mixture.
//!
//! Invariants & assumptions
//! ------------------------
//! - `rate` finite and strictly positive; `phase ≥ 1`. Both enforced at
//!   construction, so query paths never re-validate.
//! - Negative query points carry zero density and zero cumulative mass.

use nalgebra::DMatrix;
use statrs::function::gamma::{gamma_ur, ln_gamma};

use crate::distribution::{
    errors::{DistError, DistResult},
    moments::MomentCache,
    PhaseType,
};

/// Erlang distribution with rate `λ > 0` and integer phase count `k ≥ 1`.
///
/// `Erlang(rate, 1)` coincides with `Exponential(rate)`.
#[derive(Debug, Clone)]
pub struct Erlang {
    /// Common rate of every sequential stage (strictly positive, finite).
    pub rate: f64,
    /// Number of sequential exponential stages (≥ 1).
    pub phase: u32,
    moments: MomentCache,
}

impl Erlang {
    /// Construct a validated Erlang distribution.
    ///
    /// # Errors
    /// - [`DistError::InvalidRate`] if `rate` is non-finite or `≤ 0`.
    /// - [`DistError::InvalidPhase`] if `phase == 0`.
    pub fn new(rate: f64, phase: u32) -> DistResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DistError::InvalidRate { value: rate });
        }
        if phase == 0 {
            return Err(DistError::InvalidPhase { value: phase });
        }
        Ok(Erlang { rate, phase, moments: MomentCache::new() })
    }

    /// Continuous-time sub-generator of the sequential-phase chain:
    /// `−rate` on the diagonal, `+rate` on the superdiagonal, absorbing
    /// after the last phase (no superdiagonal entry on the final row).
    pub fn trans_matrix(&self) -> DMatrix<f64> {
        let n = self.phase as usize;
        let mut generator = DMatrix::zeros(n, n);
        for i in 0..n {
            generator[(i, i)] = -self.rate;
            if i + 1 < n {
                generator[(i, i + 1)] = self.rate;
            }
        }
        generator
    }

    /// Upper-tail survival term `Σ_{i=0}^{phase−1} (λx)^i/i! · e^(−λx)`,
    /// evaluated as the regularized upper incomplete gamma `Q(phase, λx)`.
    /// The naive running-product form seeds with `e^(−λx)`, which underflows
    /// to 0 for `λx ≳ 709` and would snap the cdf to 1 while real tail mass
    /// remains. Shared with the Hyper-Erlang cdf, which weights this term
    /// per branch.
    pub(crate) fn survival(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 1.0;
        }
        gamma_ur(f64::from(self.phase), self.rate * x)
    }
}

impl PhaseType for Erlang {
    /// Rising-factorial moment `(∏_{j=phase}^{phase+k−1} j) / rate^k`.
    fn moment(&self, k: u32) -> f64 {
        self.moments.get_or_compute(k, || {
            let rising: f64 = (self.phase..self.phase + k).map(f64::from).product();
            rising / self.rate.powi(k as i32)
        })
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            // λ^k·x^(k−1) degenerates at the origin: the single-phase case
            // starts at λ, every higher phase starts at 0.
            return if self.phase == 1 { self.rate } else { 0.0 };
        }
        let phase = f64::from(self.phase);
        let log_pdf =
            phase * self.rate.ln() + (phase - 1.0) * x.ln() - self.rate * x - ln_gamma(phase);
        log_pdf.exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        1.0 - self.survival(x)
    }
}

impl std::fmt::Display for Erlang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Erlang(rate = {}, phase = {})", self.rate, self.phase)
    }
}
