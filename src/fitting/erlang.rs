//! Erlang fitter — phase-count estimation by method of moments or a
//! closed-form approximate MLE, with a configurable rounding policy and
//! phase cap.
//!
//! Purpose
//! -------
//! Estimate `(rate, phase)` for an Erlang from a sample vector:
//! 1. a continuous phase estimate — MOM `mean²/variance`, or the
//!    Choi–Wette closed-form likelihood approximation
//!    `(3 − s + √((s−3)² + 24s)) / (12s)` with
//!    `s = ln(mean) − mean(ln xᵢ)` — avoiding any iterative root-finding;
//! 2. clamp to `max_phase`, apply the rounding policy, clamp below to 1;
//! 3. `rate = phase / mean`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero sample variance (MOM) and a zero log-statistic (MLE) are floored
//!   to `f64::EPSILON` rather than surfaced; `s ≥ 0` holds by Jensen's
//!   inequality, so the floor only engages on effectively constant samples,
//!   where the estimate saturates at `max_phase`.
//! - The MLE path takes logarithms and therefore requires strictly positive
//!   samples; MOM tolerates zeros as long as the mean is positive.

use ndarray::ArrayView1;

use crate::distribution::{Erlang, PhaseTypeDist};
use crate::fitting::{
    errors::{FitError, FitResult},
    validation::{sample_mean, sample_variance, validate_positive, validate_samples},
    Fitter,
};

/// Phase-count estimator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErlangMethod {
    /// Closed-form approximate maximum likelihood (Choi–Wette).
    #[default]
    Mle,
    /// Method of moments, `mean² / variance`.
    Mom,
}

/// Policy for turning the continuous phase estimate into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round half away from zero (`f64::round`).
    #[default]
    Round,
    /// Round up.
    Ceil,
    /// Round down.
    Floor,
}

impl Rounding {
    fn apply(self, estimate: f64) -> f64 {
        match self {
            Rounding::Round => estimate.round(),
            Rounding::Ceil => estimate.ceil(),
            Rounding::Floor => estimate.floor(),
        }
    }
}

/// Erlang-family fitter configuration. Stateless per call; reusable across
/// sample sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErlangFitter {
    /// Phase estimator.
    pub method: ErlangMethod,
    /// Integer rounding policy for the phase estimate.
    pub rounding: Rounding,
    /// Upper clamp on the continuous phase estimate (≥ 1).
    pub max_phase: u32,
}

impl Default for ErlangFitter {
    fn default() -> Self {
        ErlangFitter { method: ErlangMethod::default(), rounding: Rounding::default(), max_phase: 1000 }
    }
}

impl ErlangFitter {
    /// Construct a validated fitter configuration.
    ///
    /// # Errors
    /// - [`FitError::InvalidMaxPhase`] if `max_phase == 0`.
    pub fn new(method: ErlangMethod, rounding: Rounding, max_phase: u32) -> FitResult<Self> {
        if max_phase == 0 {
            return Err(FitError::InvalidMaxPhase { value: max_phase });
        }
        Ok(ErlangFitter { method, rounding, max_phase })
    }

    /// Fit and return the concrete [`Erlang`] type.
    ///
    /// # Errors
    /// - Sample validation errors; [`FitError::NonPositiveSample`] on the
    ///   MLE path; [`FitError::ZeroMean`]; [`FitError::Dist`] when the
    ///   estimated rate is rejected.
    pub fn fit_erlang(&self, samples: ArrayView1<'_, f64>) -> FitResult<Erlang> {
        validate_samples(samples)?;
        let mean = sample_mean(samples)?;
        if mean == 0.0 {
            return Err(FitError::ZeroMean);
        }
        let estimate = match self.method {
            ErlangMethod::Mom => self.mom_phase(samples)?,
            ErlangMethod::Mle => self.mle_phase(samples)?,
        };
        let clamped = estimate.min(f64::from(self.max_phase));
        let phase = self.rounding.apply(clamped).max(1.0) as u32;
        let rate = f64::from(phase) / mean;
        Ok(Erlang::new(rate, phase)?)
    }

    /// Continuous phase estimate by method of moments, `mean²/variance`,
    /// with the variance floored to `f64::EPSILON` when it vanishes.
    fn mom_phase(&self, samples: ArrayView1<'_, f64>) -> FitResult<f64> {
        let mean = sample_mean(samples)?;
        let mut variance = sample_variance(samples);
        if variance == 0.0 {
            variance = f64::EPSILON;
        }
        Ok(mean * mean / variance)
    }

    /// Continuous phase estimate by the Choi–Wette closed-form likelihood
    /// approximation, with the log-statistic floored like the MOM variance.
    fn mle_phase(&self, samples: ArrayView1<'_, f64>) -> FitResult<f64> {
        validate_positive(samples)?;
        let mean = sample_mean(samples)?;
        let mean_log = samples.mapv(f64::ln).mean().ok_or(FitError::EmptySamples)?;
        let mut s = mean.ln() - mean_log;
        if s <= 0.0 {
            s = f64::EPSILON;
        }
        Ok((3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s))
    }
}

impl Fitter for ErlangFitter {
    fn fit(&self, samples: ArrayView1<'_, f64>) -> FitResult<PhaseTypeDist> {
        Ok(PhaseTypeDist::Erlang(self.fit_erlang(samples)?))
    }
}
