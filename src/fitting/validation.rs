//! Shared sample validation and the small statistics every estimator reads.
//!
//! Every fitter runs [`validate_samples`] before touching the data; the MLE
//! phase estimator additionally runs [`validate_positive`] because it takes
//! logarithms. One-dimensionality is not re-checked at runtime: the fitting
//! API accepts `ArrayView1` only, which is the type-level rendition of the
//! `ndim == 1` precondition.

use ndarray::ArrayView1;

use crate::fitting::errors::{FitError, FitResult};

/// Reject empty and non-finite sample vectors.
///
/// # Errors
/// - [`FitError::EmptySamples`] if the view has length 0.
/// - [`FitError::NonFiniteSample`] for the first NaN/±inf entry.
pub fn validate_samples(samples: ArrayView1<'_, f64>) -> FitResult<()> {
    if samples.is_empty() {
        return Err(FitError::EmptySamples);
    }
    for (index, &value) in samples.iter().enumerate() {
        if !value.is_finite() {
            return Err(FitError::NonFiniteSample { index, value });
        }
    }
    Ok(())
}

/// Reject samples that are not strictly positive.
///
/// # Errors
/// - [`FitError::NonPositiveSample`] for the first entry ≤ 0.
pub fn validate_positive(samples: ArrayView1<'_, f64>) -> FitResult<()> {
    for (index, &value) in samples.iter().enumerate() {
        if value <= 0.0 {
            return Err(FitError::NonPositiveSample { index, value });
        }
    }
    Ok(())
}

/// Sample mean of a non-empty view.
///
/// Callers validate non-emptiness first; an empty view still surfaces as
/// [`FitError::EmptySamples`] rather than a panic.
pub fn sample_mean(samples: ArrayView1<'_, f64>) -> FitResult<f64> {
    samples.mean().ok_or(FitError::EmptySamples)
}

/// Population variance (`ddof = 0`), matching the moment estimator's use of
/// the plain second central moment.
pub fn sample_variance(samples: ArrayView1<'_, f64>) -> f64 {
    samples.var(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn accepts_finite_non_empty_samples() {
        let samples = array![0.5, 1.0, 2.0];
        assert!(validate_samples(samples.view()).is_ok());
    }

    #[test]
    fn rejects_empty_samples() {
        let samples = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(validate_samples(samples.view()).unwrap_err(), FitError::EmptySamples);
    }

    #[test]
    fn rejects_non_finite_samples_with_position() {
        let samples = array![1.0, f64::NAN, 2.0];
        assert!(matches!(
            validate_samples(samples.view()).unwrap_err(),
            FitError::NonFiniteSample { index: 1, .. }
        ));
        let samples = array![1.0, 2.0, f64::INFINITY];
        assert!(matches!(
            validate_samples(samples.view()).unwrap_err(),
            FitError::NonFiniteSample { index: 2, .. }
        ));
    }

    #[test]
    fn rejects_non_positive_samples_with_position() {
        let samples = array![1.0, 0.0, 2.0];
        assert_eq!(
            validate_positive(samples.view()).unwrap_err(),
            FitError::NonPositiveSample { index: 1, value: 0.0 }
        );
    }

    #[test]
    fn mean_and_variance_helpers() {
        let samples = array![1.0, 2.0, 3.0];
        assert_relative_eq!(sample_mean(samples.view()).unwrap(), 2.0);
        assert_relative_eq!(sample_variance(samples.view()), 2.0 / 3.0);
    }
}
