//! MAP fitter — an intentional stub.
//!
//! No MAP fitting algorithm is implemented. The fitter exists so the MAP
//! family participates in configuration and dispatch, and so the outcome is
//! a distinct, reportable [`FitError::Unsupported`] rather than a panic or
//! a silently wrong distribution. [`crate::distribution::Map`] itself is
//! fully functional for directly constructed generator pairs.

use ndarray::ArrayView1;

use crate::distribution::PhaseTypeDist;
use crate::fitting::{
    errors::{FitError, FitResult},
    validation::validate_samples,
    Family, Fitter,
};

/// Placeholder MAP fitter; `fit` always reports the missing capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapFitter;

impl Fitter for MapFitter {
    /// Validates the samples, then reports [`FitError::Unsupported`].
    ///
    /// Validation still runs first so malformed input is reported as such
    /// rather than masked by the capability error.
    fn fit(&self, samples: ArrayView1<'_, f64>) -> FitResult<PhaseTypeDist> {
        validate_samples(samples)?;
        Err(FitError::Unsupported { family: Family::Map })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn reports_unsupported_not_a_validation_error() {
        let samples = array![1.0, 2.0, 3.0];
        assert_eq!(
            MapFitter.fit(samples.view()).unwrap_err(),
            FitError::Unsupported { family: Family::Map }
        );
    }

    #[test]
    fn malformed_input_is_still_a_validation_error() {
        let samples = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(MapFitter.fit(samples.view()).unwrap_err(), FitError::EmptySamples);
    }
}
