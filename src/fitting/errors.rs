//! Errors for the fitting engine (sample validation, estimator
//! configuration, clustering degeneracies, and unsupported families).
//!
//! This module defines [`FitError`], raised at the start of a `fit` call or
//! propagated from distribution construction. Two concerns are kept
//! distinguishable for callers:
//! - **validation failures** (bad samples or configuration), and
//! - **[`FitError::Unsupported`]**, the deliberate "not implemented" outcome
//!   of the MAP fitter, so a caller can report a missing capability instead
//!   of bad input.
//!
//! Zero sample variance and a zero log-statistic are *not* errors: the
//! estimators substitute a tiny positive floor locally (the same floor in
//! every family) and proceed.

use crate::distribution::DistError;
use crate::fitting::Family;

/// Result alias for fitting paths that may produce [`FitError`].
pub type FitResult<T> = Result<T, FitError>;

/// Unified error type for the fitting engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    // ---- Sample validation ----
    /// The sample vector is empty.
    EmptySamples,

    /// A sample is NaN/±inf.
    NonFiniteSample { index: usize, value: f64 },

    /// A sample is ≤ 0 where the estimator takes logarithms.
    NonPositiveSample { index: usize, value: f64 },

    /// The sample mean is zero; no positive rate can be estimated.
    ZeroMean,

    // ---- Configuration validation ----
    /// The phase cap must be at least 1.
    InvalidMaxPhase { value: u32 },

    /// The requested cluster count must be at least 1.
    InvalidPeaks { value: usize },

    /// More clusters requested than distinct sample values exist.
    TooManyClusters { peaks: usize, distinct: usize },

    // ---- Clustering ----
    /// The partition produced an empty cluster; no branch weight can be
    /// assigned to it.
    DegenerateClusters { peaks: usize },

    // ---- Capability ----
    /// The selected family has no fitting algorithm.
    Unsupported { family: Family },

    // ---- Distribution construction ----
    /// The estimated parameters were rejected by the distribution layer.
    Dist(DistError),
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::Dist(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::EmptySamples => {
                write!(f, "Sample vector is empty.")
            }
            FitError::NonFiniteSample { index, value } => {
                write!(f, "Sample at index {index} is non-finite: {value}")
            }
            FitError::NonPositiveSample { index, value } => {
                write!(
                    f,
                    "Sample at index {index} is non-positive ({value}); the MLE phase \
                     estimator requires strictly positive samples"
                )
            }
            FitError::ZeroMean => {
                write!(f, "Sample mean is zero; cannot estimate a positive rate.")
            }
            FitError::InvalidMaxPhase { value } => {
                write!(f, "max_phase must be at least 1; got: {value}")
            }
            FitError::InvalidPeaks { value } => {
                write!(f, "peaks must be at least 1; got: {value}")
            }
            FitError::TooManyClusters { peaks, distinct } => {
                write!(
                    f,
                    "Requested {peaks} clusters but the samples contain only {distinct} \
                     distinct values"
                )
            }
            FitError::DegenerateClusters { peaks } => {
                write!(f, "Clustering into {peaks} groups produced an empty cluster.")
            }
            FitError::Unsupported { family } => {
                write!(f, "Fitting is not supported for the {family} family.")
            }
            FitError::Dist(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl From<DistError> for FitError {
    fn from(err: DistError) -> FitError {
        FitError::Dist(err)
    }
}
