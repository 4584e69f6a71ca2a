//! Fitting engine: one estimation strategy per distribution family.
//!
//! Purpose
//! -------
//! Transform a one-dimensional sample vector into a validated phase-type
//! distribution. Each family has a dedicated fitter type implementing
//! [`Fitter`]; the [`fit`] front door selects the family from an explicit,
//! immutable [`FitterConfig`] and consults only the options relevant to it.
//!
//! Key behaviors
//! -------------
//! - Shared sample validation (non-empty, finite) runs before every
//!   family-specific estimator; one-dimensionality is enforced by the
//!   `ArrayView1` parameter type.
//! - Fitters hold configuration only — no sample-derived state — so a
//!   single fitter value can be reused across any number of fit calls.
//! - Numeric degeneracies (zero variance, zero log-statistic) are floored
//!   locally and identically across families, never surfaced as errors.
//! - The MAP family deliberately has no algorithm and reports
//!   [`FitError::Unsupported`].
//!
//! Downstream usage
//! ----------------
//! - Orchestrating callers (dashboards, exporters) construct a
//!   [`FitterConfig`] from user input and hand the resulting
//!   [`PhaseTypeDist`] to the query/plot/export side.
//! - Library callers wanting concrete types use the per-family inherent
//!   methods (`fit_exponential`, `fit_erlang`, `fit_hyper_erlang`).

pub mod erlang;
pub mod errors;
pub mod exponential;
pub mod hyper_erlang;
pub(crate) mod kmeans;
pub mod map;
pub mod validation;

pub use erlang::{ErlangFitter, ErlangMethod, Rounding};
pub use errors::{FitError, FitResult};
pub use exponential::ExponentialFitter;
pub use hyper_erlang::HyperErlangFitter;
pub use map::MapFitter;

use ndarray::ArrayView1;

use crate::distribution::PhaseTypeDist;

/// Distribution family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Family {
    #[default]
    Exponential,
    Erlang,
    HyperErlang,
    Map,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Family::Exponential => "Exponential",
            Family::Erlang => "Erlang",
            Family::HyperErlang => "HyperErlang",
            Family::Map => "MAP",
        };
        f.write_str(name)
    }
}

/// Estimation strategy for one distribution family.
///
/// Implementations are stateless per call: `fit` is a pure function of the
/// samples and the fitter's configuration.
pub trait Fitter {
    /// Fit the family to `samples` and return the distribution behind the
    /// uniform [`PhaseTypeDist`] tag.
    fn fit(&self, samples: ArrayView1<'_, f64>) -> FitResult<PhaseTypeDist>;
}

/// Complete fitting configuration.
///
/// Only the options relevant to the selected family are consulted:
/// `method`/`rounding`/`max_phase` by the Erlang and Hyper-Erlang fitters,
/// `peaks` by the Hyper-Erlang fitter alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitterConfig {
    /// Which family to fit.
    pub family: Family,
    /// Erlang phase estimator (Erlang, Hyper-Erlang).
    pub method: ErlangMethod,
    /// Phase rounding policy (Erlang, Hyper-Erlang).
    pub rounding: Rounding,
    /// Phase cap (Erlang, Hyper-Erlang).
    pub max_phase: u32,
    /// Cluster count (Hyper-Erlang only).
    pub peaks: usize,
}

impl Default for FitterConfig {
    fn default() -> Self {
        FitterConfig {
            family: Family::default(),
            method: ErlangMethod::default(),
            rounding: Rounding::default(),
            max_phase: 1000,
            peaks: 2,
        }
    }
}

/// Fit the configured family to `samples`.
///
/// # Errors
/// Sample-validation and configuration errors from the selected fitter, or
/// [`FitError::Unsupported`] for the MAP family.
pub fn fit(samples: ArrayView1<'_, f64>, config: &FitterConfig) -> FitResult<PhaseTypeDist> {
    match config.family {
        Family::Exponential => ExponentialFitter.fit(samples),
        Family::Erlang => {
            ErlangFitter::new(config.method, config.rounding, config.max_phase)?.fit(samples)
        }
        Family::HyperErlang => {
            HyperErlangFitter::new(config.peaks, config.method, config.rounding, config.max_phase)?
                .fit(samples)
        }
        Family::Map => MapFitter.fit(samples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::PhaseType;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Family dispatch through the `fit` front door, including the MAP
    //   capability error.
    // - Irrelevant options being ignored for the selected family.
    // -------------------------------------------------------------------------

    #[test]
    fn dispatches_to_each_family() {
        let samples = array![1.0, 1.2, 0.8, 5.0, 5.2, 4.8];

        let exponential =
            fit(samples.view(), &FitterConfig { family: Family::Exponential, ..Default::default() })
                .unwrap();
        assert_eq!(exponential.family_name(), "Exponential");

        let erlang =
            fit(samples.view(), &FitterConfig { family: Family::Erlang, ..Default::default() })
                .unwrap();
        assert_eq!(erlang.family_name(), "Erlang");

        let hyper = fit(
            samples.view(),
            &FitterConfig { family: Family::HyperErlang, peaks: 2, ..Default::default() },
        )
        .unwrap();
        assert_eq!(hyper.family_name(), "HyperErlang");

        assert_eq!(
            fit(samples.view(), &FitterConfig { family: Family::Map, ..Default::default() })
                .unwrap_err(),
            FitError::Unsupported { family: Family::Map }
        );
    }

    #[test]
    fn exponential_ignores_erlang_options() {
        let samples = array![1.0, 3.0];
        let quirky = FitterConfig {
            family: Family::Exponential,
            method: ErlangMethod::Mom,
            rounding: Rounding::Ceil,
            max_phase: 7,
            peaks: 99,
        };
        let dist = fit(samples.view(), &quirky).unwrap();
        assert_relative_eq!(dist.mean(), 2.0);
    }

    #[test]
    fn fitted_distribution_reproduces_sample_mean() {
        let samples = array![2.0, 2.0, 2.0, 2.0];
        let config = FitterConfig { family: Family::Erlang, max_phase: 10, ..Default::default() };
        let dist = fit(samples.view(), &config).unwrap();
        // rate = phase/mean ties the fitted mean to the sample mean exactly.
        assert_relative_eq!(dist.mean(), 2.0, max_relative = 1e-12);
    }
}
