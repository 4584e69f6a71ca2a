//! Hyper-Erlang fitter — cluster the samples, then fit an Erlang per
//! cluster.
//!
//! Purpose
//! -------
//! Decompose a multi-modal sample set into `peaks` clusters with 1-D
//! k-means, fit each cluster independently with an internally held
//! [`ErlangFitter`] (same method, rounding policy, and phase cap), and
//! assemble the mixture with empirical branch weights
//! `prob_i = |cluster_i| / n`. Every sample belongs to exactly one cluster,
//! so the weights always sum to 1.
//!
//! Invariants & assumptions
//! ------------------------
//! - Branches are assembled in ascending-centroid order, which fixes the
//!   mixture's block layout deterministically.
//! - A cluster collapsing to a single point degenerates to zero variance;
//!   the per-cluster Erlang fit handles it with the same epsilon floor as
//!   any other sample set.
//! - `peaks` must not exceed the number of distinct sample values. With
//!   `peaks == 1` the single branch weight is 1.0, which branch validation
//!   rejects — a single mode should be fitted as a plain Erlang instead.

use ndarray::{Array1, ArrayView1};

use crate::distribution::{HyperErlang, HyperErlangBranch, PhaseTypeDist};
use crate::fitting::{
    erlang::{ErlangFitter, ErlangMethod, Rounding},
    errors::{FitError, FitResult},
    kmeans::kmeans_1d,
    validation::validate_samples,
    Fitter,
};

/// Hyper-Erlang fitter: cluster count plus the shared per-cluster Erlang
/// configuration. Stateless per call; reusable across sample sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperErlangFitter {
    /// Number of clusters ("peaks") to decompose the samples into (≥ 1).
    pub peaks: usize,
    erlang: ErlangFitter,
}

impl HyperErlangFitter {
    /// Construct a validated fitter configuration.
    ///
    /// # Errors
    /// - [`FitError::InvalidPeaks`] if `peaks == 0`.
    /// - [`FitError::InvalidMaxPhase`] if `max_phase == 0`.
    pub fn new(
        peaks: usize, method: ErlangMethod, rounding: Rounding, max_phase: u32,
    ) -> FitResult<Self> {
        if peaks == 0 {
            return Err(FitError::InvalidPeaks { value: peaks });
        }
        Ok(HyperErlangFitter { peaks, erlang: ErlangFitter::new(method, rounding, max_phase)? })
    }

    /// The per-cluster Erlang configuration.
    pub fn erlang_fitter(&self) -> &ErlangFitter {
        &self.erlang
    }

    /// Fit and return the concrete [`HyperErlang`] type.
    ///
    /// # Errors
    /// - Sample validation errors from [`validate_samples`].
    /// - [`FitError::TooManyClusters`] if `peaks` exceeds the distinct-value
    ///   count.
    /// - Per-cluster Erlang fitting errors (for example
    ///   [`FitError::NonPositiveSample`] on the MLE path).
    /// - [`FitError::Dist`] if a branch weight or parameter is rejected.
    pub fn fit_hyper_erlang(&self, samples: ArrayView1<'_, f64>) -> FitResult<HyperErlang> {
        validate_samples(samples)?;
        let n = samples.len();
        let clusters = kmeans_1d(samples, self.peaks)?;

        let mut branches = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            let prob = cluster.members.len() as f64 / n as f64;
            let subsample = Array1::from(cluster.members);
            let erlang = self.erlang.fit_erlang(subsample.view())?;
            branches.push(HyperErlangBranch::new(erlang, prob)?);
        }
        Ok(HyperErlang::new(branches)?)
    }
}

impl Fitter for HyperErlangFitter {
    fn fit(&self, samples: ArrayView1<'_, f64>) -> FitResult<PhaseTypeDist> {
        Ok(PhaseTypeDist::HyperErlang(self.fit_hyper_erlang(samples)?))
    }
}
