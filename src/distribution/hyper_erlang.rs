//! Hyper-Erlang distribution — a probabilistic mixture of Erlang branches.
//!
//! Purpose
//! -------
//! Model multi-modal duration data as a branching Markov chain: on entry the
//! process picks branch `b` with probability `prob_b` and then traverses
//! that branch's sequential Erlang stages to absorption. Branch order is
//! structural — it fixes each branch's block inside the stacked transition
//! matrix and the position of its weight in the initial-phase vector.
//!
//! Key behaviors
//! -------------
//! - pdf/cdf in closed form as probability-weighted branch terms.
//! - [`HyperErlang::alpha`] and [`HyperErlang::trans_matrix`] expose the
//!   stacked phase-type representation (initial vector + block-diagonal
//!   sub-generator).
//! - Raw moments through the generic phase-type formula
//!   `α · (−T)⁻ᵏ · 1 · k!`, which cross-checks the closed-form mixture in
//!   tests.
//!
//! Invariants & assumptions
//! ------------------------
//! - The branch list is non-empty and each branch probability lies strictly
//!   in (0, 1). Probabilities are **not** required to sum to 1: the mixture
//!   reflects whatever weights it was given, and the cdf is only a proper
//!   distribution function when they do. The cluster-based fitter always
//!   produces weights summing to 1.
//! - A branch is owned by exactly one mixture; there is no sharing.

use nalgebra::{DMatrix, DVector, RowDVector};

use crate::distribution::{
    erlang::Erlang,
    errors::{DistError, DistResult},
    moments::{factorial, MomentCache},
    PhaseType,
};

/// One weighted Erlang branch of a Hyper-Erlang mixture.
#[derive(Debug, Clone)]
pub struct HyperErlangBranch {
    /// The branch's Erlang distribution.
    pub erlang: Erlang,
    /// Probability of entering this branch (strictly in (0, 1)).
    pub prob: f64,
}

impl HyperErlangBranch {
    /// Construct a validated branch.
    ///
    /// # Errors
    /// - [`DistError::InvalidBranchProb`] if `prob` is non-finite or outside
    ///   the open interval (0, 1). The reported index is 0; the mixture
    ///   constructor re-validates with the true branch position.
    pub fn new(erlang: Erlang, prob: f64) -> DistResult<Self> {
        if !prob.is_finite() || prob <= 0.0 || prob >= 1.0 {
            return Err(DistError::InvalidBranchProb { index: 0, value: prob });
        }
        Ok(HyperErlangBranch { erlang, prob })
    }
}

/// Hyper-Erlang mixture over an ordered, non-empty branch sequence.
#[derive(Debug, Clone)]
pub struct HyperErlang {
    branches: Vec<HyperErlangBranch>,
    /// Total phase count, `Σ branch.erlang.phase`.
    pub phase: u32,
    moments: MomentCache,
}

impl HyperErlang {
    /// Construct a validated mixture from its branches, preserving order.
    ///
    /// # Errors
    /// - [`DistError::EmptyBranches`] if `branches` is empty.
    /// - [`DistError::InvalidBranchProb`] (with the branch's position) if
    ///   any probability falls outside (0, 1).
    pub fn new(branches: Vec<HyperErlangBranch>) -> DistResult<Self> {
        if branches.is_empty() {
            return Err(DistError::EmptyBranches);
        }
        for (index, branch) in branches.iter().enumerate() {
            if !branch.prob.is_finite() || branch.prob <= 0.0 || branch.prob >= 1.0 {
                return Err(DistError::InvalidBranchProb { index, value: branch.prob });
            }
        }
        let phase = branches.iter().map(|b| b.erlang.phase).sum();
        Ok(HyperErlang { branches, phase, moments: MomentCache::new() })
    }

    /// Ordered view of the mixture's branches.
    pub fn branches(&self) -> &[HyperErlangBranch] {
        &self.branches
    }

    /// Initial-phase row vector over the stacked chain: each branch's
    /// probability at the first position of its block, zero elsewhere.
    pub fn alpha(&self) -> RowDVector<f64> {
        let mut alpha = RowDVector::zeros(self.phase as usize);
        let mut pos = 0usize;
        for branch in &self.branches {
            alpha[pos] = branch.prob;
            pos += branch.erlang.phase as usize;
        }
        alpha
    }

    /// Block-diagonal sub-generator assembled from each branch's sequential
    /// chain, in branch order.
    pub fn trans_matrix(&self) -> DMatrix<f64> {
        let n = self.phase as usize;
        let mut generator = DMatrix::zeros(n, n);
        let mut pos = 0usize;
        for branch in &self.branches {
            let block = branch.erlang.trans_matrix();
            let k = branch.erlang.phase as usize;
            generator.view_mut((pos, pos), (k, k)).copy_from(&block);
            pos += k;
        }
        generator
    }
}

impl PhaseType for HyperErlang {
    /// Generic phase-type moment `α · (−T)⁻ᵏ · 1 · k!`.
    fn moment(&self, k: u32) -> f64 {
        self.moments.get_or_compute(k, || {
            let neg_gen = -self.trans_matrix();
            // The sub-generator is upper triangular with −rate < 0 on the
            // diagonal, so the inverse always exists; NaN would only signal
            // a programming error upstream.
            let Some(fundamental) = neg_gen.try_inverse() else {
                return f64::NAN;
            };
            let ones = DVector::repeat(self.phase as usize, 1.0);
            (self.alpha() * fundamental.pow(k) * ones)[(0, 0)] * factorial(k)
        })
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.branches.iter().map(|b| b.prob * b.erlang.pdf(x)).sum()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let weighted_survival: f64 =
            self.branches.iter().map(|b| b.prob * b.erlang.survival(x)).sum();
        1.0 - weighted_survival
    }
}

impl std::fmt::Display for HyperErlang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HyperErlang(")?;
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} * {}", branch.prob, branch.erlang)?;
        }
        write!(f, ")")
    }
}
