//! Phase-type distribution models: Exponential, Erlang, Hyper-Erlang, MAP.
//!
//! Purpose
//! -------
//! Represent the absorption-time distributions produced by the fitting layer
//! and expose them through one query contract: density, cumulative
//! probability, raw moments, mean, and variance.
//!
//! Key behaviors
//! -------------
//! - Validate all family parameters at construction; a constructed instance
//!   is immutable and always well-formed.
//! - Memoize raw moments per instance via [`moments::MomentCache`].
//! - Evaluate densities in the log domain (`statrs` `ln_gamma`) where large
//!   phase counts would overflow naive factorials.
//! - Expose the Markov-chain view (initial-phase vector, sub-generator
//!   transition matrix) for the Erlang and Hyper-Erlang families, and the
//!   `(d0, d1)` generator pair for MAP.
//!
//! Conventions
//! -----------
//! - Negative query points have zero density and zero cumulative mass for
//!   every family; `pdf`/`cdf` never error.
//! - Matrices are `nalgebra::DMatrix<f64>`; initial-phase vectors are row
//!   vectors so the phase-type moment formula reads left to right.
//! - Hyper-Erlang branch probabilities are validated individually but are
//!   **not** required to sum to 1; the mixture faithfully reflects whatever
//!   weights it was constructed with.
//!
//! Downstream usage
//! ----------------
//! - The `fitting` module constructs these types and returns them behind the
//!   [`PhaseTypeDist`] tagged enum.
//! - Consumers (plot overlays, exporters) need only the [`PhaseType`] trait
//!   plus `Display` for a human-readable parameter rendering.

pub mod erlang;
pub mod errors;
pub mod exponential;
pub mod hyper_erlang;
pub mod map;
pub mod moments;

pub use erlang::Erlang;
pub use errors::{DistError, DistResult};
pub use exponential::Exponential;
pub use hyper_erlang::{HyperErlang, HyperErlangBranch};
pub use map::Map;

/// Query contract shared by all phase-type distribution families.
///
/// `moment(k)` returns the k-th **raw** moment for `k ≥ 1`, computed once
/// per instance and cached. `mean` and `variance` are derived from the first
/// two raw moments and inherit the caching.
pub trait PhaseType {
    /// k-th raw moment, `E[X^k]`, for integer order `k ≥ 1`.
    fn moment(&self, k: u32) -> f64;

    /// Probability density at `x`; 0 for `x < 0`.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative probability at `x`; 0 for `x < 0`.
    fn cdf(&self, x: f64) -> f64;

    /// First raw moment.
    fn mean(&self) -> f64 {
        self.moment(1)
    }

    /// `E[X²] − E[X]²`.
    fn variance(&self) -> f64 {
        let m1 = self.moment(1);
        self.moment(2) - m1 * m1
    }
}

/// Tagged union over the four distribution families.
///
/// This is the uniform return type of the fitting layer: callers that only
/// need the query contract use the [`PhaseType`] impl, while callers that
/// need family-specific structure (transition matrices, autocorrelation)
/// match on the variant.
#[derive(Debug, Clone)]
pub enum PhaseTypeDist {
    Exponential(Exponential),
    Erlang(Erlang),
    HyperErlang(HyperErlang),
    Map(Map),
}

impl PhaseTypeDist {
    /// Name of the concrete family, for reporting and export headers.
    pub fn family_name(&self) -> &'static str {
        match self {
            PhaseTypeDist::Exponential(_) => "Exponential",
            PhaseTypeDist::Erlang(_) => "Erlang",
            PhaseTypeDist::HyperErlang(_) => "HyperErlang",
            PhaseTypeDist::Map(_) => "MAP",
        }
    }
}

impl PhaseType for PhaseTypeDist {
    fn moment(&self, k: u32) -> f64 {
        match self {
            PhaseTypeDist::Exponential(d) => d.moment(k),
            PhaseTypeDist::Erlang(d) => d.moment(k),
            PhaseTypeDist::HyperErlang(d) => d.moment(k),
            PhaseTypeDist::Map(d) => d.moment(k),
        }
    }

    fn pdf(&self, x: f64) -> f64 {
        match self {
            PhaseTypeDist::Exponential(d) => d.pdf(x),
            PhaseTypeDist::Erlang(d) => d.pdf(x),
            PhaseTypeDist::HyperErlang(d) => d.pdf(x),
            PhaseTypeDist::Map(d) => d.pdf(x),
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            PhaseTypeDist::Exponential(d) => d.cdf(x),
            PhaseTypeDist::Erlang(d) => d.cdf(x),
            PhaseTypeDist::HyperErlang(d) => d.cdf(x),
            PhaseTypeDist::Map(d) => d.cdf(x),
        }
    }
}

impl std::fmt::Display for PhaseTypeDist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseTypeDist::Exponential(d) => std::fmt::Display::fmt(d, f),
            PhaseTypeDist::Erlang(d) => std::fmt::Display::fmt(d, f),
            PhaseTypeDist::HyperErlang(d) => std::fmt::Display::fmt(d, f),
            PhaseTypeDist::Map(d) => std::fmt::Display::fmt(d, f),
        }
    }
}
