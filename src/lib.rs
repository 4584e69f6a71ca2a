//! phasefit — phase-type distribution fitting for duration and
//! inter-arrival samples.
//!
//! Purpose
//! -------
//! Fit probabilistic models to empirical non-negative duration samples using
//! the phase-type family — Exponential, Erlang, Hyper-Erlang (weighted
//! mixture of Erlangs), and the Markovian Arrival Process — and expose every
//! fitted model through one query contract: density, cumulative probability,
//! raw moments, mean, and variance.
//!
//! Key behaviors
//! -------------
//! - `distribution`: validated, immutable model types with lazily memoized
//!   moments, closed-form densities, and the Markov-chain view (initial
//!   vectors, sub-generators, MAP generator pairs).
//! - `fitting`: one estimator per family — exponential MLE, Erlang
//!   method-of-moments and closed-form approximate MLE with rounding
//!   policies and a phase cap, cluster-then-fit Hyper-Erlang decomposition,
//!   and a deliberately unsupported MAP stub.
//!
//! Invariants & assumptions
//! ------------------------
//! - All computation is synchronous, single-threaded, and CPU-bound; a fit
//!   is a pure function of its samples and configuration.
//! - Configuration is explicit and immutable ([`fitting::FitterConfig`]);
//!   no process-wide state exists.
//! - Distribution instances are read-only after construction; their only
//!   interior mutation is the private moment cache, which makes them
//!   `!Sync` — concurrent users each hold their own instance.
//!
//! Downstream usage
//! ----------------
//! - Interactive frontends supply a finite 1-D sample array plus scalar
//!   configuration and consume a [`distribution::PhaseTypeDist`] (query
//!   contract + `Display` for export) or a typed error.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its formulas and validation;
//!   `tests/integration_fit_pipeline.rs` covers statistical recovery on
//!   seeded simulated samples end to end.

pub mod distribution;
pub mod fitting;
