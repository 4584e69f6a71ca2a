//! Markovian Arrival Process — inter-arrival times driven by a hidden
//! two-generator Markov chain.
//!
//! Purpose
//! -------
//! Represent a stationary MAP by its generator components: `d0` collects
//! transition rates without an arrival, `d1` transition rates that produce
//! an arrival. Queries describe the time to the next arrival with the
//! process started from (an approximation of) steady state.
//!
//! Key behaviors
//! -------------
//! - Derives the fundamental matrix `M = (−d0)⁻¹`, the embedded
//!   post-arrival chain `P = M·d1`, and a stationary row approximated by
//!   raising `P` to a fixed large power (see below).
//! - pdf/cdf via the matrix exponential of `d0·x`; raw moments via powers
//!   of `M`; lag-k autocorrelation of inter-arrival times via powers of
//!   `P`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `d0` and `d1` are square, of identical shape, with finite entries;
//!   `d0` is invertible. All checked at construction.
//! - The stationary row is the first row of `P^1000`, renormalized to unit
//!   mass — not an exact `πP = π` solve. This mirrors the fixed-power approximation the fitting
//!   pipeline was validated against; it is fragile for slowly mixing
//!   chains, where a convergence-checked linear solve would be the sound
//!   replacement.

use nalgebra::{DMatrix, DVector, RowDVector};

use crate::distribution::{
    errors::{DistError, DistResult},
    moments::{factorial, MomentCache},
    PhaseType,
};

/// Fixed exponent used to approximate the stationary row of the embedded
/// chain.
const LIMIT_POWER: u32 = 1000;

/// Stationary Markovian Arrival Process defined by generator components
/// `(d0, d1)`.
#[derive(Debug, Clone)]
pub struct Map {
    d0: DMatrix<f64>,
    d1: DMatrix<f64>,
    dim: usize,
    /// `(−d0)⁻¹`; entry `(i, j)` is the expected time spent in phase `j`
    /// before the next arrival when starting in phase `i`.
    fundamental: DMatrix<f64>,
    /// Embedded phase-transition matrix at arrival epochs, `M·d1`.
    embedded: DMatrix<f64>,
    /// `P^1000` — every row approximates the stationary distribution.
    limit_prob: DMatrix<f64>,
    /// First row of `limit_prob`, renormalized to unit mass. The power
    /// approximation leaves the raw row a few ulps away from summing to 1,
    /// which would leak a negative `cdf(0)`.
    stationary: RowDVector<f64>,
    moments: MomentCache,
}

fn check_finite(name: &'static str, matrix: &DMatrix<f64>) -> DistResult<()> {
    for row in 0..matrix.nrows() {
        for col in 0..matrix.ncols() {
            let value = matrix[(row, col)];
            if !value.is_finite() {
                return Err(DistError::NonFiniteEntry { matrix: name, row, col, value });
            }
        }
    }
    Ok(())
}

impl Map {
    /// Construct a validated MAP from its generator components.
    ///
    /// # Errors
    /// - [`DistError::NonSquareMatrix`] if `d0` is not square.
    /// - [`DistError::ShapeMismatch`] if `d1`'s shape differs from `d0`'s.
    /// - [`DistError::NonFiniteEntry`] if either matrix contains NaN/±inf.
    /// - [`DistError::SingularMatrix`] if `d0` cannot be inverted.
    pub fn new(d0: DMatrix<f64>, d1: DMatrix<f64>) -> DistResult<Self> {
        if d0.nrows() != d0.ncols() {
            return Err(DistError::NonSquareMatrix { rows: d0.nrows(), cols: d0.ncols() });
        }
        if d0.shape() != d1.shape() {
            return Err(DistError::ShapeMismatch { d0: d0.shape(), d1: d1.shape() });
        }
        check_finite("d0", &d0)?;
        check_finite("d1", &d1)?;
        let dim = d0.nrows();
        let fundamental =
            d0.map(|v| -v).try_inverse().ok_or(DistError::SingularMatrix)?;
        let embedded = &fundamental * &d1;
        let limit_prob = embedded.pow(LIMIT_POWER);
        let mut stationary = limit_prob.row(0).into_owned();
        let mass = stationary.sum();
        stationary /= mass;
        Ok(Map {
            d0,
            d1,
            dim,
            fundamental,
            embedded,
            limit_prob,
            stationary,
            moments: MomentCache::new(),
        })
    }

    /// Number of hidden phases.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The generator components `(d0, d1)` the process was built from.
    pub fn trans_matrices(&self) -> (&DMatrix<f64>, &DMatrix<f64>) {
        (&self.d0, &self.d1)
    }

    /// The power-approximated limit matrix `P^1000`.
    pub fn limit_prob(&self) -> &DMatrix<f64> {
        &self.limit_prob
    }

    /// Lag-k autocorrelation of consecutive inter-arrival times:
    /// `(π·M·Pᵏ·M·1 − mean²) / variance`.
    pub fn acf(&self, k: u32) -> f64 {
        let ones = DVector::repeat(self.dim, 1.0);
        let joint = (&self.stationary
            * &self.fundamental
            * self.embedded.pow(k)
            * &self.fundamental
            * ones)[(0, 0)];
        let mean = self.mean();
        (joint - mean * mean) / self.variance()
    }
}

impl PhaseType for Map {
    /// `π · Mᵏ · 1 · k!`.
    fn moment(&self, k: u32) -> f64 {
        self.moments.get_or_compute(k, || {
            let ones = DVector::repeat(self.dim, 1.0);
            (&self.stationary * self.fundamental.pow(k) * ones)[(0, 0)] * factorial(k)
        })
    }

    /// Arrival rate at time `x` from steady state: `π · e^(d0·x) · (−d0·1)`.
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let ones = DVector::repeat(self.dim, 1.0);
        let exit = self.d0.map(|v| -v) * ones;
        (&self.stationary * (&self.d0 * x).exp() * exit)[(0, 0)]
    }

    /// `1 − π · e^(d0·x) · 1`, clamped into [0, 1] against floating-point
    /// residue in the matrix exponential.
    fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        let ones = DVector::repeat(self.dim, 1.0);
        (1.0 - (&self.stationary * (&self.d0 * x).exp() * ones)[(0, 0)]).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MAP(dim = {}, mean = {})", self.dim, self.mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Construction validation: squareness, shape agreement, finiteness,
    //   and singularity of d0.
    // - Probabilistic sanity of pdf/cdf/moments on the reference generator
    //   pair, including total mass and the stationarity of the limit rows.
    // - Finiteness and bounds of the lag autocorrelation.
    // -------------------------------------------------------------------------

    fn reference_map() -> Map {
        let d0 = dmatrix![-5.0, 2.0; 1.0, -3.0];
        let d1 = dmatrix![3.0, 0.0; 0.0, 2.0];
        Map::new(d0, d1).unwrap()
    }

    #[test]
    fn rejects_malformed_generator_pairs() {
        let square = dmatrix![-1.0, 1.0; 1.0, -1.0];
        let rect = DMatrix::from_row_slice(2, 3, &[0.0; 6]);
        assert!(matches!(
            Map::new(rect.clone(), rect).unwrap_err(),
            DistError::NonSquareMatrix { rows: 2, cols: 3 }
        ));

        let small = dmatrix![1.0];
        assert!(matches!(
            Map::new(square.clone(), small).unwrap_err(),
            DistError::ShapeMismatch { .. }
        ));

        let nan = dmatrix![f64::NAN, 0.0; 0.0, 0.0];
        assert!(matches!(
            Map::new(nan, square.clone()).unwrap_err(),
            DistError::NonFiniteEntry { matrix: "d0", .. }
        ));

        let singular = dmatrix![1.0, 1.0; 1.0, 1.0];
        assert_eq!(Map::new(singular, square).unwrap_err(), DistError::SingularMatrix);
    }

    #[test]
    fn limit_rows_are_probability_vectors() {
        let map = reference_map();
        let limit = map.limit_prob();
        assert_eq!(limit.shape(), (2, 2));
        for row in 0..2 {
            let sum: f64 = (0..2).map(|col| limit[(row, col)]).sum();
            assert_relative_eq!(sum, 1.0, max_relative = 1e-9);
            for col in 0..2 {
                assert!(limit[(row, col)] >= 0.0);
            }
        }
    }

    #[test]
    fn density_and_cumulative_are_probabilistically_sane() {
        let map = reference_map();
        assert!(map.pdf(0.0) >= 0.0);
        let mut previous = 0.0;
        for &x in &[0.0, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0] {
            let c = map.cdf(x);
            assert!((0.0..=1.0).contains(&c), "cdf({x}) = {c} out of range");
            assert!(c + 1e-12 >= previous, "cdf must be non-decreasing");
            previous = c;
        }
        // Essentially all mass is reached far in the tail.
        assert_relative_eq!(map.cdf(50.0), 1.0, max_relative = 1e-6);
    }

    #[test]
    fn cumulative_mass_at_origin_is_zero() {
        // The raw first row of P^1000 sums to 1 only up to rounding; without
        // renormalization cdf(0) comes out a few ulps negative.
        let map = reference_map();
        let at_origin = map.cdf(0.0);
        assert!(at_origin >= 0.0, "cdf(0) = {at_origin} must not be negative");
        assert!(at_origin < 1e-12, "cdf(0) = {at_origin} must carry no mass");
    }

    #[test]
    fn moments_are_positive() {
        let map = reference_map();
        assert!(map.mean() > 0.0);
        assert!(map.variance() > 0.0);
        assert!(map.moment(3) > 0.0);
    }

    #[test]
    fn mean_matches_numerical_tail_integral() {
        // E[X] = ∫ (1 − cdf(x)) dx for a non-negative variable.
        let map = reference_map();
        let dx = 2e-3;
        let mut integral = 0.0;
        let mut x = 0.0;
        while x < 15.0 {
            // Midpoint rule keeps the step count modest at good accuracy.
            integral += (1.0 - map.cdf(x + 0.5 * dx)) * dx;
            x += dx;
        }
        assert_relative_eq!(map.mean(), integral, max_relative = 1e-3);
    }

    #[test]
    fn acf_is_finite_and_bounded() {
        let map = reference_map();
        for k in 1..=5u32 {
            let rho = map.acf(k);
            assert!(rho.is_finite());
            assert!(rho.abs() <= 1.0 + 1e-9, "acf({k}) = {rho} exceeds unit bound");
        }
    }

    #[test]
    fn accessors_round_trip_generators() {
        let d0 = dmatrix![-5.0, 2.0; 1.0, -3.0];
        let d1 = dmatrix![3.0, 0.0; 0.0, 2.0];
        let map = Map::new(d0.clone(), d1.clone()).unwrap();
        let (got_d0, got_d1) = map.trans_matrices();
        assert_eq!(got_d0, &d0);
        assert_eq!(got_d1, &d1);
        assert_eq!(map.dim(), 2);
    }
}
