//! Errors for phase-type distribution construction (parameter validation and
//! matrix sanity checks).
//!
//! This module defines [`DistError`], the error type raised when a
//! distribution is constructed with malformed parameters. All variants carry
//! the offending value (and its position, where one exists) so callers can
//! render a user-facing message without re-deriving context.
//!
//! ## Conventions
//! - Rates must be **finite and strictly positive**.
//! - Phases are **positive integers** (`u32 ≥ 1`).
//! - Branch probabilities lie **strictly inside (0, 1)**.
//! - MAP generator matrices must be square, of identical shape, finite, and
//!   the no-arrival component must be invertible.
//! - Construction never partially initializes an instance: validation runs
//!   before any derived state is computed.

/// Result alias for distribution-construction paths that may produce
/// [`DistError`].
pub type DistResult<T> = Result<T, DistError>;

/// Unified error type for phase-type distribution construction.
///
/// Covers scalar parameter validation (rates, phases, branch probabilities)
/// and matrix-level checks for MAP generators. Implements `Display`/`Error`
/// so it can be surfaced directly or wrapped by the fitting layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Scalar parameters ----
    /// Rate must be finite and strictly positive.
    InvalidRate { value: f64 },

    /// Phase count must be a positive integer.
    InvalidPhase { value: u32 },

    /// Branch probability must lie strictly in (0, 1).
    InvalidBranchProb { index: usize, value: f64 },

    /// A Hyper-Erlang must own at least one branch.
    EmptyBranches,

    // ---- MAP matrices ----
    /// A MAP generator component is not square.
    NonSquareMatrix { rows: usize, cols: usize },

    /// The two MAP generator components have different shapes.
    ShapeMismatch { d0: (usize, usize), d1: (usize, usize) },

    /// A MAP generator entry is NaN/±inf.
    NonFiniteEntry { matrix: &'static str, row: usize, col: usize, value: f64 },

    /// The no-arrival generator `d0` is singular; the embedded chain and the
    /// fundamental matrix are undefined.
    SingularMatrix,
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistError::InvalidRate { value } => {
                write!(f, "Rate must be finite and > 0; got: {value}")
            }
            DistError::InvalidPhase { value } => {
                write!(f, "Phase must be a positive integer; got: {value}")
            }
            DistError::InvalidBranchProb { index, value } => {
                write!(
                    f,
                    "Branch probability at index {index} must lie strictly in (0, 1); got: {value}"
                )
            }
            DistError::EmptyBranches => {
                write!(f, "Hyper-Erlang branch list is empty.")
            }
            DistError::NonSquareMatrix { rows, cols } => {
                write!(f, "MAP generator must be square; got shape ({rows}, {cols})")
            }
            DistError::ShapeMismatch { d0, d1 } => {
                write!(
                    f,
                    "MAP generators must have identical shapes; got d0: {:?}, d1: {:?}",
                    d0, d1
                )
            }
            DistError::NonFiniteEntry { matrix, row, col, value } => {
                write!(f, "MAP generator {matrix} has non-finite entry at ({row}, {col}): {value}")
            }
            DistError::SingularMatrix => {
                write!(f, "MAP no-arrival generator d0 is singular and cannot be inverted.")
            }
        }
    }
}
