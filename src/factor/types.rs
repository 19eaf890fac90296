use std::error::Error;
use std::fmt;

use ndarray::Array2;

/// Why the outer factorisation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Projected gradient norm fell below `tolerance * initial gradient norm`.
    Converged,
    /// Wall-clock budget expired before convergence.
    TimeLimit,
    /// `max_iter` outer iterations completed without convergence.
    MaxIterations,
}

/// Result of a full factorisation: V ≈ W * H
#[derive(Debug, Clone)]
pub struct Factorization {
    pub w: Array2<f64>,
    pub h: Array2<f64>,
    /// Both sub-solves of the last completed outer iteration accepted a step.
    pub ok: bool,
    /// Number of completed outer iterations.
    pub iterations: usize,
    pub status: StopReason,
}

/// Result from one projected-gradient NNLS sub-solve.
#[derive(Debug, Clone)]
pub struct SubproblemResult {
    pub h: Array2<f64>,
    /// Projected gradient at the last tolerance check.
    pub grad: Array2<f64>,
    /// Outer sub-iterations completed before the tolerance test passed.
    pub iterations: usize,
    pub ok: bool,
}

#[derive(Debug)]
pub enum NmfError {
    DimensionMismatch(String),
}

impl fmt::Display for NmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NmfError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
        }
    }
}

impl Error for NmfError {}
