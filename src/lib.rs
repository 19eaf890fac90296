//! Non-negative matrix factorisation by alternating projected-gradient
//! non-negative least squares.
//!
//! Given V (m x n) and non-negative starting factors W0 (m x k), H0 (k x n),
//! [`factorize`] alternates NNLS sub-solves over W and H until the projected
//! gradient norm drops below `tolerance` times its initial value, the outer
//! iteration budget is spent, or the time limit passes.
//!
//! ```rust,no_run
//! use nmf_pg::{factorize, random_factors, Initialization, NmfConfig};
//! use ndarray::array;
//!
//! let v = array![[20.0, 0.0, 30.0, 0.0], [0.0, 16.0, 1.0, 9.0], [0.0, 10.0, 6.0, 11.0]];
//! let (w0, h0) = random_factors(3, 4, 5, Initialization::HalfNormal, 1);
//! let result = factorize(v.view(), w0.view(), h0.view(), &NmfConfig::default()).unwrap();
//! assert_eq!(result.w.dim(), (3, 5));
//! ```

pub mod config;
pub mod factor;

pub use config::{NmfConfig, RunConfig};
pub use factor::{
    factorize, factorize_owned, random_factors, reconstruction_error, Factorization,
    Initialization, NmfError, StopReason, SubproblemResult, SubproblemSolver,
};
