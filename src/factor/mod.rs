pub mod factorizer;
pub mod gradient;
pub mod init;
pub mod subproblem;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use factorizer::{factorize, factorize_owned};
pub use gradient::{frobenius_norm, projected_gradient, reconstruction_error};
pub use init::{random_factors, Initialization};
pub use subproblem::SubproblemSolver;
pub use types::{Factorization, NmfError, StopReason, SubproblemResult};
