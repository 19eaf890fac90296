//! Shared test utilities for the factorisation modules
use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

/// Seeded U(0, 1) matrix.
pub fn random_nonnegative(shape: (usize, usize), seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::random_using(shape, Uniform::new(0.0, 1.0), &mut rng)
}

/// The 3x4 matrix used as the reference factorisation example.
pub fn reference_matrix() -> Array2<f64> {
    Array2::from_shape_vec(
        (3, 4),
        vec![20.0, 0.0, 30.0, 0.0, 0.0, 16.0, 1.0, 9.0, 0.0, 10.0, 6.0, 11.0],
    )
    .unwrap()
}
