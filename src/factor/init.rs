use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::{StandardNormal, Uniform};
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

/// Distribution used to draw initial factor entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Initialization {
    /// |N(0, 1)|
    HalfNormal,
    /// U(0, 1)
    Uniform,
}

/// Draw seeded non-negative starting factors W0: (rows, k), H0: (k, cols).
pub fn random_factors(
    rows: usize,
    cols: usize,
    k: usize,
    init: Initialization,
    seed: u64,
) -> (Array2<f64>, Array2<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let w = draw((rows, k), init, &mut rng);
    let h = draw((k, cols), init, &mut rng);
    (w, h)
}

fn draw<R: Rng>(shape: (usize, usize), init: Initialization, rng: &mut R) -> Array2<f64> {
    match init {
        Initialization::HalfNormal => {
            let a: Array2<f64> = Array2::random_using(shape, StandardNormal, rng);
            a.mapv_into(f64::abs)
        }
        Initialization::Uniform => Array2::random_using(shape, Uniform::new(0.0, 1.0), rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_factors_shapes_and_sign() {
        for init in [Initialization::HalfNormal, Initialization::Uniform] {
            let (w, h) = random_factors(3, 4, 5, init, 1);
            assert_eq!(w.dim(), (3, 5));
            assert_eq!(h.dim(), (5, 4));
            assert!(w.iter().chain(h.iter()).all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn test_random_factors_deterministic() {
        let (w1, h1) = random_factors(6, 7, 2, Initialization::HalfNormal, 42);
        let (w2, h2) = random_factors(6, 7, 2, Initialization::HalfNormal, 42);
        assert_eq!(w1, w2);
        assert_eq!(h1, h2);

        let (w3, _) = random_factors(6, 7, 2, Initialization::HalfNormal, 43);
        assert_ne!(w1, w3);
    }
}
