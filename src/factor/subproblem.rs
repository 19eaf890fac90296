use log::trace;
use ndarray::{Array2, ArrayView2};

use super::gradient::{frobenius_norm, project_nonnegative, projected_gradient};
use super::types::SubproblemResult;

/// Sufficient-decrease constant of the Armijo test.
const SIGMA: f64 = 0.99;
/// Step-size shrink/grow factor.
const BETA: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineSearchMode {
    /// First trial step failed the decrease test, shrink until it passes.
    Reduce,
    /// First trial step passed, grow while it keeps passing.
    Expand,
}

/// Projected-gradient NNLS for a single block (Lin 2007).
///
/// Minimizes 0.5 * ||V - W*H||_F^2 over H >= 0 with W held fixed.
/// The W block of a factorisation is solved by passing the transposed
/// system (V^T, H^T, W^T), since (W*H)^T = H^T * W^T.
#[derive(Debug, Clone)]
pub struct SubproblemSolver {
    pub tol: f64,
    pub max_outer: usize,
    pub max_inner: usize,
}

impl SubproblemSolver {
    pub fn new(tol: f64, max_outer: usize, max_inner: usize) -> Self {
        Self {
            tol,
            max_outer,
            max_inner,
        }
    }

    /// V: (m, n), W: (m, k), H_init: (k, n) → H: (k, n)
    ///
    /// Shapes are not checked here; incompatible inputs panic inside the
    /// first matrix product.
    pub fn solve(
        &self,
        v: ArrayView2<'_, f64>,
        w: ArrayView2<'_, f64>,
        h_init: ArrayView2<'_, f64>,
    ) -> SubproblemResult {
        let wtv = w.t().dot(&v);
        let wtw = w.t().dot(&w);

        let mut h = h_init.to_owned();
        let mut grad = Array2::zeros(h.raw_dim());
        let mut alpha = 1.0;
        let mut ok = false;
        let mut iterations = 0;

        while iterations < self.max_outer {
            grad = projected_gradient(&(wtw.dot(&h) - &wtv), &h);
            let norm = frobenius_norm(&grad);
            trace!(
                "subproblem iter {}: projected gradient {:.6e}, alpha {:.3e}",
                iterations,
                norm,
                alpha
            );
            if norm < self.tol {
                break;
            }

            let mut mode = LineSearchMode::Reduce;
            // Last step in expand mode that still passed the decrease test.
            // `None` stands for the current H.
            let mut h_prev: Option<Array2<f64>> = None;

            for j in 0..self.max_inner {
                let mut h_next = &h - &(&grad * alpha);
                project_nonnegative(&mut h_next);

                let sufficient = sufficient_decrease(&wtw, &grad, &h, &h_next);

                if j == 0 {
                    mode = if sufficient {
                        LineSearchMode::Expand
                    } else {
                        LineSearchMode::Reduce
                    };
                }

                match mode {
                    LineSearchMode::Reduce => {
                        if sufficient {
                            h = h_next;
                            ok = true;
                            break;
                        }
                        alpha *= BETA;
                    }
                    LineSearchMode::Expand => {
                        // Exact equality: the step no longer moves H at all.
                        let stalled = h_prev.as_ref().unwrap_or(&h) == &h_next;
                        if !sufficient || stalled {
                            // Only a reduce-mode acceptance counts as success.
                            if let Some(prev) = h_prev.take() {
                                h = prev;
                            }
                            break;
                        }
                        alpha /= BETA;
                        h_prev = Some(h_next);
                    }
                }
            }

            iterations += 1;
        }

        SubproblemResult {
            h,
            grad,
            iterations,
            ok,
        }
    }
}

/// Armijo test on the quadratic model along d = H_next - H:
/// sigma * <G, d> + 0.5 * <WtW * d, d> < 0
fn sufficient_decrease(
    wtw: &Array2<f64>,
    grad: &Array2<f64>,
    h: &Array2<f64>,
    h_next: &Array2<f64>,
) -> bool {
    let d = h_next - h;
    let gd = (grad * &d).sum();
    let dqd = (&wtw.dot(&d) * &d).sum();
    SIGMA * gd + 0.5 * dqd < 0.0
}
