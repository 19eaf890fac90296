use std::time::Instant;

use log::{debug, info, warn};
use ndarray::{Array2, ArrayView2};

use crate::config::NmfConfig;

use super::gradient::{projected_gradient, squared_norm};
use super::subproblem::SubproblemSolver;
use super::types::{Factorization, NmfError, StopReason};

/// Floor applied to the tolerance when scaling the initial sub-tolerances.
const MIN_SUB_TOLERANCE: f64 = 0.001;
/// Sub-tolerance shrink factor once a block sub-solve makes no progress.
const TOLERANCE_TIGHTENING: f64 = 0.1;

/// Non-negative matrix factorisation by alternating projected-gradient NNLS.
///
/// Finds W >= 0, H >= 0 minimizing ||V - W*H||_F starting from W0, H0.
///
/// V: (m, n), W0: (m, k), H0: (k, n)
///
/// Reference: Chih-Jen Lin (2007), "Projected Gradient Methods for
/// Non-negative Matrix Factorization", Neural Computation 19:2756.
///
/// Stalling or running out of budget is not an error: it is reported
/// through [`Factorization::ok`] and [`Factorization::status`]. Only
/// incompatible shapes are rejected.
pub fn factorize(
    v: ArrayView2<'_, f64>,
    w0: ArrayView2<'_, f64>,
    h0: ArrayView2<'_, f64>,
    config: &NmfConfig,
) -> Result<Factorization, NmfError> {
    check_shapes(v, w0, h0)?;
    let start = Instant::now();

    let mut w = w0.to_owned();
    let mut h = h0.to_owned();

    // gW = W*H*H^T - V*H^T, gH = W^T*W*H - W^T*V
    let mut grad_w = w.dot(&h.dot(&h.t())) - v.dot(&h.t());
    let mut grad_h = w.t().dot(&w).dot(&h) - w.t().dot(&v);

    // Frobenius norm of the stacked gradient [gW; gH^T]
    let init_grad = (squared_norm(&grad_w) + squared_norm(&grad_h)).sqrt();
    let mut tol_w = config.tolerance.max(MIN_SUB_TOLERANCE) * init_grad;
    let mut tol_h = tol_w;

    let mut ok = false;
    let mut iterations = 0;
    let mut status = StopReason::MaxIterations;

    for iter in 0..config.max_iter {
        grad_w = projected_gradient(&grad_w, &w);
        grad_h = projected_gradient(&grad_h, &h);

        let proj = (squared_norm(&grad_w) + squared_norm(&grad_h)).sqrt();
        if proj < config.tolerance * init_grad {
            status = StopReason::Converged;
            break;
        }
        if start.elapsed() > config.time_limit {
            warn!(
                "Time limit {:?} reached after {} iterations (projected gradient {:.6e})",
                config.time_limit, iter, proj
            );
            status = StopReason::TimeLimit;
            break;
        }

        // W block through the transposed system: V^T ≈ H^T * W^T
        let w_step = SubproblemSolver::new(tol_w, config.max_outer_sub, config.max_inner_sub)
            .solve(v.t(), h.t(), w.t());
        if w_step.iterations == 0 {
            tol_w *= TOLERANCE_TIGHTENING;
        }
        w = w_step.h.reversed_axes();
        grad_w = w_step.grad.reversed_axes();

        let h_step = SubproblemSolver::new(tol_h, config.max_outer_sub, config.max_inner_sub)
            .solve(v, w.view(), h.view());
        if h_step.iterations == 0 {
            tol_h *= TOLERANCE_TIGHTENING;
        }
        h = h_step.h;
        grad_h = h_step.grad;

        ok = w_step.ok && h_step.ok;
        iterations = iter + 1;

        debug!(
            "iter {}: projected gradient {:.6e}, sub-iterations W {} H {}, tol W {:.3e} H {:.3e}",
            iter, proj, w_step.iterations, h_step.iterations, tol_w, tol_h
        );
    }

    info!(
        "Factorisation of {}x{} with rank {} stopped ({:?}) after {} iterations in {:?}, ok: {}",
        v.nrows(),
        v.ncols(),
        w.ncols(),
        status,
        iterations,
        start.elapsed(),
        ok
    );

    Ok(Factorization {
        w,
        h,
        ok,
        iterations,
        status,
    })
}

fn check_shapes(
    v: ArrayView2<'_, f64>,
    w: ArrayView2<'_, f64>,
    h: ArrayView2<'_, f64>,
) -> Result<(), NmfError> {
    let (m, n) = v.dim();
    let (wr, wk) = w.dim();
    let (hk, hc) = h.dim();
    if wr != m || hc != n || wk != hk {
        return Err(NmfError::DimensionMismatch(format!(
            "V is {}x{}, W is {}x{}, H is {}x{}",
            m, n, wr, wk, hk, hc
        )));
    }
    Ok(())
}

/// Convenience wrapper for owned inputs.
pub fn factorize_owned(
    v: &Array2<f64>,
    w0: &Array2<f64>,
    h0: &Array2<f64>,
    config: &NmfConfig,
) -> Result<Factorization, NmfError> {
    factorize(v.view(), w0.view(), h0.view(), config)
}
