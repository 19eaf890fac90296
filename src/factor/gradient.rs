use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};

/// Projected gradient with respect to the non-negative orthant.
///
/// An entry survives when the gradient points into the feasible region
/// (`g < 0`) or the factor entry is strictly positive; otherwise it is zeroed.
pub fn projected_gradient<S, T>(grad: &ArrayBase<S, Ix2>, factor: &ArrayBase<T, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
    T: Data<Elem = f64>,
{
    let mut result = grad.to_owned();
    ndarray::Zip::from(&mut result)
        .and(factor)
        .for_each(|g, &x| {
            if !(*g < 0.0 || x > 0.0) {
                *g = 0.0;
            }
        });
    result
}

/// Clamp every negative (or NaN) entry to zero in-place.
pub fn project_nonnegative(a: &mut Array2<f64>) {
    a.mapv_inplace(|v| if v > 0.0 { v } else { 0.0 });
}

/// Sum of squared entries.
pub fn squared_norm<S: Data<Elem = f64>>(a: &ArrayBase<S, Ix2>) -> f64 {
    a.iter().map(|v| v * v).sum()
}

/// Frobenius norm: sqrt of the sum of squared entries.
pub fn frobenius_norm<S: Data<Elem = f64>>(a: &ArrayBase<S, Ix2>) -> f64 {
    squared_norm(a).sqrt()
}

/// ||V - W*H||_F
pub fn reconstruction_error(v: ArrayView2<'_, f64>, w: ArrayView2<'_, f64>, h: ArrayView2<'_, f64>) -> f64 {
    let diff = &v - &w.dot(&h);
    frobenius_norm(&diff)
}
