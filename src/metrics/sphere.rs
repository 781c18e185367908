use ndarray::Array2;

use crate::symbolic::Expr;

/// 2-sphere of radius `radius` in (θ, φ): diag(r₀², r₀² sin²θ)
pub fn sphere_metric(radius: &Expr, theta: &Expr) -> Array2<Expr> {
    let r2 = radius.pow(2);
    let mut g = Array2::<Expr>::zeros((2, 2));
    g[[1, 1]] = &r2 * &theta.sin().pow(2);
    g[[0, 0]] = r2;
    g
}
