use ndarray::Array2;

use crate::core::error::Result;
use crate::symbolic::Expr;

/// Schwarzschild metric in (t, r, θ, φ): diag(−(1 − 2m/r), 1/(1 − 2m/r), r², r² sin²θ)
pub fn schwarzschild_metric(m: &Expr, r: &Expr, theta: &Expr) -> Result<Array2<Expr>> {
    let f = Expr::one() - (Expr::int(2) * m).checked_div(r)?;
    let mut g = Array2::<Expr>::zeros((4, 4));
    g[[0, 0]] = (-&f).cancel();
    g[[1, 1]] = f.recip()?.cancel();
    g[[2, 2]] = r.pow(2);
    g[[3, 3]] = r.pow(2) * theta.sin().pow(2);
    Ok(g)
}
