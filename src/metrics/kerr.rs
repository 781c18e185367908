use ndarray::Array2;

use crate::core::error::Result;
use crate::symbolic::Expr;

/// Kerr metric in Boyer-Lindquist coordinates (t, r, θ, φ).
///
/// Signature −+++ in geometrized units G = c = 1, with mass `m`, spin per
/// unit mass `a`, radius `r` and polar angle `theta`:
///
/// ```text
/// Σ = r² + a² cos²θ        Δ = r² − 2mr + a²
/// g_tt = −1 + 2mr/Σ
/// g_tφ = g_φt = −2amr sin²θ / Σ
/// g_rr = Σ/Δ
/// g_θθ = Σ
/// g_φφ = sin²θ ((r² + a²)² − a² Δ sin²θ) / Σ
/// ```
///
/// Every other entry is zero. A constructor only; running the full curvature
/// chain on this 4-dimensional metric is expensive.
pub fn kerr_metric(m: &Expr, a: &Expr, r: &Expr, theta: &Expr) -> Result<Array2<Expr>> {
    let two = Expr::int(2);
    let sin2 = theta.sin().pow(2);
    let sigma = a.pow(2) * theta.cos().pow(2) + r.pow(2);
    let delta = a.pow(2) - &two * m * r + r.pow(2);

    let g_tt = (&two * m * r).checked_div(&sigma)? - Expr::one();
    let g_tphi = (-(&two * a * m * r) * &sin2).checked_div(&sigma)?;
    let g_rr = sigma.checked_div(&delta)?;
    let g_thth = sigma.clone();
    let g_phph = (&sin2 * ((a.pow(2) + r.pow(2)).pow(2) - a.pow(2) * &delta * &sin2))
        .checked_div(&sigma)?;

    let mut g = Array2::<Expr>::zeros((4, 4));
    g[[0, 0]] = g_tt.cancel();
    g[[0, 3]] = g_tphi.cancel();
    g[[3, 0]] = g[[0, 3]].clone();
    g[[1, 1]] = g_rr.cancel();
    g[[2, 2]] = g_thth.cancel();
    g[[3, 3]] = g_phph.cancel();
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::Symbol;

    #[test]
    fn test_kerr_sparsity() {
        let [m, a, r, t] = ["M", "a", "r", "T"].map(|n| Expr::symbol(&Symbol::new(n)));
        let g = kerr_metric(&m, &a, &r, &t).unwrap();

        assert_eq!(g.dim(), (4, 4));
        for i in 0..4 {
            for j in 0..4 {
                let expected_nonzero =
                    matches!((i, j), (0, 0) | (0, 3) | (3, 0) | (1, 1) | (2, 2) | (3, 3));
                assert_eq!(!g[[i, j]].simplify().is_zero(), expected_nonzero, "entry [{i}][{j}]");
            }
        }
        assert_eq!(g[[0, 3]], g[[3, 0]]);
    }

    #[test]
    fn test_kerr_with_numeric_parameters() {
        let r = Expr::symbol(&Symbol::new("r"));
        let t = Expr::symbol(&Symbol::new("T"));
        let g = kerr_metric(&Expr::one(), &Expr::rational(1, 2), &r, &t).unwrap();

        // g_θθ = r² + cos²θ / 4
        let expected = r.pow(2) + Expr::rational(1, 4) * t.cos().pow(2);
        assert!(g[[2, 2]].equivalent(&expected));
    }

    #[test]
    fn test_kerr_degenerate_parameters_fail() {
        let t = Expr::symbol(&Symbol::new("T"));
        let zero = Expr::zero();
        assert!(kerr_metric(&Expr::one(), &zero, &zero, &t).is_err());
    }
}
