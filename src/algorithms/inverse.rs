use ndarray::Array2;
use tracing::{debug, debug_span, trace};

use crate::core::error::{Error, Result};
use crate::core::validation::square_dim;
use crate::symbolic::Expr;

/// Contravariant metric g^{μν} from the covariant metric g_{μν}.
///
/// Gauss-Jordan elimination on `[g | I]` over symbolic expressions. The
/// pivot for each column is the first remaining row whose entry does not
/// simplify to zero; if none exists the metric is singular. Every entry of
/// the result is simplified before returning.
pub fn inverse(gll: &Array2<Expr>) -> Result<Array2<Expr>> {
    let n = square_dim(gll)?;
    let _span = debug_span!("inverse", dim = n).entered();

    let width = 2 * n;
    let mut aug: Vec<Vec<Expr>> = (0..n)
        .map(|i| {
            (0..width)
                .map(|j| match j {
                    j if j < n => gll[[i, j]].clone(),
                    j if j - n == i => Expr::one(),
                    _ => Expr::zero(),
                })
                .collect()
        })
        .collect();

    for col in 0..n {
        let mut pivot = None;
        for row in col..n {
            let candidate = aug[row][col].simplify();
            if !candidate.is_zero() {
                aug[row][col] = candidate;
                pivot = Some(row);
                break;
            }
        }
        let Some(pivot_row) = pivot else {
            debug!(column = col, "no non-zero pivot, metric is singular");
            return Err(Error::SingularMatrix);
        };
        trace!(column = col, row = pivot_row, "selected pivot");
        aug.swap(col, pivot_row);

        let inv_pivot = aug[col][col].recip()?;
        for k in 0..width {
            let scaled = (&aug[col][k] * &inv_pivot).cancel();
            aug[col][k] = scaled;
        }

        for row in 0..n {
            if row == col || aug[row][col].is_zero() {
                continue;
            }
            let factor = aug[row][col].clone();
            for k in 0..width {
                let updated = (&aug[row][k] - &(&factor * &aug[col][k])).cancel();
                aug[row][k] = updated;
            }
        }
    }

    Ok(Array2::from_shape_fn((n, n), |(i, j)| aug[i][n + j].simplify()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SymbolicTensor;
    use crate::symbolic::Symbol;
    use ndarray::arr2;

    fn matmul(a: &Array2<Expr>, b: &Array2<Expr>) -> Array2<Expr> {
        let n = a.nrows();
        Array2::from_shape_fn((n, n), |(i, j)| {
            (0..n).map(|k| &a[[i, k]] * &b[[k, j]]).sum()
        })
    }

    #[test]
    fn test_inverse_identity() {
        let g: Array2<Expr> = Array2::eye(4);
        let inv = inverse(&g).unwrap();
        assert_eq!(inv, g);
    }

    #[test]
    fn test_inverse_diagonal() {
        let r = Expr::symbol(&Symbol::new("r"));
        let theta = Expr::symbol(&Symbol::new("θ"));
        let g = arr2(&[
            [r.pow(2), Expr::zero()],
            [Expr::zero(), r.pow(2) * theta.sin().pow(2)],
        ]);

        let inv = inverse(&g).unwrap();
        let expected_00 = r.pow(2).recip().unwrap();
        let expected_11 = (r.pow(2) * theta.sin().pow(2)).recip().unwrap();

        assert!(inv[[0, 0]].equivalent(&expected_00));
        assert!(inv[[1, 1]].equivalent(&expected_11));
        assert!(inv[[0, 1]].is_zero());
        assert!(inv[[1, 0]].is_zero());
    }

    #[test]
    fn test_inverse_general_symmetric() {
        let a = Expr::symbol(&Symbol::new("a"));
        let b = Expr::symbol(&Symbol::new("b"));
        let c = Expr::symbol(&Symbol::new("c"));
        let g = arr2(&[[a.clone(), b.clone()], [b.clone(), c.clone()]]);

        let inv = inverse(&g).unwrap();
        let identity: Array2<Expr> = Array2::eye(2);

        assert!(matmul(&inv, &g).equivalent_to(&identity));
        assert!(matmul(&g, &inv).equivalent_to(&identity));
        assert!(inv[[0, 1]].equivalent(&inv[[1, 0]]));
    }

    #[test]
    fn test_inverse_needs_row_swap() {
        let x = Expr::symbol(&Symbol::new("x"));
        let g = arr2(&[[Expr::zero(), x.clone()], [x.clone(), Expr::one()]]);

        let inv = inverse(&g).unwrap();
        let identity: Array2<Expr> = Array2::eye(2);
        assert!(matmul(&inv, &g).equivalent_to(&identity));
    }

    #[test]
    fn test_inverse_singular() {
        let x = Expr::symbol(&Symbol::new("x"));
        let g = arr2(&[[Expr::one(), x.clone()], [x.clone(), x.pow(2)]]);
        assert_eq!(inverse(&g), Err(Error::SingularMatrix));

        let zero_row = arr2(&[[Expr::zero(), Expr::zero()], [Expr::zero(), Expr::one()]]);
        assert_eq!(inverse(&zero_row), Err(Error::SingularMatrix));
    }

    #[test]
    fn test_inverse_trig_singular() {
        // sin^2 + cos^2 - 1 is zero only through the Pythagorean identity
        let t = Expr::symbol(&Symbol::new("θ"));
        let vanishing = t.sin().pow(2) + t.cos().pow(2) - Expr::one();
        let g = arr2(&[[vanishing, Expr::zero()], [Expr::zero(), Expr::one()]]);
        assert_eq!(inverse(&g), Err(Error::SingularMatrix));
    }

    #[test]
    fn test_inverse_parity_singular() {
        let x = Expr::symbol(&Symbol::new("x"));
        let c = x.cos();
        let c_neg = (-&x).cos();
        let g = arr2(&[[c.clone(), c_neg.clone()], [c_neg, c]]);
        assert_eq!(inverse(&g), Err(Error::SingularMatrix));

        let s_neg = (-&x).sin();
        let g = arr2(&[[x.sin(), -s_neg.clone()], [s_neg, -x.sin()]]);
        assert_eq!(inverse(&g), Err(Error::SingularMatrix));
    }

    #[test]
    fn test_inverse_double_angle_singular() {
        let x = Expr::symbol(&Symbol::new("x"));
        let g = arr2(&[
            [(Expr::int(2) * &x).sin(), Expr::int(2) * x.sin()],
            [x.cos(), Expr::one()],
        ]);
        assert_eq!(inverse(&g), Err(Error::SingularMatrix));
    }

    #[test]
    fn test_inverse_not_square() {
        let g: Array2<Expr> = Array2::zeros((2, 3));
        assert_eq!(inverse(&g), Err(Error::NotSquare { rows: 2, cols: 3 }));
    }
}
