use ndarray::Array2;

use crate::symbolic::Expr;

/// Euclidean metric in Cartesian coordinates: the identity
pub fn euclidean_metric(dim: usize) -> Array2<Expr> {
    Array2::eye(dim)
}

/// Minkowski metric diag(−1, 1, …, 1), time first
pub fn minkowski_metric(dim: usize) -> Array2<Expr> {
    let mut g = Array2::eye(dim);
    if dim > 0 {
        g[[0, 0]] = Expr::int(-1);
    }
    g
}
