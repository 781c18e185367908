use ndarray::Array2;

use crate::core::error::{Error, Result};
use crate::symbolic::{Expr, Symbol};

/// Size of a square metric, or `NotSquare`
pub fn square_dim(gll: &Array2<Expr>) -> Result<usize> {
    let (rows, cols) = gll.dim();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Validates that `gll` is square and matches the coordinate count
pub fn chart_dim(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<usize> {
    let dim = square_dim(gll)?;
    if coords.len() != dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            got: coords.len(),
        });
    }
    Ok(dim)
}
