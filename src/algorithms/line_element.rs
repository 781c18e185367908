use ndarray::Array2;
use tracing::debug_span;

use crate::core::error::Result;
use crate::core::validation::chart_dim;
use crate::symbolic::{Expr, Symbol};

/// Differential symbol `d<x>` for each coordinate, in coordinate order
pub fn differentials(coords: &[Symbol]) -> Vec<Symbol> {
    coords.iter().map(Symbol::differential).collect()
}

/// Squared line element ds² = Σ_ij g_ij dXᵢ dXⱼ.
///
/// Double contraction of the metric with the outer product of the
/// coordinate differentials. No simplification is applied.
pub fn line_element_from_metric(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Expr> {
    let n = chart_dim(gll, coords)?;
    let _span = debug_span!("line_element_from_metric", dim = n).entered();

    let dx: Vec<Expr> = differentials(coords).iter().map(Expr::symbol).collect();
    let outer = Array2::from_shape_fn((n, n), |(i, j)| &dx[i] * &dx[j]);
    Ok(gll.iter().zip(outer.iter()).map(|(g, d)| g * d).sum())
}

/// Recovers the covariant metric from a squared line element.
///
/// Diagonal entries are the coefficients of dXᵢ², off-diagonal entries half
/// the coefficient of dXᵢ dXⱼ, mirrored. Entries with no matching term are 0.
pub fn metric_from_line_element(ds: &Expr, coords: &[Symbol]) -> Result<Array2<Expr>> {
    let n = coords.len();
    let _span = debug_span!("metric_from_line_element", dim = n).entered();

    let dx = differentials(coords);
    let half = Expr::rational(1, 2);
    let mut cells: Vec<Expr> = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let cell = if i == j {
                ds.coefficient(&[(dx[i].clone(), 2)])?.simplify()
            } else if i < j {
                let mixed = ds.coefficient(&[(dx[i].clone(), 1), (dx[j].clone(), 1)])?;
                (&half * &mixed).simplify().cancel()
            } else {
                cells[j * n + i].clone()
            };
            cells.push(cell);
        }
    }
    Ok(Array2::from_shape_vec((n, n), cells)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, SymbolicTensor};
    use crate::metrics::sphere_metric;
    use crate::symbolic::symbols;
    use ndarray::arr2;

    #[test]
    fn test_sphere_line_element() {
        let coords = symbols("θ φ");
        let r0 = Expr::symbol(&Symbol::new("r0"));
        let theta = Expr::symbol(&coords[0]);
        let g = sphere_metric(&r0, &theta);

        let ds = line_element_from_metric(&g, &coords).unwrap();
        let dtheta = Expr::symbol(&coords[0].differential());
        let dphi = Expr::symbol(&coords[1].differential());
        let expected = r0.pow(2) * dtheta.pow(2) + r0.pow(2) * theta.sin().pow(2) * dphi.pow(2);

        assert!(ds.equivalent(&expected));
    }

    #[test]
    fn test_off_diagonal_round_trip() {
        let coords = symbols("u v");
        let u = Expr::symbol(&coords[0]);
        let v = Expr::symbol(&coords[1]);
        let g = arr2(&[[u.pow(2), &u * &v], [&u * &v, Expr::int(3)]]);

        let ds = line_element_from_metric(&g, &coords).unwrap();
        let recovered = metric_from_line_element(&ds, &coords).unwrap();

        assert!(recovered.equivalent_to(&g));
        assert_eq!(recovered[[0, 1]], recovered[[1, 0]]);
    }

    #[test]
    fn test_differential_names() {
        let coords = symbols("t r");
        let names: Vec<String> = differentials(&coords).iter().map(Symbol::name).collect();
        assert_eq!(names, vec!["dt", "dr"]);
    }

    #[test]
    fn test_coordinate_named_like_a_differential() {
        // a coordinate literally called "dx" does not alias the differential of x
        let coords = symbols("x dx");
        let x = Expr::symbol(&coords[0]);
        let g = arr2(&[[Expr::one(), Expr::zero()], [Expr::zero(), x.pow(2)]]);

        let ds = line_element_from_metric(&g, &coords).unwrap();
        let recovered = metric_from_line_element(&ds, &coords).unwrap();
        assert!(recovered.equivalent_to(&g));
    }

    #[test]
    fn test_line_element_dimension_mismatch() {
        let g: Array2<Expr> = Array2::eye(2);
        assert_eq!(
            line_element_from_metric(&g, &symbols("x")),
            Err(Error::DimensionMismatch { expected: 2, got: 1 })
        );
    }
}
