use ndarray::{Array2, Array3};
use tracing::debug_span;

use crate::algorithms::inverse::inverse;
use crate::core::error::Result;
use crate::core::validation::chart_dim;
use crate::symbolic::{Expr, Symbol};

/// Christoffel symbols of the first kind Γ_{βμν}.
///
/// Γ_{βμν} = ½ (∂_ν g_{βμ} + ∂_μ g_{βν} − ∂_β g_{μν})
///
/// Indexed `[β][μ][ν]`, symmetric in the last two indices. Each component
/// is cancelled before storage.
pub fn christoffel_first_kind(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Array3<Expr>> {
    let n = chart_dim(gll, coords)?;
    let _span = debug_span!("christoffel_first_kind", dim = n).entered();

    let half = Expr::rational(1, 2);
    Ok(Array3::from_shape_fn((n, n, n), |(b, u, v)| {
        let sum = gll[[b, u]].diff(&coords[v]) + gll[[b, v]].diff(&coords[u])
            - gll[[u, v]].diff(&coords[b]);
        (&half * &sum).cancel()
    }))
}

/// Christoffel symbols of the second kind Γ^α_{μν}.
///
/// Recomputes the inverse metric and the first-kind symbols, then raises
/// the first index: Γ^α_{μν} = Σ_ρ g^{αρ} Γ_{ρμν}.
pub fn christoffel_second_kind(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Array3<Expr>> {
    let n = chart_dim(gll, coords)?;
    let _span = debug_span!("christoffel_second_kind", dim = n).entered();

    let guu = inverse(gll)?;
    let first = christoffel_first_kind(gll, coords)?;
    Ok(raise_first_index(&guu, &first))
}

/// Contraction of `guu` with the first slot of a rank-3 tensor, no simplification
pub(crate) fn raise_first_index(guu: &Array2<Expr>, lower: &Array3<Expr>) -> Array3<Expr> {
    let n = guu.nrows();
    Array3::from_shape_fn((n, n, n), |(a, u, v)| {
        (0..n).map(|r| &guu[[a, r]] * &lower[[r, u, v]]).sum()
    })
}
