use ndarray::{Array2, Array3, Array4};
use tracing::debug_span;

use crate::algorithms::christoffel::christoffel_second_kind;
use crate::algorithms::inverse::inverse;
use crate::core::error::Result;
use crate::core::validation::chart_dim;
use crate::symbolic::{Expr, Symbol};

/// Riemann tensor R^α_{ρσμ}.
///
/// R^α_{ρσμ} = ∂_σ Γ^α_{μρ} − ∂_μ Γ^α_{σρ} + Γ^α_{σs} Γ^s_{μρ} − Γ^α_{μs} Γ^s_{σρ}
///
/// Indexed `[α][ρ][σ][μ]`; antisymmetric in the last two indices. The
/// second-kind symbols are recomputed from the metric. O(n⁴) components,
/// each fully simplified, so this stage dominates for n ≥ 4.
pub fn riemann(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Array4<Expr>> {
    chart_dim(gll, coords)?;
    let ccull = christoffel_second_kind(gll, coords)?;
    Ok(riemann_from_christoffel(&ccull, coords))
}

pub(crate) fn riemann_from_christoffel(ccull: &Array3<Expr>, coords: &[Symbol]) -> Array4<Expr> {
    let n = coords.len();
    let _span = debug_span!("riemann", dim = n).entered();

    Array4::from_shape_fn((n, n, n, n), |(a, p, s, m)| {
        let derivative =
            ccull[[a, m, p]].diff(&coords[s]) - ccull[[a, s, p]].diff(&coords[m]);
        let quadratic: Expr = (0..n)
            .map(|k| &ccull[[a, s, k]] * &ccull[[k, m, p]] - &ccull[[a, m, k]] * &ccull[[k, s, p]])
            .sum();
        (derivative + quadratic).simplify()
    })
}

/// Ricci tensor R_{ρμ} = R^α_{ρα μ}, the contraction of Riemann's first and third indices.
///
/// Components are trig-normalised and cancelled.
pub fn ricci(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Array2<Expr>> {
    chart_dim(gll, coords)?;
    let rulll = riemann(gll, coords)?;
    Ok(ricci_from_riemann(&rulll))
}

pub(crate) fn ricci_from_riemann(rulll: &Array4<Expr>) -> Array2<Expr> {
    let n = rulll.shape()[0];
    let _span = debug_span!("ricci", dim = n).entered();

    Array2::from_shape_fn((n, n), |(p, m)| {
        let trace: Expr = (0..n).map(|a| &rulll[[a, p, a, m]]).sum();
        trace.trigsimp().cancel()
    })
}

/// Ricci scalar R = Σ g^{ij} R_{ij}.
///
/// Recomputes both the Ricci tensor and the inverse metric.
pub fn ricci_scalar(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Expr> {
    chart_dim(gll, coords)?;
    let rll = ricci(gll, coords)?;
    let guu = inverse(gll)?;
    Ok(scalar_from_ricci(&rll, &guu))
}

pub(crate) fn scalar_from_ricci(rll: &Array2<Expr>, guu: &Array2<Expr>) -> Expr {
    let _span = debug_span!("ricci_scalar", dim = rll.nrows()).entered();

    let total: Expr = rll
        .iter()
        .zip(guu.iter())
        .map(|(r, g)| r * g)
        .sum();
    total.cancel()
}

/// Einstein tensor G_{μν} = R_{μν} − ½ g_{μν} R.
///
/// Vanishes for vacuum solutions and identically in two dimensions.
pub fn einstein_tensor(gll: &Array2<Expr>, coords: &[Symbol]) -> Result<Array2<Expr>> {
    chart_dim(gll, coords)?;
    let rll = ricci(gll, coords)?;
    let guu = inverse(gll)?;
    let rs = scalar_from_ricci(&rll, &guu);
    Ok(einstein_from_ricci(gll, &rll, &rs))
}

pub(crate) fn einstein_from_ricci(
    gll: &Array2<Expr>,
    rll: &Array2<Expr>,
    rs: &Expr,
) -> Array2<Expr> {
    let half_scalar = Expr::rational(1, 2) * rs;
    Array2::from_shape_fn(rll.dim(), |(i, j)| {
        (&rll[[i, j]] - &(&gll[[i, j]] * &half_scalar)).simplify()
    })
}
