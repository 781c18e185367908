use ndarray::{Array2, Array3, Array4};
use tracing::debug_span;

use crate::algorithms::christoffel::{christoffel_first_kind, raise_first_index};
use crate::algorithms::curvature::{
    einstein_from_ricci, ricci_from_riemann, riemann_from_christoffel, scalar_from_ricci,
};
use crate::algorithms::inverse::inverse;
use crate::algorithms::line_element::line_element_from_metric;
use crate::core::error::Result;
use crate::core::traits::SymbolicTensor;
use crate::core::validation::chart_dim;
use crate::symbolic::{Expr, Symbol};

/// A metric on a coordinate chart, validated once.
///
/// The free functions in [`crate::algorithms`] recompute every prerequisite
/// stage on each call. `Geometry::curvature` runs the chain once and shares
/// the inverse metric and Christoffel symbols between stages.
#[derive(Debug, Clone)]
pub struct Geometry {
    metric: Array2<Expr>,
    coords: Vec<Symbol>,
}

/// Every curvature quantity of a [`Geometry`], computed in one pass
#[derive(Debug, Clone)]
pub struct Curvature {
    /// g^{μν}
    pub inverse_metric: Array2<Expr>,
    /// Γ_{βμν}
    pub christoffel_first: Array3<Expr>,
    /// Γ^α_{μν}
    pub christoffel_second: Array3<Expr>,
    /// R^α_{ρσμ}
    pub riemann: Array4<Expr>,
    /// R_{ρμ}
    pub ricci: Array2<Expr>,
    /// R
    pub ricci_scalar: Expr,
    /// G_{μν}
    pub einstein: Array2<Expr>,
}

impl Geometry {
    pub fn new(metric: Array2<Expr>, coords: Vec<Symbol>) -> Result<Self> {
        chart_dim(&metric, &coords)?;
        Ok(Geometry { metric, coords })
    }

    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    pub fn metric(&self) -> &Array2<Expr> {
        &self.metric
    }

    pub fn coordinates(&self) -> &[Symbol] {
        &self.coords
    }

    pub fn line_element(&self) -> Result<Expr> {
        line_element_from_metric(&self.metric, &self.coords)
    }

    pub fn curvature(&self) -> Result<Curvature> {
        let _span = debug_span!("curvature", dim = self.dim()).entered();

        let inverse_metric = inverse(&self.metric)?;
        let christoffel_first = christoffel_first_kind(&self.metric, &self.coords)?;
        let christoffel_second = raise_first_index(&inverse_metric, &christoffel_first);
        let riemann = riemann_from_christoffel(&christoffel_second, &self.coords);
        let ricci = ricci_from_riemann(&riemann);
        let ricci_scalar = scalar_from_ricci(&ricci, &inverse_metric);
        let einstein = einstein_from_ricci(&self.metric, &ricci, &ricci_scalar);

        Ok(Curvature {
            inverse_metric,
            christoffel_first,
            christoffel_second,
            riemann,
            ricci,
            ricci_scalar,
            einstein,
        })
    }
}

impl Curvature {
    /// Riemann tensor vanishes: the chart covers flat space
    pub fn is_flat(&self) -> bool {
        self.riemann.is_zero_tensor()
    }

    /// Ricci tensor vanishes: a vacuum solution
    pub fn is_ricci_flat(&self) -> bool {
        self.ricci.is_zero_tensor()
    }
}
