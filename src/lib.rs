//! Exact symbolic differential geometry for arbitrary coordinate charts.
//!
//! Given a covariant metric `gll` over coordinates `X`, the pipeline derives
//! the inverse metric, Christoffel symbols of both kinds, the Riemann and
//! Ricci tensors and the Ricci scalar, all as exact [`Expr`] values.

pub mod algorithms;
pub mod core;
pub mod metrics;
pub mod symbolic;

// Flat re-exports for convenience
pub use crate::core::{Error, Result, SymbolicTensor};
pub use crate::symbolic::{symbols, Expr, Function, Symbol};

// Re-export the curvature pipeline
pub use crate::algorithms::{
    christoffel_first_kind, christoffel_second_kind, differentials, einstein_tensor, inverse,
    line_element_from_metric, metric_from_line_element, ricci, ricci_scalar, riemann, Curvature,
    Geometry,
};

// Re-export metric fixtures
pub use crate::metrics::{
    euclidean_metric, kerr_metric, minkowski_metric, schwarzschild_metric, sphere_metric,
};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::algorithms::{
        christoffel_first_kind, christoffel_second_kind, inverse, line_element_from_metric,
        metric_from_line_element, ricci, ricci_scalar, riemann, Geometry,
    };
    pub use crate::core::{Error, Result, SymbolicTensor};
    pub use crate::metrics::{kerr_metric, schwarzschild_metric, sphere_metric};
    pub use crate::symbolic::{symbols, Expr, Function, Symbol};
}
