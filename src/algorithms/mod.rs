pub mod christoffel;
pub mod curvature;
pub mod geometry;
pub mod inverse;
pub mod line_element;

pub use christoffel::{christoffel_first_kind, christoffel_second_kind};
pub use curvature::{einstein_tensor, ricci, ricci_scalar, riemann};
pub use geometry::{Curvature, Geometry};
pub use inverse::inverse;
pub use line_element::{differentials, line_element_from_metric, metric_from_line_element};
