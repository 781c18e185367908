pub mod euclidean;
pub mod kerr;
pub mod schwarzschild;
pub mod sphere;

pub use euclidean::{euclidean_metric, minkowski_metric};
pub use kerr::kerr_metric;
pub use schwarzschild::schwarzschild_metric;
pub use sphere::sphere_metric;
