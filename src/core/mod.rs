pub mod error;
pub mod traits;
pub mod validation;

pub use error::{Error, Result};
pub use traits::SymbolicTensor;
pub use validation::{chart_dim, square_dim};
