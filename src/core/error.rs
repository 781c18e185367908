use thiserror::Error;

/// Errors that can occur during symbolic tensor operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Coordinate count does not match the metric size
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Metric is not a square matrix
    #[error("metric is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix has zero determinant
    #[error("matrix is singular")]
    SingularMatrix,

    /// Divisor simplifies to zero
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Array construction failed
    #[error("shape error: {0}")]
    ShapeError(String),
}

/// Convert ndarray shape errors to Error
impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Error::ShapeError(format!("{:?}", err))
    }
}

/// Result type for symbolic tensor operations
pub type Result<T> = std::result::Result<T, Error>;
