use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported operation '{0}'")]
    UnsupportedOperation(String),

    #[error("matrix dimensions {left:?} and {right:?} do not match")]
    DimensionMismatch { left: (usize, usize), right: (usize, usize) },
}
