mod error;
mod matrix;
mod triangle;

pub use error::MathError;
pub use matrix::{add_matrices, add_scalar, Matrix, MatrixOperation};
pub use triangle::{hypotenuse, AngleUnit, HypotenuseInput, HypotenuseMethod, RightTriangle};

pub type Result<T> = std::result::Result<T, MathError>;
