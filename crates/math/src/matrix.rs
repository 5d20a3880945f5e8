use std::str::FromStr;

use crate::{MathError, Result};

/// Row-major dense matrix.
pub type Matrix = Vec<Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixOperation {
    /// `a+b`
    AddMatrix,
    /// `a+scalar`
    AddScalar,
}

impl FromStr for MatrixOperation {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a+b" => Ok(Self::AddMatrix),
            "a+scalar" => Ok(Self::AddScalar),
            _ => Err(MathError::UnsupportedOperation(s.to_string())),
        }
    }
}

/// Rows by columns, rejecting empty and ragged matrices.
fn dimensions(name: &str, matrix: &Matrix) -> Result<(usize, usize)> {
    let columns = matrix.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(MathError::InvalidInput(format!("matrix {name} needs at least one row and column")));
    }
    if let Some(row) = matrix.iter().position(|row| row.len() != columns) {
        return Err(MathError::InvalidInput(format!(
            "matrix {name} row {row} has {} columns, expected {columns}",
            matrix[row].len()
        )));
    }
    if matrix.iter().flatten().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!("matrix {name} holds a non-finite value")));
    }
    Ok((matrix.len(), columns))
}

pub fn add_matrices(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let left = dimensions("a", a)?;
    let right = dimensions("b", b)?;
    if left != right {
        return Err(MathError::DimensionMismatch { left, right });
    }

    Ok(a.iter()
        .zip(b)
        .map(|(row_a, row_b)| row_a.iter().zip(row_b).map(|(x, y)| x + y).collect())
        .collect())
}

pub fn add_scalar(a: &Matrix, scalar: f64) -> Result<Matrix> {
    dimensions("a", a)?;
    if !scalar.is_finite() {
        return Err(MathError::InvalidInput(format!("scalar must be finite, got {scalar}")));
    }

    Ok(a.iter().map(|row| row.iter().map(|x| x + scalar).collect()).collect())
}
