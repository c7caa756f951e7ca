use crate::error::{MatrixError, Result};
use crate::math::matrix::Matrix;

/// Elementwise sum of two matrices with identical shapes.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(MatrixError::DimensionMismatch {
            op: "add",
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(Matrix::from_fn(a.nrows(), a.ncols(), |row, col| {
        a[(row, col)] + b[(row, col)]
    }))
}

/// Matrix product; the columns of `a` must match the rows of `b`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.ncols() != b.nrows() {
        return Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }
    let mut result = Matrix::zeros(a.nrows(), b.ncols());
    for row in 0..a.nrows() {
        for col in 0..b.ncols() {
            let mut sum = 0.0;
            for i in 0..a.ncols() {
                sum += a[(row, i)] * b[(i, col)];
            }
            result[(row, col)] = sum;
        }
    }
    Ok(result)
}
