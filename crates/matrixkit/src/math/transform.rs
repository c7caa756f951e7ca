use crate::math::matrix::Matrix;

pub fn transpose(matrix: &Matrix) -> Matrix {
    Matrix::from_fn(matrix.ncols(), matrix.nrows(), |row, col| matrix[(col, row)])
}

/// Submatrix with `row` and `col` removed.
///
/// # Panics
///
/// Panics if `row` or `col` is out of range.
pub fn minor(matrix: &Matrix, row: usize, col: usize) -> Matrix {
    assert!(
        row < matrix.nrows() && col < matrix.ncols(),
        "minor index ({}, {}) out of bounds for {}x{} matrix",
        row,
        col,
        matrix.nrows(),
        matrix.ncols()
    );
    Matrix::from_fn(matrix.nrows() - 1, matrix.ncols() - 1, |r, c| {
        let src_row = if r < row { r } else { r + 1 };
        let src_col = if c < col { c } else { c + 1 };
        matrix[(src_row, src_col)]
    })
}
