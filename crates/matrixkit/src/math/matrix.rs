use std::fmt;
use std::ops::{Index, IndexMut};

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MatrixError, Result};

/// Dense row-major matrix of `f64`.
///
/// Rectangularity is checked when the matrix is built, so every row has
/// `ncols()` entries. A matrix without rows reports zero columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(MatrixError::Shape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self::raw(rows, cols, data))
    }

    /// Build from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(MatrixError::Ragged {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Ok(Self::raw(rows.len(), cols, data))
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self::raw(rows, cols, data)
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::raw(rows, cols, vec![0.0; rows * cols])
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |row, col| if row == col { 1.0 } else { 0.0 })
    }

    fn raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        let cols = if rows == 0 { 0 } else { cols };
        Self { data, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when no entry is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(col < self.cols, "column index out of bounds");
        row * self.cols + col
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Copy of the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|row| self.row_slice(row).to_vec()).collect()
    }

    /// Copy resized to `rows x cols`; cells outside the source are zero.
    pub fn resize(&self, rows: usize, cols: usize) -> Matrix {
        Matrix::from_fn(rows, cols, |row, col| {
            if row < self.rows && col < self.cols {
                self[(row, col)]
            } else {
                0.0
            }
        })
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Self::raw(
            self.rows,
            self.cols,
            self.data.iter().map(|&v| f(v)).collect(),
        )
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.data.swap(a * self.cols + col, b * self.cols + col);
        }
    }

    /// `row[target] -= factor * row[source]` over columns `from..`.
    pub(crate) fn sub_scaled_row(
        &mut self,
        target: usize,
        source: usize,
        factor: f64,
        from: usize,
    ) {
        for col in from..self.cols {
            let delta = self[(source, col)] * factor;
            self[(target, col)] -= delta;
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", self.row_slice(row))?;
        }
        write!(f, "]")
    }
}

/// Non-finite entries are refused: JSON has no representation for them and
/// would write `null`, which cannot be read back.
impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let Some(pos) = self.data.iter().position(|v| !v.is_finite()) {
            return Err(S::Error::custom(format!(
                "non-finite entry {} at ({}, {})",
                self.data[pos],
                pos / self.cols,
                pos % self.cols
            )));
        }
        serializer.collect_seq((0..self.rows).map(|row| self.row_slice(row)))
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(D::Error::custom)
    }
}

impl From<ndarray::Array2<f64>> for Matrix {
    fn from(array: ndarray::Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        Matrix::raw(rows, cols, array.iter().copied().collect())
    }
}

impl From<&Matrix> for ndarray::Array2<f64> {
    fn from(matrix: &Matrix) -> Self {
        ndarray::Array2::from_shape_fn(matrix.shape(), |(row, col)| matrix[(row, col)])
    }
}

/// Deep copy; the result shares no storage with `matrix`.
pub fn copy(matrix: &Matrix) -> Matrix {
    matrix.clone()
}

pub fn resize(matrix: &Matrix, rows: usize, cols: usize) -> Matrix {
    matrix.resize(rows, cols)
}

pub fn zero(rows: usize, cols: usize) -> Matrix {
    Matrix::zeros(rows, cols)
}

pub fn identity(n: usize) -> Matrix {
    Matrix::identity(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_overlap_and_zero_fills() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let grown = resize(&m, 3, 3);
        assert_eq!(
            grown.to_rows(),
            vec![
                vec![1.0, 2.0, 0.0],
                vec![3.0, 4.0, 0.0],
                vec![0.0, 0.0, 0.0]
            ]
        );
        let shrunk = resize(&m, 1, 1);
        assert_eq!(shrunk.to_rows(), vec![vec![1.0]]);
    }

    #[test]
    fn zero_matches_resize_of_empty() {
        assert_eq!(zero(2, 3), resize(&Matrix::default(), 2, 3));
        assert!(zero(2, 3).as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_matrix_has_no_columns() {
        let m = Matrix::zeros(0, 4);
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
    }

    #[test]
    fn copy_does_not_alias() {
        let original = identity(2);
        let mut duplicate = copy(&original);
        duplicate[(0, 1)] = 7.0;
        assert_eq!(original[(0, 1)], 0.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn swap_rows_exchanges_contents() {
        let mut m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.swap_rows(0, 1);
        assert_eq!(m.row_slice(0), &[3.0, 4.0]);
        assert_eq!(m.row_slice(1), &[1.0, 2.0]);
    }

    #[test]
    fn mapv_applies_elementwise() {
        let m = Matrix::from_rows(vec![vec![1.0, -2.0]]).unwrap();
        assert_eq!(m.mapv(|v| v * 3.0).to_rows(), vec![vec![3.0, -6.0]]);
    }

    #[test]
    fn is_finite_detects_inf_and_nan() {
        assert!(Matrix::identity(2).is_finite());
        let mut m = Matrix::zeros(2, 2);
        m[(1, 0)] = f64::NAN;
        assert!(!m.is_finite());
        m[(1, 0)] = f64::INFINITY;
        assert!(!m.is_finite());
    }

    #[test]
    fn display_prints_nested_rows() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1.0, 2.0], [3.0, 4.0]]");
    }
}
