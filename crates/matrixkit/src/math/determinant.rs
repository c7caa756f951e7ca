//! Determinants, cofactors and the adjugate inverse.
use crate::config::Pivoting;
use crate::error::{MatrixError, Result};
use crate::math::elimination::eliminate;
use crate::math::matrix::Matrix;
use crate::math::transform::{minor, transpose};

fn ensure_square(matrix: &Matrix) -> Result<()> {
    if matrix.is_square() {
        Ok(())
    } else {
        Err(MatrixError::NotSquare {
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        })
    }
}

/// Determinant of a square matrix.
///
/// Matrices larger than 2x2 are reduced to row echelon form; the result is
/// the product of the diagonal with one sign flip per row swap. The empty
/// matrix has determinant 1.
pub fn det(matrix: &Matrix) -> Result<f64> {
    det_with(matrix, Pivoting::default())
}

pub fn det_with(matrix: &Matrix, pivoting: Pivoting) -> Result<f64> {
    ensure_square(matrix)?;
    let n = matrix.nrows();
    match n {
        0 => Ok(1.0),
        1 => Ok(matrix[(0, 0)]),
        2 => Ok(matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)]),
        _ => {
            let pass = eliminate(matrix, pivoting, false);
            if pass.rank < n {
                return Ok(0.0);
            }
            let sign = if pass.swaps % 2 == 0 { 1.0 } else { -1.0 };
            Ok((0..n).fold(sign, |acc, i| acc * pass.matrix[(i, i)]))
        }
    }
}

/// Determinant by cofactor expansion along the first column.
///
/// Runs in factorial time; only useful for small matrices or to cross-check
/// [`det`].
pub fn det_cofactor_expansion(matrix: &Matrix) -> Result<f64> {
    ensure_square(matrix)?;
    match matrix.nrows() {
        0 => Ok(1.0),
        1 => Ok(matrix[(0, 0)]),
        n => {
            let mut sum = 0.0;
            for row in 0..n {
                let entry = matrix[(row, 0)];
                if entry == 0.0 {
                    continue;
                }
                let sign = if row % 2 == 0 { 1.0 } else { -1.0 };
                sum += entry * sign * det_cofactor_expansion(&minor(matrix, row, 0))?;
            }
            Ok(sum)
        }
    }
}

/// Signed minor determinant at (`row`, `col`).
pub fn cofactor(matrix: &Matrix, row: usize, col: usize) -> Result<f64> {
    cofactor_with(matrix, row, col, Pivoting::default())
}

pub fn cofactor_with(matrix: &Matrix, row: usize, col: usize, pivoting: Pivoting) -> Result<f64> {
    ensure_square(matrix)?;
    let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
    Ok(sign * det_with(&minor(matrix, row, col), pivoting)?)
}

/// Inverse via the adjugate: `transpose(cofactors) / det`.
///
/// Fails with [`MatrixError::NotInvertible`] when the determinant is exactly
/// zero.
pub fn inverse(matrix: &Matrix) -> Result<Matrix> {
    inverse_with(matrix, Pivoting::default())
}

pub fn inverse_with(matrix: &Matrix, pivoting: Pivoting) -> Result<Matrix> {
    let determinant = det_with(matrix, pivoting)?;
    if determinant == 0.0 {
        log::debug!("refusing to invert singular {}x{} matrix", matrix.nrows(), matrix.ncols());
        return Err(MatrixError::NotInvertible);
    }

    let n = matrix.nrows();
    let mut cofactors = Matrix::zeros(n, n);
    for row in 0..n {
        for col in 0..n {
            cofactors[(row, col)] = cofactor_with(matrix, row, col, pivoting)? / determinant;
        }
    }
    Ok(transpose(&cofactors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn det_two_by_two() {
        assert_eq!(det(&m(vec![vec![1.0, 2.0], vec![3.0, 4.0]])).unwrap(), -2.0);
    }

    #[test]
    fn det_base_cases() {
        assert_eq!(det(&Matrix::default()).unwrap(), 1.0);
        assert_eq!(det(&m(vec![vec![-7.5]])).unwrap(), -7.5);
    }

    #[test]
    fn det_rejects_rectangular() {
        let err = det(&Matrix::zeros(2, 3)).unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn det_flips_sign_on_swap() {
        // First column forces a swap before elimination can start.
        let a = m(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, -3.0, 8.0],
        ]);
        assert!((det(&a).unwrap() - (-2.0)).abs() < 1e-12);
        assert!((det_cofactor_expansion(&a).unwrap() - (-2.0)).abs() < 1e-12);
    }

    #[test]
    fn det_of_singular_three_by_three() {
        let a = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        assert!(det(&a).unwrap().abs() < 1e-12);
    }

    #[test]
    fn cofactor_sign_alternates() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(cofactor(&a, 0, 0).unwrap(), 4.0);
        assert_eq!(cofactor(&a, 0, 1).unwrap(), -3.0);
        assert_eq!(cofactor(&a, 1, 0).unwrap(), -2.0);
        assert_eq!(cofactor(&a, 1, 1).unwrap(), 1.0);
    }

    #[test]
    fn inverse_of_scaled_identity() {
        let inv = inverse(&m(vec![vec![2.0, 0.0], vec![0.0, 2.0]])).unwrap();
        assert_eq!(inv.to_rows(), vec![vec![0.5, 0.0], vec![0.0, 0.5]]);
    }

    #[test]
    fn inverse_of_singular_fails() {
        let err = inverse(&m(vec![vec![1.0, 2.0], vec![2.0, 4.0]])).unwrap_err();
        assert_eq!(err, MatrixError::NotInvertible);
    }

    #[test]
    fn inverse_with_partial_pivoting_agrees() {
        let a = m(vec![
            vec![1.0, 2.0, 0.0, 1.0],
            vec![4.0, 1.0, 3.0, 0.0],
            vec![0.0, 5.0, 1.0, 2.0],
            vec![2.0, 0.0, 1.0, 3.0],
        ]);
        let first = inverse(&a).unwrap();
        let partial = inverse_with(&a, Pivoting::Partial).unwrap();
        for (x, y) in first.as_slice().iter().zip(partial.as_slice()) {
            assert!((x - y).abs() < 1e-9, "{} vs {}", x, y);
        }
        let singular = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 6.0],
            vec![0.0, 1.0, 1.0],
        ]);
        assert_eq!(
            inverse_with(&singular, Pivoting::Partial).unwrap_err(),
            MatrixError::NotInvertible
        );
    }

    #[test]
    fn inverse_of_one_by_one() {
        let inv = inverse(&m(vec![vec![4.0]])).unwrap();
        assert_eq!(inv.to_rows(), vec![vec![0.25]]);
    }
}
