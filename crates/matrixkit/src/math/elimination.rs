//! Gaussian elimination: row echelon and reduced row echelon forms.
//!
//! Rows are processed top to bottom with a lead-column cursor. When the row
//! under the cursor has a zero lead entry, a lower row with a usable entry is
//! swapped in; when no row has one, the cursor moves to the next column. The
//! cursor never divides by a zero pivot, so non-finite values only appear
//! when the input already contains them.
use crate::config::Pivoting;
use crate::math::matrix::Matrix;

/// Working state of a finished elimination pass.
#[derive(Debug, Clone)]
pub(crate) struct Elimination {
    pub matrix: Matrix,
    /// Row swaps performed; each one flips the determinant's sign.
    pub swaps: usize,
    pub rank: usize,
}

/// Locate the next pivot at or below `row`, starting from column `lead`.
fn next_pivot(
    matrix: &Matrix,
    row: usize,
    lead: usize,
    pivoting: Pivoting,
) -> Option<(usize, usize)> {
    for col in lead..matrix.ncols() {
        let candidate = match pivoting {
            Pivoting::FirstNonZero => (row..matrix.nrows()).find(|&r| matrix[(r, col)] != 0.0),
            Pivoting::Partial => (row..matrix.nrows())
                .filter(|&r| matrix[(r, col)] != 0.0)
                .fold(None, |best: Option<usize>, r| match best {
                    Some(b) if matrix[(b, col)].abs() >= matrix[(r, col)].abs() => Some(b),
                    _ => Some(r),
                }),
        };
        if let Some(pivot_row) = candidate {
            return Some((pivot_row, col));
        }
    }
    None
}

pub(crate) fn eliminate(matrix: &Matrix, pivoting: Pivoting, reduce: bool) -> Elimination {
    let mut result = matrix.clone();
    let rows = result.nrows();
    let mut swaps = 0;
    let mut rank = 0;
    let mut lead = 0;

    for row in 0..rows {
        let Some((pivot_row, col)) = next_pivot(&result, row, lead, pivoting) else {
            break;
        };

        if pivot_row != row {
            log::trace!("swapping rows {} and {} for pivot column {}", row, pivot_row, col);
            result.swap_rows(row, pivot_row);
            swaps += 1;
        }

        let pivot = result[(row, col)];
        let targets = if reduce { 0..rows } else { row + 1..rows };
        for other in targets {
            if other == row {
                continue;
            }
            let factor = result[(other, col)] / pivot;
            if factor != 0.0 {
                result.sub_scaled_row(other, row, factor, col);
                // Cancelled exactly; drop the rounding residue.
                result[(other, col)] = 0.0;
            }
        }

        if reduce {
            for value in &mut result.row_slice_mut(row)[col..] {
                *value /= pivot;
            }
        }

        rank += 1;
        lead = col + 1;
    }

    log::debug!(
        "eliminated {}x{} matrix: rank {}, {} swaps",
        result.nrows(),
        result.ncols(),
        rank,
        swaps
    );

    Elimination {
        matrix: result,
        swaps,
        rank,
    }
}

/// Row echelon form (ref) with first-nonzero pivot selection.
pub fn row_echelon(matrix: &Matrix) -> Matrix {
    row_echelon_with(matrix, Pivoting::default())
}

pub fn row_echelon_with(matrix: &Matrix, pivoting: Pivoting) -> Matrix {
    eliminate(matrix, pivoting, false).matrix
}

/// Reduced row echelon form (rref): every pivot is 1 and is the only nonzero
/// entry of its column.
pub fn reduced_row_echelon(matrix: &Matrix) -> Matrix {
    reduced_row_echelon_with(matrix, Pivoting::default())
}

pub fn reduced_row_echelon_with(matrix: &Matrix, pivoting: Pivoting) -> Matrix {
    eliminate(matrix, pivoting, true).matrix
}

/// Number of pivots found by elimination.
pub fn rank(matrix: &Matrix) -> usize {
    rank_with(matrix, Pivoting::default())
}

pub fn rank_with(matrix: &Matrix, pivoting: Pivoting) -> usize {
    eliminate(matrix, pivoting, false).rank
}
