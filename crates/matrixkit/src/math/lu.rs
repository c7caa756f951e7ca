use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::math::ops::multiply;

/// LU factorization without pivoting: `A = L * U`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lu {
    /// Unit lower-triangular, always square with the input's row count.
    pub l: Matrix,
    /// Upper-triangular, same shape as the input (may be rectangular).
    pub u: Matrix,
}

impl Lu {
    /// Multiply the factors back together.
    ///
    /// Fails only when the factors were edited into incompatible shapes.
    pub fn reconstruct(&self) -> Result<Matrix> {
        multiply(&self.l, &self.u)
    }
}

/// Doolittle elimination on a copy of `matrix`.
///
/// No rows are exchanged. A zero pivot produces infinite or NaN entries
/// instead of an error; callers that need robustness should check the
/// diagonal of `u`.
pub fn lu(matrix: &Matrix) -> Lu {
    let n = matrix.nrows();
    let mut l = Matrix::identity(n);
    let mut u = matrix.clone();

    for row in 0..n.min(u.ncols()) {
        let pivot = u[(row, row)];
        if pivot == 0.0 {
            log::warn!("LU: zero pivot at row {}, factors will not be finite", row);
        }
        for below in row + 1..n {
            let factor = u[(below, row)] / pivot;
            l[(below, row)] = factor;
            u.sub_scaled_row(below, row, factor, row);
        }
    }

    Lu { l, u }
}
