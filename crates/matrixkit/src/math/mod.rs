//! Dense matrix type and the operations defined on it.
//!
//! `Matrix` is an owned row-major buffer; every operation borrows its inputs
//! and returns a freshly allocated result.
pub mod determinant;
pub mod elimination;
pub mod lu;
pub mod matrix;
pub mod ops;
pub mod transform;

pub use determinant::{
    cofactor, cofactor_with, det, det_cofactor_expansion, det_with, inverse, inverse_with,
};
pub use elimination::{
    rank, rank_with, reduced_row_echelon, reduced_row_echelon_with, row_echelon,
    row_echelon_with,
};
pub use lu::{lu, Lu};
pub use matrix::{copy, identity, resize, zero, Matrix};
pub use ops::{add, multiply};
pub use transform::{minor, transpose};
