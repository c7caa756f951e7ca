//! matrixkit: dense matrix arithmetic over `f64`.
//!
//! The crate provides a rectangular `Matrix` value type with construction
//! and resizing primitives, transpose and minor extraction, row echelon and
//! reduced row echelon forms, determinants, cofactors and adjugate inverses,
//! LU factorization, and matrix addition and multiplication.
//!
//! Operations never mutate their arguments. Shape problems and singular
//! inputs are reported through [`MatrixError`]. A small persisted store
//! keeps a single "saved" matrix across runs.
pub mod config;
pub mod error;
pub mod math;
pub mod store;

pub use error::{MatrixError, Result};
pub use math::*;
