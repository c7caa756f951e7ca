//! Dispatch of CLI operations onto the matrixkit library.
use anyhow::{bail, Result};
use serde::Serialize;

use matrixkit::config::Pivoting;
use matrixkit::{
    add, det_with, identity, inverse_with, lu, minor, multiply, rank_with,
    reduced_row_echelon_with, resize, row_echelon_with, transpose, Lu, Matrix,
};

/// A single library call with its resolved operands.
#[derive(Debug, Clone)]
pub enum Operation {
    Det(Matrix),
    Inverse(Matrix),
    Ref(Matrix),
    Rref(Matrix),
    Rank(Matrix),
    Transpose(Matrix),
    Lu(Matrix),
    Minor(Matrix, usize, usize),
    Resize(Matrix, usize, usize),
    Identity(usize),
    Add(Matrix, Matrix),
    Multiply(Matrix, Matrix),
}

/// Result of an operation, printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Scalar(f64),
    Count(usize),
    Matrix(Matrix),
    Lu(Lu),
}

impl Output {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The matrix result, if this output is one.
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Output::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }
}

pub fn run(operation: Operation, pivoting: Pivoting) -> Result<Output> {
    log::debug!("Running {:?} with {:?} pivoting", operation, pivoting);
    let output = match operation {
        Operation::Det(m) => Output::Scalar(det_with(&m, pivoting)?),
        Operation::Inverse(m) => Output::Matrix(inverse_with(&m, pivoting)?),
        Operation::Ref(m) => Output::Matrix(row_echelon_with(&m, pivoting)),
        Operation::Rref(m) => Output::Matrix(reduced_row_echelon_with(&m, pivoting)),
        Operation::Rank(m) => Output::Count(rank_with(&m, pivoting)),
        Operation::Transpose(m) => Output::Matrix(transpose(&m)),
        Operation::Lu(m) => Output::Lu(lu(&m)),
        Operation::Minor(m, row, col) => {
            if row >= m.nrows() || col >= m.ncols() {
                bail!(
                    "Minor index ({}, {}) is outside the {}x{} matrix",
                    row,
                    col,
                    m.nrows(),
                    m.ncols()
                );
            }
            Output::Matrix(minor(&m, row, col))
        }
        Operation::Resize(m, rows, cols) => Output::Matrix(resize(&m, rows, cols)),
        Operation::Identity(n) => Output::Matrix(identity(n)),
        Operation::Add(a, b) => Output::Matrix(add(&a, &b)?),
        Operation::Multiply(a, b) => Output::Matrix(multiply(&a, &b)?),
    };
    Ok(output)
}
