use thiserror::Error;

/// Result alias used by every fallible matrix operation.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Recoverable failures reported by matrix operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Operand shapes are incompatible for a binary operation.
    #[error("{op}: incompatible dimensions {left:?} and {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is not invertible")]
    NotInvertible,

    /// Flat buffer length does not match the requested shape.
    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    Shape { rows: usize, cols: usize, len: usize },

    /// Nested rows of differing lengths.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}
