#![allow(dead_code)]

use matrixkit::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).expect("rectangular test matrix")
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random matrix with entries in [-1, 1).
pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

/// Strictly diagonally dominant square matrix: invertible and free of zero
/// pivots when eliminated without row exchanges.
pub fn dominant_matrix(rng: &mut StdRng, n: usize) -> Matrix {
    let mut matrix = random_matrix(rng, n, n);
    for i in 0..n {
        matrix[(i, i)] += (n + 1) as f64;
    }
    matrix
}

pub fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
    assert_eq!(a.shape(), b.shape(), "shape mismatch");
    for (i, (x, y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
        assert!(
            (x - y).abs() <= tol,
            "mismatch at flat index {}: {} vs {}",
            i,
            x,
            y
        );
    }
}
