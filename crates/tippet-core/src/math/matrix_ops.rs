//! Matrix operation helpers
//!
//! Diagonal matrices built from one frequency row of reference
//! impedances, as used by the S/Z transforms.

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;

/// Create a diagonal matrix from a slice of values
#[inline]
pub fn diag_matrix(values: &[Complex64]) -> Array2<Complex64> {
    let n = values.len();
    let mut m = Array2::<Complex64>::zeros((n, n));
    for (i, &v) in values.iter().enumerate() {
        m[[i, i]] = v;
    }
    m
}

/// Diagonal matrix of `sqrt(z0)`
#[inline]
pub fn sqrt_z0_matrix(z0: ArrayView1<Complex64>) -> Array2<Complex64> {
    let vals: Vec<Complex64> = z0.iter().map(|z| z.sqrt()).collect();
    diag_matrix(&vals)
}

/// Diagonal matrix of `1 / sqrt(z0)`
#[inline]
pub fn inv_sqrt_z0_matrix(z0: ArrayView1<Complex64>) -> Array2<Complex64> {
    let vals: Vec<Complex64> = z0.iter().map(|z| z.sqrt().inv()).collect();
    diag_matrix(&vals)
}

/// Diagonal matrix of `z0`
#[inline]
pub fn z0_diag_matrix(z0: ArrayView1<Complex64>) -> Array2<Complex64> {
    let vals: Vec<Complex64> = z0.iter().copied().collect();
    diag_matrix(&vals)
}

/// Identity matrix of given size
#[inline]
pub fn identity(n: usize) -> Array2<Complex64> {
    Array2::<Complex64>::eye(n)
}
