//! Linear algebra operations
//!
//! All ndarray <-> nalgebra conversions are contained here so callers
//! stay in ndarray.

use nalgebra::DMatrix;
use ndarray::Array2;
use num_complex::Complex64;

/// Convert ndarray Array2<Complex64> to nalgebra DMatrix<Complex<f64>>
#[inline]
fn to_na_complex(a: &Array2<Complex64>) -> DMatrix<nalgebra::Complex<f64>> {
    let (m, n) = a.dim();
    DMatrix::from_fn(m, n, |i, j| {
        nalgebra::Complex::new(a[[i, j]].re, a[[i, j]].im)
    })
}

/// Convert nalgebra DMatrix<Complex<f64>> to ndarray Array2<Complex64>
#[inline]
fn from_na_complex(m: &DMatrix<nalgebra::Complex<f64>>) -> Array2<Complex64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| {
        Complex64::new(m[(i, j)].re, m[(i, j)].im)
    })
}

/// Invert a complex matrix
///
/// Returns None if the matrix is empty, non-square, singular, or the
/// inverse overflows to non-finite values.
pub fn inv_complex(a: &Array2<Complex64>) -> Option<Array2<Complex64>> {
    let (m, n) = a.dim();
    if m != n || m == 0 {
        return None;
    }

    let inv = to_na_complex(a).try_inverse()?;
    if inv.iter().any(|c| !c.re.is_finite() || !c.im.is_finite()) {
        return None;
    }
    Some(from_na_complex(&inv))
}
