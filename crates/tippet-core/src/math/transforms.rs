//! S-parameter transformation functions
//!
//! Conversions between scattering (S) and impedance (Z) parameters for
//! complex, per-port, per-frequency reference impedances, and the
//! renormalization built on them.
//!
//! Wave definition: `a = (V + z0 I) / (2 sqrt(z0))`, `b = (V - z0 I) / (2 sqrt(z0))`.
//! With `F = diag(sqrt(z0))` and `G = diag(z0)`:
//!
//! - `Z = F (I + S) (I - S)^-1 F`
//! - `S = F^-1 (Z - G) (Z + G)^-1 F`

use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2};
use num_complex::Complex64;

use crate::constants::NEAR_ZERO;
use crate::error::{NetworkError, Result};
use crate::math::linalg::inv_complex;
use crate::math::matrix_ops::{identity, inv_sqrt_z0_matrix, sqrt_z0_matrix, z0_diag_matrix};

/// Validate that `params` is [nfreq, nports, nports] and `z0` is [nfreq, nports]
fn check_shapes(params: &Array3<Complex64>, z0: &Array2<Complex64>) -> Result<()> {
    let (nfreq, rows, cols) = params.dim();
    if rows != cols {
        return Err(NetworkError::Shape(format!(
            "parameter matrices must be square, got {}x{}",
            rows, cols
        )));
    }
    if z0.dim() != (nfreq, rows) {
        return Err(NetworkError::Shape(format!(
            "z0 must be [{}, {}], got {:?}",
            nfreq,
            rows,
            z0.dim()
        )));
    }
    Ok(())
}

/// Reject reference impedances that leave the wave definition undefined
fn check_z0(z0: ArrayView1<Complex64>, freq_index: usize) -> Result<()> {
    match z0.iter().position(|z| z.norm() < NEAR_ZERO) {
        Some(port) => Err(NetworkError::ZeroImpedance { port, freq_index }),
        None => Ok(()),
    }
}

/// Convert one frequency slice of S-parameters to Z-parameters
pub fn s2z_at(
    s: ArrayView2<Complex64>,
    z0: ArrayView1<Complex64>,
    freq_index: usize,
) -> Result<Array2<Complex64>> {
    check_z0(z0, freq_index)?;
    let eye = identity(s.nrows());
    let f_mat = sqrt_z0_matrix(z0);

    let inv_i_minus_s = inv_complex(&(&eye - &s)).ok_or(NetworkError::Singular {
        operation: "s2z",
        freq_index,
    })?;
    let i_plus_s = &eye + &s;

    Ok(f_mat.dot(&i_plus_s).dot(&inv_i_minus_s).dot(&f_mat))
}

/// Convert one frequency slice of Z-parameters to S-parameters
pub fn z2s_at(
    z: ArrayView2<Complex64>,
    z0: ArrayView1<Complex64>,
    freq_index: usize,
) -> Result<Array2<Complex64>> {
    check_z0(z0, freq_index)?;
    let f_mat = sqrt_z0_matrix(z0);
    let inv_f_mat = inv_sqrt_z0_matrix(z0);
    let g_mat = z0_diag_matrix(z0);

    let inv_z_plus_g = inv_complex(&(&z + &g_mat)).ok_or(NetworkError::Singular {
        operation: "z2s",
        freq_index,
    })?;
    let z_minus_g = &z - &g_mat;

    Ok(inv_f_mat.dot(&z_minus_g).dot(&inv_z_plus_g).dot(&f_mat))
}

/// Convert S-parameters to Z-parameters
///
/// # Arguments
/// * `s` - S-parameters [nfreq, nports, nports]
/// * `z0` - Reference impedances [nfreq, nports]
///
/// Fails with `Singular` if `I - S` cannot be inverted at some frequency.
pub fn s2z(s: &Array3<Complex64>, z0: &Array2<Complex64>) -> Result<Array3<Complex64>> {
    check_shapes(s, z0)?;
    let mut z = Array3::<Complex64>::zeros(s.raw_dim());

    for f in 0..s.shape()[0] {
        let z_f = s2z_at(s.slice(s![f, .., ..]), z0.row(f), f)?;
        z.slice_mut(s![f, .., ..]).assign(&z_f);
    }

    Ok(z)
}

/// Convert Z-parameters to S-parameters
///
/// # Arguments
/// * `z` - Z-parameters [nfreq, nports, nports]
/// * `z0` - Reference impedances [nfreq, nports]
///
/// Fails with `Singular` if `Z + diag(z0)` cannot be inverted at some frequency.
pub fn z2s(z: &Array3<Complex64>, z0: &Array2<Complex64>) -> Result<Array3<Complex64>> {
    check_shapes(z, z0)?;
    let mut s = Array3::<Complex64>::zeros(z.raw_dim());

    for f in 0..z.shape()[0] {
        let s_f = z2s_at(z.slice(s![f, .., ..]), z0.row(f), f)?;
        s.slice_mut(s![f, .., ..]).assign(&s_f);
    }

    Ok(s)
}

/// Re-express S-parameters referenced to `z0` in terms of `z0_new`
///
/// The physical network is unchanged: the Z-parameters computed with the
/// current reference are converted back using the new one.
pub fn renormalize_s(
    s: &Array3<Complex64>,
    z0: &Array2<Complex64>,
    z0_new: &Array2<Complex64>,
) -> Result<Array3<Complex64>> {
    check_shapes(s, z0_new)?;
    z2s(&s2z(s, z0)?, z0_new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_z0(nfreq: usize, nports: usize, z: Complex64) -> Array2<Complex64> {
        Array2::from_elem((nfreq, nports), z)
    }

    #[test]
    fn test_s2z_z2s_roundtrip() {
        let mut s = Array3::<Complex64>::zeros((1, 1, 1));
        s[[0, 0, 0]] = Complex64::new(0.5, 0.0);

        let z0 = uniform_z0(1, 1, Complex64::new(50.0, 0.0));
        let z = s2z(&s, &z0).unwrap();
        let s_back = z2s(&z, &z0).unwrap();

        assert_relative_eq!(z[[0, 0, 0]].re, 150.0, epsilon = 1e-10);
        assert_relative_eq!(s_back[[0, 0, 0]].re, 0.5, epsilon = 1e-10);
        assert_relative_eq!(s_back[[0, 0, 0]].im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_matched_load() {
        // S11 = 0 corresponds to Z = z0, also for a complex reference
        let s = Array3::<Complex64>::zeros((1, 1, 1));
        let z0 = uniform_z0(1, 1, Complex64::new(30.0, -12.0));
        let z = s2z(&s, &z0).unwrap();

        assert_relative_eq!(z[[0, 0, 0]].re, 30.0, epsilon = 1e-10);
        assert_relative_eq!(z[[0, 0, 0]].im, -12.0, epsilon = 1e-10);
    }

    #[test]
    fn test_load_reflection_matches_bilinear_formula() {
        let z0 = Complex64::new(50.0, 0.0);
        let z_load = Complex64::new(20.0, 35.0);
        let mut z = Array3::<Complex64>::zeros((1, 1, 1));
        z[[0, 0, 0]] = z_load;

        let s = z2s(&z, &uniform_z0(1, 1, z0)).unwrap();
        let gamma = (z_load - z0) / (z_load + z0);
        assert_relative_eq!(s[[0, 0, 0]].re, gamma.re, epsilon = 1e-12);
        assert_relative_eq!(s[[0, 0, 0]].im, gamma.im, epsilon = 1e-12);
    }

    #[test]
    fn test_open_circuit_is_singular() {
        let mut s = Array3::<Complex64>::zeros((2, 1, 1));
        s[[0, 0, 0]] = Complex64::new(0.2, 0.0);
        s[[1, 0, 0]] = Complex64::new(1.0, 0.0);

        let err = s2z(&s, &uniform_z0(2, 1, Complex64::new(50.0, 0.0))).unwrap_err();
        assert_eq!(
            err,
            NetworkError::Singular {
                operation: "s2z",
                freq_index: 1
            }
        );
    }

    #[test]
    fn test_zero_reference_impedance() {
        let s = Array3::<Complex64>::zeros((1, 2, 2));
        let mut z0 = uniform_z0(1, 2, Complex64::new(50.0, 0.0));
        z0[[0, 1]] = Complex64::new(0.0, 0.0);

        let err = s2z(&s, &z0).unwrap_err();
        assert_eq!(
            err,
            NetworkError::ZeroImpedance {
                port: 1,
                freq_index: 0
            }
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let s = Array3::<Complex64>::zeros((3, 2, 2));
        let z0 = uniform_z0(3, 3, Complex64::new(50.0, 0.0));
        assert!(matches!(s2z(&s, &z0), Err(NetworkError::Shape(_))));

        let non_square = Array3::<Complex64>::zeros((3, 2, 3));
        let z0 = uniform_z0(3, 2, Complex64::new(50.0, 0.0));
        assert!(matches!(z2s(&non_square, &z0), Err(NetworkError::Shape(_))));
    }

    #[test]
    fn test_thru_has_no_z_parameters() {
        let mut s = Array3::<Complex64>::zeros((1, 2, 2));
        s[[0, 0, 1]] = Complex64::new(1.0, 0.0);
        s[[0, 1, 0]] = Complex64::new(1.0, 0.0);
        let z0 = uniform_z0(1, 2, Complex64::new(50.0, 0.0));
        let z_new = uniform_z0(1, 2, Complex64::new(25.0, 0.0));

        assert!(renormalize_s(&s, &z0, &z_new).unwrap_err().is_singular());
    }

    #[test]
    fn test_renormalize_shunt_resistor() {
        // Shunt R: S11 = -z0 / (z0 + 2R), S21 = 2R / (z0 + 2R)
        let r = 50.0;
        let reflect = |zref: f64| -zref / (zref + 2.0 * r);
        let through = |zref: f64| 2.0 * r / (zref + 2.0 * r);

        let mut shunt = Array3::<Complex64>::zeros((1, 2, 2));
        shunt[[0, 0, 0]] = Complex64::new(reflect(50.0), 0.0);
        shunt[[0, 1, 1]] = Complex64::new(reflect(50.0), 0.0);
        shunt[[0, 0, 1]] = Complex64::new(through(50.0), 0.0);
        shunt[[0, 1, 0]] = Complex64::new(through(50.0), 0.0);

        let z = s2z(&shunt, &uniform_z0(1, 2, Complex64::new(50.0, 0.0))).unwrap();
        for (i, j) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_relative_eq!(z[[0, i, j]].re, r, epsilon = 1e-9);
            assert_relative_eq!(z[[0, i, j]].im, 0.0, epsilon = 1e-9);
        }

        let renorm = renormalize_s(
            &shunt,
            &uniform_z0(1, 2, Complex64::new(50.0, 0.0)),
            &uniform_z0(1, 2, Complex64::new(75.0, 0.0)),
        )
        .unwrap();
        assert_relative_eq!(renorm[[0, 0, 0]].re, reflect(75.0), epsilon = 1e-12);
        assert_relative_eq!(renorm[[0, 1, 0]].re, through(75.0), epsilon = 1e-12);
        assert_relative_eq!(renorm[[0, 1, 0]].im, 0.0, epsilon = 1e-12);
    }
}
