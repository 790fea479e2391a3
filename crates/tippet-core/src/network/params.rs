//! Network parameter access (S, Z)

use ndarray::{s, Array1, Array2, Array3};
use num_complex::Complex64;

use super::core::Network;
use crate::error::Result;
use crate::frequency::Frequency;
use crate::math::transforms::s2z;

impl Network {
    /// Get reference impedance table [nfreq, nports]
    pub fn z0(&self) -> &Array2<Complex64> {
        &self.z0
    }

    /// Get S-parameters
    pub fn s(&self) -> &Array3<Complex64> {
        &self.s
    }

    /// Get frequency object
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Get frequency vector in Hz
    pub fn f(&self) -> &[f64] {
        self.frequency.f()
    }

    /// Get the network name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get Z-parameters (impedance)
    ///
    /// Fails if the network has no impedance representation at some
    /// frequency (e.g. an open-circuit load, S11 = 1).
    pub fn z(&self) -> Result<Array3<Complex64>> {
        s2z(&self.s, &self.z0)
    }

    /// One S-parameter trace over frequency
    ///
    /// # Panics
    /// Panics if `i` or `j` is not less than `nports()`.
    pub fn s_ij(&self, i: usize, j: usize) -> Array1<Complex64> {
        self.s.slice(s![.., i, j]).to_owned()
    }

    /// Get S-parameter magnitude
    pub fn s_mag(&self) -> Array3<f64> {
        self.s.mapv(|c| c.norm())
    }

    /// Get S-parameter in dB
    pub fn s_db(&self) -> Array3<f64> {
        self.s.mapv(|c| 20.0 * c.norm().log10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyUnit, SweepType};
    use approx::assert_relative_eq;

    #[test]
    fn test_s_to_z_matched() {
        // A matched load (S11 = 0) should have Z = z0
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let ntwk = Network::matched(freq, 1, 50.0).unwrap();
        let z = ntwk.z().unwrap();

        assert_relative_eq!(z[[0, 0, 0]].re, 50.0, epsilon = 1e-10);
        assert_relative_eq!(z[[0, 0, 0]].im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_s_db_and_trace() {
        let freq = Frequency::new(1.0, 2.0, 2, FrequencyUnit::GHz, SweepType::Linear);
        let mut s = Array3::<Complex64>::zeros((2, 2, 2));
        // |S21| = 0.1 -> -20 dB
        s[[0, 1, 0]] = Complex64::new(0.1, 0.0);
        s[[1, 1, 0]] = Complex64::new(0.0, 0.1);
        let ntwk = Network::new(freq, s, 50.0).unwrap();

        assert_relative_eq!(ntwk.s_db()[[0, 1, 0]], -20.0, epsilon = 1e-10);
        assert_relative_eq!(ntwk.s_mag()[[1, 1, 0]], 0.1, epsilon = 1e-15);

        let s21 = ntwk.s_ij(1, 0);
        assert_eq!(s21.len(), 2);
        assert_eq!(s21[1], Complex64::new(0.0, 0.1));
        assert_eq!(ntwk.f()[1], 2e9);
        assert!(ntwk.name().is_none());
    }

    #[test]
    #[should_panic]
    fn test_s_ij_out_of_range() {
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let ntwk = Network::matched(freq, 2, 50.0).unwrap();
        ntwk.s_ij(0, 2);
    }

    #[test]
    fn test_open_has_no_z() {
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let open = Network::load(freq, Complex64::new(1.0, 0.0), 50.0).unwrap();
        assert!(open.z().unwrap_err().is_singular());
    }
}
