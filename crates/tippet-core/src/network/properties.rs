//! Network property checks and comparisons

use super::core::Network;
use crate::constants::PROPERTY_TOL;
use crate::error::{NetworkError, Result};

impl Network {
    /// Test if network is reciprocal
    ///
    /// A network is reciprocal if S = S^T (transpose).
    pub fn is_reciprocal(&self, tol: Option<f64>) -> bool {
        let tol = tol.unwrap_or(PROPERTY_TOL);
        let nports = self.nports();

        for f in 0..self.nfreq() {
            for i in 0..nports {
                for j in i + 1..nports {
                    if (self.s[[f, i, j]] - self.s[[f, j, i]]).norm() > tol {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn check_comparable(&self, other: &Network) -> Result<()> {
        if self.s.dim() != other.s.dim() {
            return Err(NetworkError::Shape(format!(
                "cannot compare networks of shape {:?} and {:?}",
                self.s.dim(),
                other.s.dim()
            )));
        }
        Ok(())
    }

    /// Sum of `|S_a - S_b|` over all frequencies and port pairs
    ///
    /// Compares scattering matrices as stored; bring both networks to the
    /// same reference impedance first.
    pub fn sum_abs_diff(&self, other: &Network) -> Result<f64> {
        self.check_comparable(other)?;
        Ok(self
            .s
            .iter()
            .zip(other.s.iter())
            .map(|(a, b)| (a - b).norm())
            .sum())
    }

    /// Largest `|S_a - S_b|` over all frequencies and port pairs
    pub fn max_abs_diff(&self, other: &Network) -> Result<f64> {
        self.check_comparable(other)?;
        Ok(self
            .s
            .iter()
            .zip(other.s.iter())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max))
    }
}
