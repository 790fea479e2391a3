//! Reference impedance shapes
//!
//! A reference impedance can be given as one value for every port and
//! frequency, one value per port, or a full [nfreq, nports] table. It is
//! resolved to the table form stored on a `Network`.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{NetworkError, Result};

/// Reference impedance in any of its accepted shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceImpedance {
    /// Same impedance on every port at every frequency
    Uniform(Complex64),
    /// One impedance per port, constant over frequency
    PerPort(Array1<Complex64>),
    /// Full table [nfreq, nports]
    PerFrequency(Array2<Complex64>),
}

impl ReferenceImpedance {
    /// Broadcast to a [nfreq, nports] table
    pub fn resolve(&self, nfreq: usize, nports: usize) -> Result<Array2<Complex64>> {
        match self {
            ReferenceImpedance::Uniform(z) => Ok(Array2::from_elem((nfreq, nports), *z)),
            ReferenceImpedance::PerPort(z) => {
                if z.len() != nports {
                    return Err(NetworkError::Shape(format!(
                        "expected {} port impedances, got {}",
                        nports,
                        z.len()
                    )));
                }
                Ok(Array2::from_shape_fn((nfreq, nports), |(_, p)| z[p]))
            }
            ReferenceImpedance::PerFrequency(z) => {
                if z.dim() != (nfreq, nports) {
                    return Err(NetworkError::Shape(format!(
                        "expected z0 table [{}, {}], got {:?}",
                        nfreq,
                        nports,
                        z.dim()
                    )));
                }
                Ok(z.clone())
            }
        }
    }
}

impl From<f64> for ReferenceImpedance {
    fn from(z: f64) -> Self {
        ReferenceImpedance::Uniform(Complex64::new(z, 0.0))
    }
}

impl From<Complex64> for ReferenceImpedance {
    fn from(z: Complex64) -> Self {
        ReferenceImpedance::Uniform(z)
    }
}

impl From<Array1<Complex64>> for ReferenceImpedance {
    fn from(z: Array1<Complex64>) -> Self {
        ReferenceImpedance::PerPort(z)
    }
}

impl From<Array2<Complex64>> for ReferenceImpedance {
    fn from(z: Array2<Complex64>) -> Self {
        ReferenceImpedance::PerFrequency(z)
    }
}
