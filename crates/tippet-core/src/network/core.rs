//! Core Network struct and constructors
//!
//! Contains the fundamental Network data structure and factory methods.

use ndarray::{Array1, Array2, Array3};
use num_complex::Complex64;

use super::impedance::ReferenceImpedance;
use crate::constants::NEAR_ZERO;
use crate::error::{NetworkError, Result};
use crate::frequency::Frequency;
use crate::math::transforms::z2s;

/// An N-port electrical network
///
/// Networks are immutable values: every operation (connection,
/// renormalization, perturbation) returns a new `Network`.
#[derive(Debug, Clone)]
pub struct Network {
    /// Frequency data
    pub(crate) frequency: Frequency,
    /// S-parameter data [nfreq, nports, nports]
    pub(crate) s: Array3<Complex64>,
    /// Reference impedance [nfreq, nports]
    pub(crate) z0: Array2<Complex64>,
    /// Network name
    pub(crate) name: Option<String>,
}

impl Network {
    /// Create a new Network from S-parameters
    ///
    /// `z0` may be a scalar, a per-port vector or a full [nfreq, nports]
    /// table; it is broadcast to the table form.
    pub fn new(
        frequency: Frequency,
        s: Array3<Complex64>,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        let (nfreq, rows, cols) = s.dim();
        if rows != cols {
            return Err(NetworkError::Shape(format!(
                "S-parameter matrices must be square, got {}x{}",
                rows, cols
            )));
        }
        if nfreq != frequency.npoints() {
            return Err(NetworkError::Shape(format!(
                "S-parameters hold {} frequency points, grid has {}",
                nfreq,
                frequency.npoints()
            )));
        }
        let z0 = z0.into().resolve(nfreq, rows)?;

        Ok(Self {
            frequency,
            s,
            z0,
            name: None,
        })
    }

    /// Create a Network from Z-parameters [nfreq, nports, nports]
    pub fn from_z(
        frequency: Frequency,
        z: &Array3<Complex64>,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        let nports = z.shape()[1];
        let z0 = z0.into().resolve(z.shape()[0], nports)?;
        let s = z2s(z, &z0)?;
        Self::new(frequency, s, z0)
    }

    /// A reflectionless network: all S-parameters zero
    pub fn matched(
        frequency: Frequency,
        nports: usize,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        let s = Array3::<Complex64>::zeros((frequency.npoints(), nports, nports));
        Self::new(frequency, s, z0)
    }

    /// A 1-port load with the same reflection coefficient at every frequency
    pub fn load(
        frequency: Frequency,
        gamma: Complex64,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        let gammas = Array1::from_elem(frequency.npoints(), gamma);
        Self::load_with_gammas(frequency, &gammas, z0)
    }

    /// A 1-port load with a frequency-dependent reflection coefficient
    pub fn load_with_gammas(
        frequency: Frequency,
        gammas: &Array1<Complex64>,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        if gammas.len() != frequency.npoints() {
            return Err(NetworkError::Shape(format!(
                "{} reflection coefficients for {} frequency points",
                gammas.len(),
                frequency.npoints()
            )));
        }
        let s = Array3::from_shape_fn((gammas.len(), 1, 1), |(f, _, _)| gammas[f]);
        Self::new(frequency, s, z0)
    }

    /// A 1-port load presenting impedance `z_load`, referenced to `z0`
    ///
    /// Γ = (z_load - z0) / (z_load + z0)
    pub fn load_impedance(frequency: Frequency, z_load: Complex64, z0: Complex64) -> Result<Self> {
        let denom = z_load + z0;
        if denom.norm() < NEAR_ZERO {
            return Err(NetworkError::Singular {
                operation: "load impedance",
                freq_index: 0,
            });
        }
        Self::load(frequency, (z_load - z0) / denom, z0)
    }

    /// Attach a name to the network
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.s.shape()[0]
    }
}
