//! Measurement perturbation
//!
//! Noise injection used to characterize how sensitive a reconstruction is
//! to imperfect sub-measurements.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::core::Network;
use crate::error::{NetworkError, Result};

/// A transformation applied to every raw 2-port measurement
///
/// `stream` identifies the measurement (the pair index), so seeded
/// implementations produce the same result regardless of the order in
/// which measurements are taken.
pub trait Perturbation: Sync {
    fn perturb(&self, ntwk: &Network, stream: u64) -> Result<Network>;
}

impl<F> Perturbation for F
where
    F: Fn(&Network, u64) -> Result<Network> + Sync,
{
    fn perturb(&self, ntwk: &Network, stream: u64) -> Result<Network> {
        self(ntwk, stream)
    }
}

/// Zero-mean normal distribution; the deviation must be finite and non-negative
fn normal(std_dev: f64, what: &str) -> Result<Normal<f64>> {
    if !(std_dev >= 0.0 && std_dev.is_finite()) {
        return Err(NetworkError::Precondition(format!(
            "{} deviation must be finite and non-negative, got {}",
            what, std_dev
        )));
    }
    Normal::new(0.0, std_dev)
        .map_err(|e| NetworkError::Precondition(format!("invalid {} deviation: {}", what, e)))
}

fn apply_polar<R: Rng + ?Sized>(
    ntwk: &Network,
    mag: &Normal<f64>,
    phase_deg: &Normal<f64>,
    rng: &mut R,
) -> Network {
    let mut noisy = ntwk.clone();
    noisy.s.mapv_inplace(|c| {
        let m = c.norm() + mag.sample(&mut *rng);
        let p = c.arg() + phase_deg.sample(&mut *rng).to_radians();
        Complex64::from_polar(m, p)
    });
    noisy
}

impl Network {
    /// Add normally distributed noise to the magnitude and phase of every S-parameter
    ///
    /// # Arguments
    /// * `mag_dev` - Standard deviation of the magnitude noise (linear)
    /// * `phase_dev_deg` - Standard deviation of the phase noise (degrees)
    /// * `rng` - Random source
    pub fn add_noise_polar<R: Rng + ?Sized>(
        &self,
        mag_dev: f64,
        phase_dev_deg: f64,
        rng: &mut R,
    ) -> Result<Network> {
        let mag = normal(mag_dev, "magnitude")?;
        let phase = normal(phase_dev_deg, "phase")?;
        Ok(apply_polar(self, &mag, &phase, rng))
    }
}

/// Seeded magnitude/phase noise
#[derive(Debug, Clone)]
pub struct PolarNoise {
    mag: Normal<f64>,
    phase_deg: Normal<f64>,
    seed: u64,
}

impl PolarNoise {
    /// Noise with the given standard deviations (linear magnitude, degrees)
    pub fn new(mag_dev: f64, phase_dev_deg: f64, seed: u64) -> Result<Self> {
        Ok(Self {
            mag: normal(mag_dev, "magnitude")?,
            phase_deg: normal(phase_dev_deg, "phase")?,
            seed,
        })
    }
}

impl Perturbation for PolarNoise {
    fn perturb(&self, ntwk: &Network, stream: u64) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(stream));
        Ok(apply_polar(ntwk, &self.mag, &self.phase_deg, &mut rng))
    }
}
