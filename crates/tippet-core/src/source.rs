//! Network sources
//!
//! Generators for the networks a composition works on: random devices
//! under test, matched networks and loads. `SyntheticSource` is seeded so
//! simulations are reproducible.

use ndarray::Array3;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::DEFAULT_SYSTEM_Z0;
use crate::error::Result;
use crate::frequency::Frequency;
use crate::network::Network;

/// Something that can produce networks on a fixed frequency grid
pub trait NetworkSource {
    /// Grid every produced network is sampled on
    fn frequency(&self) -> &Frequency;

    /// Network with random S-parameters
    fn random(&mut self, nports: usize) -> Result<Network>;

    /// Network with random, reciprocal (S = S^T) S-parameters
    fn random_reciprocal(&mut self, nports: usize) -> Result<Network>;

    /// Reflectionless network
    fn matched(&self, nports: usize) -> Result<Network>;

    /// 1-port load with reflection coefficient `gamma`
    fn load(&self, gamma: Complex64) -> Result<Network>;

    /// 1-port load presenting impedance `z_load`
    fn load_impedance(&self, z_load: Complex64) -> Result<Network>;
}

/// Seeded generator of synthetic networks at a fixed reference impedance
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    frequency: Frequency,
    z0: Complex64,
    rng: StdRng,
}

impl SyntheticSource {
    /// Source on `frequency`, referenced to 50 ohm
    pub fn new(frequency: Frequency, seed: u64) -> Self {
        Self {
            frequency,
            z0: Complex64::new(DEFAULT_SYSTEM_Z0, 0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Use a different reference impedance for produced networks
    pub fn with_z0(mut self, z0: Complex64) -> Self {
        self.z0 = z0;
        self
    }

    /// Reference impedance of produced networks
    pub fn z0(&self) -> Complex64 {
        self.z0
    }

    /// Complex value with real and imaginary parts uniform in [-1, 1)
    fn rand_c(&mut self) -> Complex64 {
        Complex64::new(
            self.rng.gen_range(-1.0..1.0),
            self.rng.gen_range(-1.0..1.0),
        )
    }
}

impl NetworkSource for SyntheticSource {
    fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    fn random(&mut self, nports: usize) -> Result<Network> {
        let nfreq = self.frequency.npoints();
        let mut s = Array3::<Complex64>::zeros((nfreq, nports, nports));
        for v in s.iter_mut() {
            *v = self.rand_c();
        }
        Network::new(self.frequency.clone(), s, self.z0)
    }

    fn random_reciprocal(&mut self, nports: usize) -> Result<Network> {
        let nfreq = self.frequency.npoints();
        let mut s = Array3::<Complex64>::zeros((nfreq, nports, nports));
        for f in 0..nfreq {
            for i in 0..nports {
                for j in i..nports {
                    let v = self.rand_c();
                    s[[f, i, j]] = v;
                    s[[f, j, i]] = v;
                }
            }
        }
        Network::new(self.frequency.clone(), s, self.z0)
    }

    fn matched(&self, nports: usize) -> Result<Network> {
        Network::matched(self.frequency.clone(), nports, self.z0)
    }

    fn load(&self, gamma: Complex64) -> Result<Network> {
        Network::load(self.frequency.clone(), gamma, self.z0)
    }

    fn load_impedance(&self, z_load: Complex64) -> Result<Network> {
        Network::load_impedance(self.frequency.clone(), z_load, self.z0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyUnit, SweepType};

    fn source(seed: u64) -> SyntheticSource {
        let freq = Frequency::new(75.0, 110.0, 11, FrequencyUnit::GHz, SweepType::Linear);
        SyntheticSource::new(freq, seed)
    }

    #[test]
    fn test_random_is_seeded() {
        let a = source(7).random(3).unwrap();
        let b = source(7).random(3).unwrap();
        let c = source(8).random(3).unwrap();

        assert_eq!(a.nports(), 3);
        assert_eq!(a.nfreq(), 11);
        assert_eq!(a.s(), b.s());
        assert!(a.max_abs_diff(&c).unwrap() > 0.0);
        assert!(a.s().iter().all(|v| v.re.abs() <= 1.0 && v.im.abs() <= 1.0));
    }

    #[test]
    fn test_random_reciprocal() {
        let mut src = source(1);
        assert!(src.random_reciprocal(4).unwrap().is_reciprocal(None));
        assert!(!src.random(4).unwrap().is_reciprocal(None));
    }

    #[test]
    fn test_matched_and_loads() {
        let src = source(0).with_z0(Complex64::new(75.0, 0.0));
        let matched = src.matched(4).unwrap();
        assert!(matched.s().iter().all(|v| v.norm() == 0.0));
        assert_eq!(matched.z0()[[0, 3]], Complex64::new(75.0, 0.0));

        let gamma = Complex64::new(0.0, 0.9);
        let load = src.load(gamma).unwrap();
        assert_eq!(load.nports(), 1);
        assert_eq!(load.s()[[10, 0, 0]], gamma);

        let at_z0 = src.load_impedance(src.z0()).unwrap();
        assert!(at_z0.s()[[0, 0, 0]].norm() < 1e-15);
    }
}
