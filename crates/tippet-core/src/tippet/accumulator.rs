//! The composite being assembled from 2-port blocks

use std::collections::BTreeSet;

use ndarray::{s, Array2, Array3};
use num_complex::Complex64;

use crate::error::{NetworkError, Result};
use crate::frequency::Frequency;
use crate::network::{Network, ReferenceImpedance};

/// Scattering tensor and reference impedance table filled pair by pair
///
/// Starts as a matched n-port. Each pair `(a, b)` owns the entries
/// `(a,a) (a,b) (b,a) (b,b)` of `s` and columns `a`, `b` of `z0`; the
/// diagonal entries are shared between pairs and carry the same value
/// when the measurements are consistent. Consumed by [`finish`], which
/// requires every pair to have been written.
///
/// [`finish`]: CompositeAccumulator::finish
#[derive(Debug)]
pub struct CompositeAccumulator {
    frequency: Frequency,
    s: Array3<Complex64>,
    z0: Array2<Complex64>,
    written: BTreeSet<(usize, usize)>,
}

impl CompositeAccumulator {
    /// Matched `nports`-port on `frequency` referenced to `z0`
    pub fn new(
        frequency: Frequency,
        nports: usize,
        z0: impl Into<ReferenceImpedance>,
    ) -> Result<Self> {
        let matched = Network::matched(frequency, nports, z0)?;
        Ok(Self {
            frequency: matched.frequency,
            s: matched.s,
            z0: matched.z0,
            written: BTreeSet::new(),
        })
    }

    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Write a 2-port measured on ports `a` and `b` (in that order)
    pub fn write_block(&mut self, a: usize, b: usize, sub: &Network) -> Result<()> {
        let n = self.nports();
        if a >= b || b >= n {
            return Err(NetworkError::Shape(format!(
                "invalid port pair ({}, {}) for a {}-port composite",
                a, b, n
            )));
        }
        if sub.nports() != 2 || !sub.frequency().same_grid(&self.frequency) {
            return Err(NetworkError::Shape(format!(
                "block for pair ({}, {}) must be a 2-port on the composite grid",
                a, b
            )));
        }

        let ports = [a, b];
        for (i, &m) in ports.iter().enumerate() {
            self.z0
                .slice_mut(s![.., m])
                .assign(&sub.z0().slice(s![.., i]));
            for (j, &q) in ports.iter().enumerate() {
                self.s
                    .slice_mut(s![.., m, q])
                    .assign(&sub.s().slice(s![.., i, j]));
            }
        }
        self.written.insert((a, b));
        Ok(())
    }

    /// Number of distinct pairs written so far
    pub fn pairs_written(&self) -> usize {
        self.written.len()
    }

    /// Renormalize the completed composite to `system_z0`
    pub fn finish(self, system_z0: &ReferenceImpedance) -> Result<Network> {
        let n = self.nports();
        let expected = n * n.saturating_sub(1) / 2;
        if self.written.len() != expected {
            return Err(NetworkError::Precondition(format!(
                "composite has {} of {} port pairs",
                self.written.len(),
                expected
            )));
        }

        let patchwork = Network::new(self.frequency, self.s, self.z0)?;
        patchwork.renormalize(system_z0.clone())
    }
}
