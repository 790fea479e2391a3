//! Composition of 2-port sub-measurements into an n-port

use itertools::Itertools;
use ndarray::{s, Array1, Array2, Axis};
use num_complex::Complex64;

use super::accumulator::CompositeAccumulator;
use super::options::ComposeOptions;
use crate::constants::NEAR_ZERO;
use crate::error::{NetworkError, Result};
use crate::network::{complement, Network, Perturbation, PortMap};

/// All unordered port pairs `(a, b)`, `a < b`, in lexicographic order
pub fn port_pairs(nports: usize) -> Vec<(usize, usize)> {
    (0..nports).tuple_combinations().collect()
}

/// One 2-port measurement of the device
#[derive(Debug, Clone)]
pub struct SubMeasurement {
    /// First measured port (original numbering)
    pub a: usize,
    /// Second measured port (original numbering), `a < b`
    pub b: usize,
    /// The 2-port as measured, referenced to the device's own impedances
    pub raw: Network,
    /// The 2-port renormalized to the load impedances of ports `a` and `b`
    pub renormalized: Network,
}

impl SubMeasurement {
    /// Index (0 or 1) of original `port` within this 2-port
    fn local_index(&self, port: usize) -> Option<usize> {
        if port == self.a {
            Some(0)
        } else if port == self.b {
            Some(1)
        } else {
            None
        }
    }
}

/// Result of a composition: the composite and every sub-measurement
#[derive(Debug, Clone)]
pub struct Composition {
    composite: Network,
    measurements: Vec<SubMeasurement>,
}

impl Composition {
    /// The reconstructed n-port at the system impedance
    pub fn composite(&self) -> &Network {
        &self.composite
    }

    pub fn into_composite(self) -> Network {
        self.composite
    }

    /// Sub-measurements in pair order
    pub fn measurements(&self) -> &[SubMeasurement] {
        &self.measurements
    }

    /// The measurement of ports `a` and `b`, in either order
    pub fn measurement(&self, a: usize, b: usize) -> Option<&SubMeasurement> {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.measurements.iter().find(|m| m.a == a && m.b == b)
    }

    fn estimates(&self, port: usize, renormalized: bool) -> Vec<Array1<Complex64>> {
        self.measurements
            .iter()
            .filter_map(|m| {
                let i = m.local_index(port)?;
                let ntwk = if renormalized { &m.renormalized } else { &m.raw };
                Some(ntwk.s_ij(i, i))
            })
            .collect()
    }

    /// Every renormalized estimate of `S[port, port]`, one per pair containing `port`
    pub fn reflection_estimates(&self, port: usize) -> Vec<Array1<Complex64>> {
        self.estimates(port, true)
    }

    /// Every raw estimate of `S[port, port]`
    pub fn raw_reflection_estimates(&self, port: usize) -> Vec<Array1<Complex64>> {
        self.estimates(port, false)
    }

    /// Largest disagreement between the renormalized estimates of `S[port, port]`
    ///
    /// Exact measurements give a spread at numerical precision.
    pub fn reflection_spread(&self, port: usize) -> f64 {
        spread(&self.reflection_estimates(port))
    }

    /// Largest disagreement between the raw estimates of `S[port, port]`
    pub fn raw_reflection_spread(&self, port: usize) -> f64 {
        spread(&self.raw_reflection_estimates(port))
    }

    /// `reflection_spread` maximized over all ports
    pub fn max_reflection_spread(&self) -> f64 {
        (0..self.composite.nports())
            .map(|p| self.reflection_spread(p))
            .fold(0.0, f64::max)
    }
}

fn spread(estimates: &[Array1<Complex64>]) -> f64 {
    let mut worst = 0.0_f64;
    for (x, y) in estimates.iter().tuple_combinations() {
        for (u, v) in x.iter().zip(y.iter()) {
            worst = worst.max((u - v).norm());
        }
    }
    worst
}

/// Runs Tippet's technique on a device and a set of loads
pub struct Composer<'p> {
    options: ComposeOptions,
    perturbation: Option<&'p dyn Perturbation>,
}

impl<'p> Composer<'p> {
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            options,
            perturbation: None,
        }
    }

    /// Apply `perturbation` to every raw measurement before renormalization
    pub fn with_perturbation(mut self, perturbation: &'p dyn Perturbation) -> Self {
        self.perturbation = Some(perturbation);
        self
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Reconstruct `dut` from its 2-port sub-measurements
    ///
    /// # Arguments
    /// * `dut` - The n-port device, n >= 2
    /// * `loads` - One 1-port load per device port; `loads[k]` terminates
    ///   port `k` whenever it is not being measured
    ///
    /// Fails as a whole on the first error; the error names the pair or
    /// port that caused it.
    pub fn run(&self, dut: &Network, loads: &[Network]) -> Result<Composition> {
        let nports = dut.nports();
        let _span = tracing::debug_span!("tippet", nports, nfreq = dut.nfreq()).entered();

        check_shapes(dut, loads)?;
        if self.options.validate_loads {
            self.check_loads(loads)?;
        }

        let load_z = load_impedances(dut, loads)?;
        let pairs = port_pairs(nports);
        let measurements = self.measure_all(dut, loads, &load_z, &pairs)?;

        let mut acc = CompositeAccumulator::new(dut.frequency().clone(), nports, load_z)?;
        for m in &measurements {
            acc.write_block(m.a, m.b, &m.renormalized)
                .map_err(|e| e.in_pair(m.a, m.b))?;
        }

        tracing::debug!(pairs = pairs.len(), "renormalizing composite to system impedance");
        let composite = acc.finish(&self.options.system_z0)?;
        let composite = match dut.name() {
            Some(name) => composite.with_name(format!("{} composite", name)),
            None => composite.with_name("composite"),
        };

        Ok(Composition {
            composite,
            measurements,
        })
    }

    /// At most one load may be fully reflective
    fn check_loads(&self, loads: &[Network]) -> Result<()> {
        let limit = 1.0 - self.options.reflective_tol;
        let reflective: Vec<usize> = loads
            .iter()
            .enumerate()
            .filter(|(_, load)| load.s().iter().any(|g| g.norm() >= limit))
            .map(|(k, _)| k)
            .collect();

        match reflective.len() {
            0 => Ok(()),
            1 => {
                tracing::warn!(port = reflective[0], "fully reflective load");
                Ok(())
            }
            _ => Err(NetworkError::Precondition(format!(
                "loads on ports {:?} are fully reflective; at most one is allowed",
                reflective
            ))),
        }
    }

    fn measure_all(
        &self,
        dut: &Network,
        loads: &[Network],
        load_z: &Array2<Complex64>,
        pairs: &[(usize, usize)],
    ) -> Result<Vec<SubMeasurement>> {
        let measure = |(idx, &(a, b)): (usize, &(usize, usize))| {
            self.measure(dut, loads, load_z, idx, a, b)
                .map_err(|e| e.in_pair(a, b))
        };

        #[cfg(feature = "parallel")]
        if self.options.parallel {
            use rayon::prelude::*;
            return pairs.par_iter().enumerate().map(measure).collect();
        }

        pairs.iter().enumerate().map(measure).collect()
    }

    /// Terminate every port but `a` and `b`, then renormalize to their loads
    fn measure(
        &self,
        dut: &Network,
        loads: &[Network],
        load_z: &Array2<Complex64>,
        idx: usize,
        a: usize,
        b: usize,
    ) -> Result<SubMeasurement> {
        let mut ports = PortMap::new(dut.nports());
        let mut ntwk = dut.clone();
        for c in complement(dut.nports(), &[a, b]) {
            let current = ports.remove(c)?;
            ntwk = ntwk
                .terminate(current, &loads[c])
                .map_err(|e| e.on_port(c))?;
        }
        debug_assert_eq!(ports.remaining(), vec![a, b]);

        let raw = match self.perturbation {
            Some(p) => p.perturb(&ntwk, idx as u64)?,
            None => ntwk,
        };

        let renormalized = raw.renormalize(load_z.select(Axis(1), &[a, b]))?;
        tracing::debug!(a, b, "measured port pair");

        Ok(SubMeasurement {
            a,
            b,
            raw,
            renormalized,
        })
    }
}

/// Reconstruct `dut` from its 2-port sub-measurements with `options`
pub fn compose(dut: &Network, loads: &[Network], options: &ComposeOptions) -> Result<Composition> {
    Composer::new(options.clone()).run(dut, loads)
}

fn check_shapes(dut: &Network, loads: &[Network]) -> Result<()> {
    if dut.nports() < 2 {
        return Err(NetworkError::Shape(format!(
            "device needs at least 2 ports, has {}",
            dut.nports()
        )));
    }
    if loads.len() != dut.nports() {
        return Err(NetworkError::Shape(format!(
            "{} loads for a {}-port device",
            loads.len(),
            dut.nports()
        )));
    }
    for (k, load) in loads.iter().enumerate() {
        if load.nports() != 1 {
            return Err(NetworkError::Shape(format!(
                "load on port {} has {} ports",
                k,
                load.nports()
            )));
        }
        if !load.frequency().same_grid(dut.frequency()) {
            return Err(NetworkError::Precondition(format!(
                "load on port {} is sampled on a different frequency grid",
                k
            )));
        }
    }
    Ok(())
}

/// Impedance of each load, [nfreq, nports]
///
/// A load must have an impedance (not open) that can serve as a reference
/// impedance (not short).
fn load_impedances(dut: &Network, loads: &[Network]) -> Result<Array2<Complex64>> {
    let mut z = Array2::<Complex64>::zeros((dut.nfreq(), loads.len()));
    for (k, load) in loads.iter().enumerate() {
        let z_load = load.z().map_err(|e| e.on_port(k))?;
        let column = z_load.slice(s![.., 0, 0]);
        if let Some(freq_index) = column.iter().position(|v| v.norm() < NEAR_ZERO) {
            return Err(NetworkError::ZeroImpedance { port: k, freq_index }.on_port(k));
        }
        z.slice_mut(s![.., k]).assign(&column);
    }
    Ok(z)
}
