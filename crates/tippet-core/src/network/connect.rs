//! Network connection functions
//!
//! Connections are computed on impedance parameters. Joining port `k` to
//! port `l` imposes `V_k = V_l` and `I_k = -I_l`; with the incidence
//! matrix `C` (one row per connection, `+1` at `k`, `-1` at `l`) the
//! remaining external ports see the Schur complement
//!
//! `Z' = Z_ee - Z_ec (C Z C^T)^-1 Z_ce`
//!
//! Working in Z makes the result independent of the reference impedances
//! of the joined ports, so a load defined against any z0 can terminate
//! any port. The surviving ports keep their own reference impedances.

use std::collections::HashSet;

use nalgebra::DMatrix;
use ndarray::{concatenate, s, Array2, Array3, Axis};
use num_complex::Complex64;

use super::core::Network;
use crate::error::{NetworkError, Result};
use crate::math::transforms::z2s;

/// Generic Z-parameter connection algorithm.
///
/// Connects multiple port pairs within a single network.
///
/// # Arguments
/// * `z` - Z-parameter matrix [nfreq, nports, nports]
/// * `connections` - List of port pairs to connect [(k, l), ...]
///
/// # Returns
/// Z-parameters of the remaining ports, in their original relative order.
pub fn innerconnect_multi_z(
    z: &Array3<Complex64>,
    connections: &[(usize, usize)],
) -> Result<Array3<Complex64>> {
    let (nfreq, nports, _) = z.dim();

    if connections.is_empty() {
        return Ok(z.clone());
    }

    let mut internal = HashSet::new();
    for &(k, l) in connections {
        if k >= nports || l >= nports {
            return Err(NetworkError::Domain(format!(
                "connection ({}, {}) out of range for {} ports",
                k, l, nports
            )));
        }
        if k == l {
            return Err(NetworkError::Domain(format!(
                "cannot connect port {} to itself",
                k
            )));
        }
        if !internal.insert(k) || !internal.insert(l) {
            return Err(NetworkError::Domain(format!(
                "port in connection ({}, {}) is connected more than once",
                k, l
            )));
        }
    }

    let ext_ports: Vec<usize> = (0..nports).filter(|p| !internal.contains(p)).collect();
    let n_ext = ext_ports.len();
    if n_ext == 0 {
        return Err(NetworkError::Domain(
            "connection leaves no external ports".to_string(),
        ));
    }

    // Incidence matrix C [n_conn, nports]
    let n_conn = connections.len();
    let mut c = DMatrix::<Complex64>::zeros(n_conn, nports);
    for (r, &(k, l)) in connections.iter().enumerate() {
        c[(r, k)] = Complex64::new(1.0, 0.0);
        c[(r, l)] = Complex64::new(-1.0, 0.0);
    }
    let c_t = c.transpose();

    let mut result = Array3::<Complex64>::zeros((nfreq, n_ext, n_ext));

    for f in 0..nfreq {
        let z_f = DMatrix::<Complex64>::from_fn(nports, nports, |i, j| z[[f, i, j]]);

        let z_ct = &z_f * &c_t;
        let c_z = &c * &z_f;
        let z_cc = &c * &z_ct;

        let z_cc_inv = z_cc.try_inverse().ok_or(NetworkError::Singular {
            operation: "port elimination",
            freq_index: f,
        })?;

        let z_ee = z_f.select_rows(&ext_ports).select_columns(&ext_ports);
        let z_ec = z_ct.select_rows(&ext_ports);
        let z_ce = c_z.select_columns(&ext_ports);

        let z_new = z_ee - z_ec * z_cc_inv * z_ce;

        for i in 0..n_ext {
            for j in 0..n_ext {
                result[[f, i, j]] = z_new[(i, j)];
            }
        }
    }

    Ok(result)
}

/// Connect two ports of a single n-port network's z-matrix.
pub fn innerconnect_z(z: &Array3<Complex64>, k: usize, l: usize) -> Result<Array3<Complex64>> {
    innerconnect_multi_z(z, &[(k, l)])
}

/// Connect two n-port networks' z-matrices together.
///
/// Connects port `k` on network `A` to port `l` on network `B`.
/// The resultant network has (nports_a + nports_b - 2) ports: A's
/// remaining ports followed by B's.
///
/// # Arguments
/// * `a` - Z-parameter matrix of network A [nfreq, nports_a, nports_a]
/// * `k` - Port index on A (0-indexed)
/// * `b` - Z-parameter matrix of network B [nfreq, nports_b, nports_b]
/// * `l` - Port index on B (0-indexed)
pub fn connect_z(
    a: &Array3<Complex64>,
    k: usize,
    b: &Array3<Complex64>,
    l: usize,
) -> Result<Array3<Complex64>> {
    let nfreq = a.shape()[0];
    let nports_a = a.shape()[1];
    let nports_b = b.shape()[1];

    check_port("A", k, nports_a)?;
    check_port("B", l, nports_b)?;
    if b.shape()[0] != nfreq {
        return Err(NetworkError::Domain(format!(
            "frequency count mismatch: {} vs {}",
            nfreq,
            b.shape()[0]
        )));
    }

    // Block-diagonal composite: no coupling between A and B until connected
    let nc = nports_a + nports_b;
    let mut c = Array3::<Complex64>::zeros((nfreq, nc, nc));
    c.slice_mut(s![.., ..nports_a, ..nports_a]).assign(a);
    c.slice_mut(s![.., nports_a.., nports_a..]).assign(b);

    innerconnect_z(&c, k, nports_a + l)
}

fn check_port(label: &str, port: usize, nports: usize) -> Result<()> {
    if port >= nports {
        return Err(NetworkError::Domain(format!(
            "port {} out of range (network {} has {} ports)",
            port, label, nports
        )));
    }
    Ok(())
}

/// Reference impedance columns of `z0` without the listed ports
fn surviving_z0(z0: &Array2<Complex64>, removed: &[usize]) -> Array2<Complex64> {
    let keep: Vec<usize> = (0..z0.shape()[1])
        .filter(|p| !removed.contains(p))
        .collect();
    z0.select(Axis(1), &keep)
}

/// Connect port `k` of `a` to port `l` of `b`
///
/// Free-function form of [`Network::connect`].
pub fn connect(a: &Network, k: usize, b: &Network, l: usize) -> Result<Network> {
    a.connect(k, b, l)
}

impl Network {
    /// Connect two ports of this network together (innerconnect)
    ///
    /// Connects port `k` to port `l`, resulting in a (nports-2)-port network.
    pub fn innerconnect(&self, k: usize, l: usize) -> Result<Network> {
        check_port("A", k, self.nports())?;
        check_port("A", l, self.nports())?;

        let z_new = innerconnect_z(&self.z()?, k, l)?;
        let z0_new = surviving_z0(&self.z0, &[k, l]);
        let s_new = z2s(&z_new, &z0_new)?;

        Network::new(self.frequency.clone(), s_new, z0_new)
    }

    /// Connect this network's port `k` to another network's port `l`
    ///
    /// Returns a new network with (nports_self + nports_other - 2) ports:
    /// this network's remaining ports in order, then the other's.
    pub fn connect(&self, k: usize, other: &Network, l: usize) -> Result<Network> {
        if !self.frequency.same_grid(&other.frequency) {
            return Err(NetworkError::Domain(format!(
                "frequency grids differ ({} vs {} points)",
                self.nfreq(),
                other.nfreq()
            )));
        }
        check_port("A", k, self.nports())?;
        check_port("B", l, other.nports())?;

        tracing::trace!(
            port_a = k,
            port_b = l,
            nports_a = self.nports(),
            nports_b = other.nports(),
            "connecting networks"
        );

        let z_new = connect_z(&self.z()?, k, &other.z()?, l)?;
        let z0_new = concatenate(
            Axis(1),
            &[
                surviving_z0(&self.z0, &[k]).view(),
                surviving_z0(&other.z0, &[l]).view(),
            ],
        )
        .map_err(|e| NetworkError::Shape(e.to_string()))?;
        let s_new = z2s(&z_new, &z0_new)?;

        Network::new(self.frequency.clone(), s_new, z0_new)
    }

    /// Terminate `port` with a 1-port `load`
    ///
    /// The load may be reflective and defined against any reference
    /// impedance; only its impedance matters.
    pub fn terminate(&self, port: usize, load: &Network) -> Result<Network> {
        if load.nports() != 1 {
            return Err(NetworkError::Shape(format!(
                "a termination must be a 1-port, got {} ports",
                load.nports()
            )));
        }
        self.connect(port, load, 0)
    }
}
