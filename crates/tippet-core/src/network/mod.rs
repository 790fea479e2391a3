//! Network module - N-port electrical network representation
//!
//! Provides the core Network struct together with the operations the
//! composition relies on: S/Z access, port connection, renormalization
//! and port bookkeeping.

mod connect;
mod core;
mod impedance;
mod noise;
mod params;
mod ports;
mod properties;
mod renormalize;

pub use connect::{connect, connect_z, innerconnect_multi_z, innerconnect_z};
pub use core::Network;
pub use impedance::ReferenceImpedance;
pub use noise::{Perturbation, PolarNoise};
pub use ports::{complement, PortMap};
