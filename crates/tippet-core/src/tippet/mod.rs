//! Tippet's technique
//!
//! Reconstructs an n-port from its C(n,2) 2-port sub-measurements. For
//! every pair of ports the remaining ports are terminated in known loads,
//! the 2-port result is renormalized to the impedances of the loads that
//! belong to the measured ports, and the block is written into a
//! composite referenced to the load impedances. A final renormalization
//! brings the composite to the system impedance.

mod accumulator;
mod composer;
mod options;

pub use accumulator::CompositeAccumulator;
pub use composer::{compose, port_pairs, Composer, Composition, SubMeasurement};
pub use options::ComposeOptions;
