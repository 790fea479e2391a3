//! tippet-core: multiport network reconstruction from 2-port measurements
//!
//! Rebuilds the full scattering matrix of an n-port device from every
//! 2-port sub-measurement taken while the remaining ports sit on known,
//! possibly reflective, loads (Tippet's technique).
//!
//! ## Modules
//!
//! - `frequency` - Frequency grid representation
//! - `math` - S/Z conversions, renormalization, linear algebra helpers
//! - `network` - N-port network representation, connection, renormalization
//! - `source` - Synthetic network generation (random devices, loads)
//! - `tippet` - Composition of 2-port sub-measurements into an n-port

pub mod constants;
pub mod error;
pub mod frequency;
pub mod math;
pub mod network;
pub mod source;
pub mod tippet;

pub use error::{NetworkError, Result};
pub use frequency::Frequency;
pub use network::{Network, ReferenceImpedance};
pub use tippet::{compose, ComposeOptions, Composer, Composition};
