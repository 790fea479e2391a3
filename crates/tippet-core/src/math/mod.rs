//! Mathematical functions module
//!
//! Provides the S/Z parameter transforms and the linear algebra they
//! rely on.

pub mod linalg;
pub mod matrix_ops;
pub mod transforms;

pub use transforms::*;
