//! Numerical constants for network calculations
//!
//! Provides standardized tolerance values and defaults used throughout
//! the library.

/// Tolerance for detecting near-zero values in division and singularity checks.
pub const NEAR_ZERO: f64 = 1e-15;

/// Default tolerance for property checks (reciprocity, etc).
/// This is the tolerance used when None is passed to property check functions.
pub const PROPERTY_TOL: f64 = 1e-12;

/// A load counts as fully reflective when `|Γ| >= 1 - REFLECTIVE_TOL`
/// at any frequency point.
pub const REFLECTIVE_TOL: f64 = 1e-9;

/// Default system impedance (Ohms) the composite is expressed in.
pub const DEFAULT_SYSTEM_Z0: f64 = 50.0;
