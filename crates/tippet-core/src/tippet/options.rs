//! Composition settings

use crate::constants::{DEFAULT_SYSTEM_Z0, REFLECTIVE_TOL};
use crate::network::ReferenceImpedance;

/// Settings for one run of the composer
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Reference impedance of the returned composite
    pub system_z0: ReferenceImpedance,
    /// Measure pairs on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Distance from |Γ| = 1 under which a load counts as fully reflective
    pub reflective_tol: f64,
    /// Check loads before measuring; when off, bad loads surface as
    /// conversion errors from the measurement that hits them
    pub validate_loads: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            system_z0: ReferenceImpedance::from(DEFAULT_SYSTEM_Z0),
            parallel: true,
            reflective_tol: REFLECTIVE_TOL,
            validate_loads: true,
        }
    }
}

impl ComposeOptions {
    pub fn with_system_z0(mut self, z0: impl Into<ReferenceImpedance>) -> Self {
        self.system_z0 = z0.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_reflective_tol(mut self, tol: f64) -> Self {
        self.reflective_tol = tol;
        self
    }

    pub fn with_validate_loads(mut self, validate: bool) -> Self {
        self.validate_loads = validate;
        self
    }
}
