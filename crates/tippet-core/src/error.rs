//! Error types for network operations

use thiserror::Error;

/// Errors raised by conversions, connections, renormalization and composition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Port counts, frequency counts or matrix dimensions do not line up.
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// The requested connection is not defined for the given operands.
    #[error("invalid connection: {0}")]
    Domain(String),

    /// A linear system in a parameter conversion or port elimination is singular.
    #[error("singular matrix in {operation} at frequency index {freq_index}")]
    Singular {
        operation: &'static str,
        freq_index: usize,
    },

    /// A reference impedance is zero, which leaves the wave definition undefined.
    #[error("zero reference impedance at port {port}, frequency index {freq_index}")]
    ZeroImpedance { port: usize, freq_index: usize },

    /// Inputs of a composition violate its documented preconditions.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The load assigned to a port could not be evaluated.
    #[error("load on port {port}: {source}")]
    Termination {
        port: usize,
        #[source]
        source: Box<NetworkError>,
    },

    /// A 2-port sub-measurement failed.
    #[error("sub-measurement of ports ({a}, {b}): {source}")]
    Measurement {
        a: usize,
        b: usize,
        #[source]
        source: Box<NetworkError>,
    },
}

impl NetworkError {
    /// True if the root cause is a singular conversion or elimination step.
    pub fn is_singular(&self) -> bool {
        match self {
            NetworkError::Singular { .. } | NetworkError::ZeroImpedance { .. } => true,
            NetworkError::Termination { source, .. } | NetworkError::Measurement { source, .. } => {
                source.is_singular()
            }
            _ => false,
        }
    }

    /// Wrap this error with the pair of ports being measured.
    pub(crate) fn in_pair(self, a: usize, b: usize) -> Self {
        NetworkError::Measurement {
            a,
            b,
            source: Box::new(self),
        }
    }

    /// Wrap this error with the port whose load caused it.
    pub(crate) fn on_port(self, port: usize) -> Self {
        NetworkError::Termination {
            port,
            source: Box::new(self),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;
