//! Error types for the ribbon solver.
//!
//! All crates return `RibbonResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the ribbon solver.
#[derive(Debug, Error)]
pub enum RibbonError {
    /// Grid dimensions leave no interior cell.
    #[error("Invalid grid {width}x{height}: both dimensions must be at least 2")]
    InvalidGrid {
        width: usize,
        height: usize,
    },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Constraint graph references particles that do not exist.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Mesh handed to the solver does not match the particle lattice.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Timestep handed to the integrator is negative or not finite.
    #[error("Invalid timestep: {0}")]
    InvalidTimestep(f32),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, RibbonError>`.
pub type RibbonResult<T> = Result<T, RibbonError>;
