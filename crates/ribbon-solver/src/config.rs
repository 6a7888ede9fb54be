//! Solver configuration.
//!
//! Grid shape, spring coefficients and integration parameters. All of it
//! is fixed at construction; nothing here changes while a simulation runs.

use ribbon_types::constants::{DEFAULT_BREAK_THRESHOLD, DEFAULT_SUBSTEPS, GRAVITY};
use ribbon_types::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};

/// Configuration for the mass-spring solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Particles per row.
    pub grid_width: usize,

    /// Particles per column.
    pub grid_height: usize,

    /// Distance between neighbouring particles at rest.
    pub spacing: f32,

    /// Spring stiffness shared by every constraint.
    pub stiffness: f32,

    /// Damping coefficient shared by every constraint.
    pub damping: f32,

    /// Explicit Euler substeps per tick.
    pub substeps: u32,

    /// Gravity vector [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Upward speed given to `perturbed_particle` at setup.
    pub initial_velocity: f32,

    /// Particle that receives the initial kick.
    pub perturbed_particle: usize,

    /// Constraints stretched beyond this length break for good.
    pub break_threshold: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            spacing: 0.5,
            stiffness: 100.0,
            damping: 10.0,
            substeps: DEFAULT_SUBSTEPS,
            gravity: [0.0, -GRAVITY, 0.0],
            initial_velocity: 3.0,
            perturbed_particle: 0,
            break_threshold: DEFAULT_BREAK_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Creates a small config for debugging (3×3 grid, one substep).
    pub fn debug() -> Self {
        Self {
            grid_width: 3,
            grid_height: 3,
            substeps: 1,
            ..Default::default()
        }
    }

    /// Creates a stiffer, more finely substepped config.
    pub fn stiff() -> Self {
        Self {
            stiffness: 400.0,
            damping: 20.0,
            substeps: 8,
            ..Default::default()
        }
    }

    /// Number of particles in the lattice.
    pub fn particle_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Check every parameter before any buffer is allocated.
    pub fn validate(&self) -> RibbonResult<()> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(RibbonError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(RibbonError::InvalidConfig(format!(
                "Grid spacing must be positive, got {}",
                self.spacing
            )));
        }
        if self.substeps == 0 {
            return Err(RibbonError::InvalidConfig(
                "Substep count must be >= 1".into(),
            ));
        }
        if self.stiffness < 0.0 || self.damping < 0.0 {
            return Err(RibbonError::InvalidConfig(format!(
                "Stiffness and damping must be non-negative (stiffness {}, damping {})",
                self.stiffness, self.damping
            )));
        }
        if !(self.break_threshold > 0.0) {
            return Err(RibbonError::InvalidConfig(format!(
                "Break threshold must be positive, got {}",
                self.break_threshold
            )));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) || !self.initial_velocity.is_finite() {
            return Err(RibbonError::InvalidConfig(
                "Gravity and initial velocity must be finite".into(),
            ));
        }
        if self.perturbed_particle >= self.particle_count() {
            return Err(RibbonError::InvalidConfig(format!(
                "Perturbed particle {} is outside the {}-particle grid",
                self.perturbed_particle,
                self.particle_count()
            )));
        }
        Ok(())
    }
}
