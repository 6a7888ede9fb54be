//! Time integration.
//!
//! The simulation pipeline calls the integrator once per tick:
//!
//! ```text
//! let mut integrator = ExplicitEuler::from_config(&config);
//! loop {
//!     integrator.integrate(&mut state, dt)?;
//!     // collisions, constraint breaking, publication
//! }
//! ```

use std::time::Instant;

use ribbon_math::Vec3;
use ribbon_types::{RibbonError, RibbonResult};

use crate::config::SolverConfig;
use crate::forces::force_on;
use crate::state::SolverState;

/// Result of one integration call.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Substeps actually performed.
    pub substeps: u32,
    /// Substep length `dt / substeps`.
    pub substep_dt: f32,
    /// Wall-clock time for the whole call (seconds).
    pub wall_time: f64,
}

/// Trait for time integration schemes.
pub trait Integrator: Send {
    /// Advance particle velocities and positions by `dt`.
    ///
    /// Reads the constraint table, writes only particle state.
    /// Fails if `dt` is negative or not finite.
    fn integrate(&mut self, state: &mut SolverState, dt: f32) -> RibbonResult<StepResult>;

    /// Returns the integrator's name.
    fn name(&self) -> &str;
}

/// Substepped semi-implicit Euler.
///
/// Per substep, forces for *all* particles are computed from the
/// pre-update state before any particle is advanced.
#[derive(Debug, Clone)]
pub struct ExplicitEuler {
    gravity: Vec3,
    substeps: u32,
}

impl ExplicitEuler {
    pub fn new(gravity: Vec3, substeps: u32) -> Self {
        Self { gravity, substeps }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(Vec3::from_array(config.gravity), config.substeps)
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }
}

impl Integrator for ExplicitEuler {
    fn integrate(&mut self, state: &mut SolverState, dt: f32) -> RibbonResult<StepResult> {
        let start = Instant::now();

        if !dt.is_finite() || dt < 0.0 {
            return Err(RibbonError::InvalidTimestep(dt));
        }

        let substeps = self.substeps.max(1);
        let h = dt / substeps as f32;

        for _ in 0..substeps {
            // Pass 1: every force from the same snapshot of the state.
            for p in state.particles.ids() {
                let mut force = self.gravity + force_on(&state.particles, &state.constraints, p);
                force.z = 0.0;
                state.particles.set_force(p, force);
            }

            // Pass 2: advance velocity, then position with the new velocity.
            let particles = &mut state.particles;
            for i in 0..particles.particle_count {
                particles.vel_x[i] += particles.force_x[i] * h;
                particles.vel_y[i] += particles.force_y[i] * h;
                particles.vel_z[i] += particles.force_z[i] * h;

                particles.pos_x[i] += particles.vel_x[i] * h;
                particles.pos_y[i] += particles.vel_y[i] * h;
                particles.pos_z[i] += particles.vel_z[i] * h;
            }
        }

        Ok(StepResult {
            substeps,
            substep_dt: h,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "explicit_euler"
    }
}
