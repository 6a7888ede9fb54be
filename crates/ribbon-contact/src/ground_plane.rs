//! Ground plane collision.
//!
//! Prevents particles from sinking below a horizontal plane at
//! `y = level` and bounces them back with drag.

use ribbon_solver::state::ParticleState;

use crate::config::ContactConfig;
use crate::response::ContactResult;

/// Ground plane at a fixed Y height.
#[derive(Debug, Clone)]
pub struct GroundPlane {
    /// Height of the ground plane (Y coordinate).
    pub level: f32,
    /// Distance below `level` a penetrating particle is placed at.
    pub offset: f32,
    /// Uniform velocity factor on contact.
    pub drag: f32,
    /// Vertical reflection factor, applied after the drag.
    pub restitution: f32,
}

impl GroundPlane {
    /// Creates a ground plane with the default coefficients at `level`.
    pub fn new(level: f32) -> Self {
        let defaults = ContactConfig::default();
        Self {
            level,
            offset: defaults.ground_offset,
            drag: defaults.ground_drag,
            restitution: defaults.ground_restitution,
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self {
            level: config.ground_level,
            offset: config.ground_offset,
            drag: config.ground_drag,
            restitution: config.ground_restitution,
        }
    }

    /// Clamp every particle below the plane and reflect its vertical velocity.
    pub fn resolve(&self, particles: &mut ParticleState) -> ContactResult {
        let mut result = ContactResult::default();

        for i in 0..particles.particle_count {
            let depth = self.level - particles.pos_y[i];
            if depth <= 0.0 {
                continue;
            }

            particles.pos_y[i] = self.level - self.offset;

            particles.vel_x[i] *= self.drag;
            particles.vel_y[i] *= self.drag;
            particles.vel_z[i] *= self.drag;
            particles.vel_y[i] = -self.restitution * particles.vel_y[i];

            result.resolved_count += 1;
            result.max_penetration = result.max_penetration.max(depth);
        }

        result
    }
}
