//! Force accumulation over a particle's active constraints.
//!
//! Spring and damping terms follow the sign convention of the constraint's
//! `start` endpoint; the `end` endpoint receives the negated force. Each
//! constraint's contribution is additionally scaled by `1 / dist`, which
//! is how the ribbon has always been tuned. Do not remove it without
//! retuning stiffness and damping.

use ribbon_math::{project, safe_length, Vec3};
use ribbon_types::ParticleId;

use crate::constraints::ConstraintTable;
use crate::state::ParticleState;

/// Net spring + damping force on particle `p`.
///
/// Skips empty adjacency slots, broken constraints and constraints whose
/// endpoints coincide (no direction to push along). Returns zero for a
/// particle with no active constraints.
pub fn force_on(particles: &ParticleState, constraints: &ConstraintTable, p: ParticleId) -> Vec3 {
    let mut total = Vec3::ZERO;

    for c in particles.adjacency[p.index()].iter().flatten().copied() {
        if !constraints.is_active(c) {
            continue;
        }
        let i = c.index();
        let [start, end] = constraints.ends[i];

        let diff = particles.position(end) - particles.position(start);
        let Some(dist) = safe_length(diff) else {
            continue;
        };

        // Hooke: zero at rest length, pulls when stretched, pushes when compressed.
        let mut force = constraints.stiffness[i] * diff * (dist - constraints.rest_length[i]) / dist;

        // Damp only the relative velocity along the constraint axis.
        let rel_vel = particles.velocity(end) - particles.velocity(start);
        force += constraints.damping[i] * project(rel_vel, diff);

        if end == p {
            force = -force;
        }

        total += force / dist;
    }

    total
}
