//! Moving sphere obstacle.
//!
//! The sphere is owned elsewhere (a kinematic mover, a host physics body)
//! and reached through [`SphereBody`]. Each particle inside the sphere is
//! projected onto its surface, pushed outward and dragged along with the
//! sphere; the summed reaction is fed back into the sphere's velocity.

use ribbon_math::{normalize_or, Vec3};
use ribbon_solver::state::ParticleState;
use serde::{Deserialize, Serialize};

use crate::config::ContactConfig;
use crate::response::ContactResult;

/// Access to the moving sphere the ribbon collides with.
pub trait SphereBody: Send {
    /// Current center.
    fn position(&self) -> Vec3;

    /// Current linear velocity.
    fn velocity(&self) -> Vec3;

    /// Overwrite the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);

    /// Move the body forward by `dt`. Bodies stepped by their owner
    /// leave this a no-op.
    fn advance(&mut self, dt: f32) {
        let _ = dt;
    }
}

/// A sphere that moves at constant velocity unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicSphere {
    pub center: Vec3,
    pub velocity: Vec3,
}

impl KinematicSphere {
    pub fn new(center: Vec3, velocity: Vec3) -> Self {
        Self { center, velocity }
    }
}

impl SphereBody for KinematicSphere {
    fn position(&self) -> Vec3 {
        self.center
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Move the center by `velocity * dt`.
    fn advance(&mut self, dt: f32) {
        self.center += self.velocity * dt;
    }
}

/// Two-way sphere collision response.
#[derive(Debug, Clone)]
pub struct SphereCollider {
    pub radius: f32,
    /// Outward speed added along the contact normal.
    pub restitution: f32,
    /// Share of the sphere velocity handed to the particle.
    pub friction: f32,
    /// Scale of the reaction applied back to the sphere.
    pub feedback: f32,
}

impl SphereCollider {
    /// Creates a collider with the default coefficients.
    pub fn new(radius: f32) -> Self {
        let defaults = ContactConfig::default();
        Self {
            radius,
            restitution: defaults.sphere_restitution,
            friction: defaults.sphere_friction,
            feedback: defaults.sphere_feedback,
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self {
            radius: config.sphere_radius,
            restitution: config.sphere_restitution,
            friction: config.sphere_friction,
            feedback: config.sphere_feedback,
        }
    }

    /// Push penetrating particles to the surface and exchange momentum
    /// with `body`.
    ///
    /// Contacts are resolved in the particle's z plane: the particle moves
    /// within that plane onto the circle where the plane cuts the sphere,
    /// so it stays on the surface after the planar projection.
    ///
    /// A particle exactly on the surface is not a contact, nor is one with
    /// a non-finite position. A particle on the axis through the center is
    /// pushed out along +Y.
    pub fn resolve(&self, particles: &mut ParticleState, body: &mut dyn SphereBody) -> ContactResult {
        let center = body.position();
        let sphere_velocity = body.velocity();
        let mut result = ContactResult::default();

        for p in particles.ids() {
            let position = particles.position(p);
            let diff = position - center;
            let dist = diff.length();
            if dist.is_nan() || dist >= self.radius {
                continue;
            }

            // Radius of the circle cut by the particle's plane.
            let ring = (self.radius * self.radius - diff.z * diff.z).sqrt();
            let planar = Vec3::new(diff.x, diff.y, 0.0);
            let normal = normalize_or(planar, Vec3::Y);
            let depth = ring - planar.length();
            particles.set_position(
                p,
                Vec3::new(center.x, center.y, position.z) + normal * ring,
            );

            let impulse = self.restitution * normal + self.friction * sphere_velocity;
            let velocity = particles.velocity(p) + impulse;
            particles.set_velocity(p, velocity);

            // Reaction uses the particle velocity after the impulse.
            result.impulse_total += impulse - self.friction * velocity;
            result.resolved_count += 1;
            result.max_penetration = result.max_penetration.max(depth);
        }

        if result.resolved_count > 0 {
            body.set_velocity(sphere_velocity - self.feedback * result.impulse_total);
            tracing::trace!(
                contacts = result.resolved_count,
                "sphere reaction applied"
            );
        }

        result
    }
}
