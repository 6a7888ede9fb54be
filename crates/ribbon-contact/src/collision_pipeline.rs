//! Per-tick collision pass: ground, then sphere, then planar projection.

use ribbon_math::Vec3;
use ribbon_solver::state::SolverState;

use crate::config::ContactConfig;
use crate::ground_plane::GroundPlane;
use crate::response::ContactResult;
use crate::sphere::{SphereBody, SphereCollider};

/// Runs every collision pass over the particle state once per tick.
///
/// The sphere body is optional; without one the sphere pass is skipped.
pub struct CollisionPipeline {
    /// Optional ground plane.
    pub ground: Option<GroundPlane>,
    /// Sphere response coefficients.
    pub sphere_collider: SphereCollider,
    sphere: Option<Box<dyn SphereBody>>,
}

impl CollisionPipeline {
    /// An empty pipeline: no ground, no sphere.
    pub fn new(sphere_collider: SphereCollider) -> Self {
        Self {
            ground: None,
            sphere_collider,
            sphere: None,
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        let pipeline = Self::new(SphereCollider::from_config(config));
        if config.ground_enabled {
            pipeline.with_ground(GroundPlane::from_config(config))
        } else {
            pipeline
        }
    }

    /// Add a ground plane.
    pub fn with_ground(mut self, ground: GroundPlane) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Attach the sphere the ribbon collides with.
    pub fn with_sphere(mut self, body: Box<dyn SphereBody>) -> Self {
        self.sphere = Some(body);
        self
    }

    /// Replace the attached sphere, returning the previous one.
    pub fn attach_sphere(&mut self, body: Box<dyn SphereBody>) -> Option<Box<dyn SphereBody>> {
        self.sphere.replace(body)
    }

    pub fn detach_sphere(&mut self) -> Option<Box<dyn SphereBody>> {
        self.sphere.take()
    }

    pub fn sphere(&self) -> Option<&dyn SphereBody> {
        self.sphere.as_deref()
    }

    pub fn sphere_mut(&mut self) -> Option<&mut (dyn SphereBody + 'static)> {
        self.sphere.as_deref_mut()
    }

    /// Run ground, sphere and planar projection in that order.
    pub fn step(&mut self, state: &mut SolverState) -> CollisionStepResult {
        let ground = match &self.ground {
            Some(ground) => ground.resolve(&mut state.particles),
            None => ContactResult::default(),
        };

        let sphere = match self.sphere.as_deref_mut() {
            Some(body) => self.sphere_collider.resolve(&mut state.particles, body),
            None => ContactResult::default(),
        };

        state.particles.enforce_planar();

        CollisionStepResult {
            ground,
            sphere_velocity: self.sphere.as_deref().map(|body| body.velocity()),
            sphere,
        }
    }
}

/// Result of a full collision pass.
#[derive(Debug, Clone)]
pub struct CollisionStepResult {
    pub ground: ContactResult,
    pub sphere: ContactResult,
    /// Sphere velocity after feedback, if a sphere is attached.
    pub sphere_velocity: Option<Vec3>,
}

impl CollisionStepResult {
    pub fn total_contacts(&self) -> u32 {
        self.ground.resolved_count + self.sphere.resolved_count
    }
}
