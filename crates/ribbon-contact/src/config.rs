//! Contact configuration.
//!
//! Restitution, drag and coupling coefficients for the ground and sphere
//! passes. The defaults are the empirically tuned values the ribbon
//! ships with; the sphere coupling is not momentum-exact.

use ribbon_types::constants::{DEFAULT_GROUND_LEVEL, DEFAULT_SPHERE_RADIUS};
use ribbon_types::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};

/// Configuration for the collision pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Whether the ground pass runs at all.
    pub ground_enabled: bool,

    /// Height of the ground plane (Y coordinate).
    pub ground_level: f32,

    /// Penetrating particles are placed at `ground_level - ground_offset`.
    pub ground_offset: f32,

    /// Factor applied to the whole velocity on ground contact.
    pub ground_drag: f32,

    /// Vertical velocity reflection factor on ground contact.
    pub ground_restitution: f32,

    /// Sphere obstacle radius.
    pub sphere_radius: f32,

    /// Outward speed added along the contact normal.
    pub sphere_restitution: f32,

    /// Share of the sphere's velocity handed to a touching particle.
    pub sphere_friction: f32,

    /// Scale of the reaction fed back into the sphere's velocity.
    pub sphere_feedback: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            ground_enabled: true,
            ground_level: DEFAULT_GROUND_LEVEL,
            ground_offset: 0.001,
            ground_drag: 0.9,
            ground_restitution: 0.8,
            sphere_radius: DEFAULT_SPHERE_RADIUS,
            sphere_restitution: 0.5,
            sphere_friction: 0.3,
            sphere_feedback: 0.12,
        }
    }
}

impl ContactConfig {
    /// Collision against the sphere only.
    pub fn without_ground() -> Self {
        Self {
            ground_enabled: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> RibbonResult<()> {
        if !(self.sphere_radius > 0.0 && self.sphere_radius.is_finite()) {
            return Err(RibbonError::InvalidConfig(format!(
                "Sphere radius must be positive, got {}",
                self.sphere_radius
            )));
        }
        let coefficients = [
            ("ground_offset", self.ground_offset),
            ("ground_drag", self.ground_drag),
            ("ground_restitution", self.ground_restitution),
            ("sphere_restitution", self.sphere_restitution),
            ("sphere_friction", self.sphere_friction),
            ("sphere_feedback", self.sphere_feedback),
        ];
        if let Some((name, value)) = coefficients
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
        {
            return Err(RibbonError::InvalidConfig(format!(
                "{name} must be finite and non-negative, got {value}"
            )));
        }
        if !self.ground_level.is_finite() {
            return Err(RibbonError::InvalidConfig(
                "Ground level must be finite".into(),
            ));
        }
        Ok(())
    }
}
