//! Top-level simulation configuration.

use std::path::Path;

use ribbon_contact::ContactConfig;
use ribbon_math::Vec3;
use ribbon_solver::SolverConfig;
use ribbon_types::constants::DEFAULT_DT;
use ribbon_types::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};

/// Initial state of the built-in kinematic sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereSetup {
    pub center: [f32; 3],
    pub velocity: [f32; 3],
}

impl SphereSetup {
    pub fn new(center: Vec3, velocity: Vec3) -> Self {
        Self {
            center: center.to_array(),
            velocity: velocity.to_array(),
        }
    }
}

/// Everything needed to build a [`crate::RibbonSimulation`].
///
/// ```toml
/// dt = 0.02
///
/// [solver]
/// grid_width = 10
/// grid_height = 10
///
/// [contact]
/// ground_level = -4.0
///
/// [sphere]
/// center = [2.0, 6.0, 0.0]
/// velocity = [0.0, -3.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed tick length in seconds.
    pub dt: f32,
    pub solver: SolverConfig,
    pub contact: ContactConfig,
    /// Seeds a kinematic sphere when present.
    pub sphere: Option<SphereSetup>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            solver: SolverConfig::default(),
            contact: ContactConfig::default(),
            sphere: None,
        }
    }
}

impl SimulationConfig {
    /// Small grid with no sphere, for quick checks.
    pub fn debug() -> Self {
        Self {
            solver: SolverConfig::debug(),
            ..Default::default()
        }
    }

    pub fn with_sphere(mut self, center: Vec3, velocity: Vec3) -> Self {
        self.sphere = Some(SphereSetup::new(center, velocity));
        self
    }

    pub fn from_toml_str(text: &str) -> RibbonResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| RibbonError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RibbonResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> RibbonResult<String> {
        toml::to_string_pretty(self).map_err(|e| RibbonError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> RibbonResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(RibbonError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        self.solver.validate()?;
        self.contact.validate()?;
        if let Some(sphere) = &self.sphere {
            if !sphere.center.iter().chain(&sphere.velocity).all(|v| v.is_finite()) {
                return Err(RibbonError::InvalidConfig(
                    "Sphere center and velocity must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}
