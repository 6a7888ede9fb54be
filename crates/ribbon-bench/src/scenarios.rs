//! Benchmark scenarios.
//!
//! 1. **Free fall**: no ground, the ribbon falls under gravity alone
//! 2. **Sphere sweep**: a sphere crosses the ribbon sideways and tears it
//! 3. **Ground drop**: the ribbon falls onto the ground and settles

use ribbon_math::Vec3;
use ribbon_sim::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    FreeFall,
    SphereSweep,
    GroundDrop,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::FreeFall,
            ScenarioKind::SphereSweep,
            ScenarioKind::GroundDrop,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::FreeFall => "free_fall",
            ScenarioKind::SphereSweep => "sphere_sweep",
            ScenarioKind::GroundDrop => "ground_drop",
        }
    }

    /// Inverse of [`ScenarioKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub config: SimulationConfig,
    /// Number of ticks to run.
    pub ticks: u32,
}

impl Scenario {
    /// Default 10×10 ribbon with the ground removed, 2 seconds.
    pub fn free_fall() -> Self {
        let mut config = SimulationConfig::default();
        config.contact.ground_enabled = false;
        Self {
            kind: ScenarioKind::FreeFall,
            config,
            ticks: 100,
        }
    }

    /// A sphere enters from the left at mid-height and crosses the
    /// ribbon at 6 units/s, 3 seconds.
    pub fn sphere_sweep() -> Self {
        let config = SimulationConfig::default()
            .with_sphere(Vec3::new(-2.0, 2.25, 0.0), Vec3::new(6.0, 0.0, 0.0));
        Self {
            kind: ScenarioKind::SphereSweep,
            config,
            ticks: 150,
        }
    }

    /// Default ribbon dropped onto the ground, 6 seconds.
    pub fn ground_drop() -> Self {
        Self {
            kind: ScenarioKind::GroundDrop,
            config: SimulationConfig::default(),
            ticks: 300,
        }
    }

    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::FreeFall => Self::free_fall(),
            ScenarioKind::SphereSweep => Self::sphere_sweep(),
            ScenarioKind::GroundDrop => Self::ground_drop(),
        }
    }
}
