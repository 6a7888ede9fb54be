//! Simulation event types.

use serde::{Deserialize, Serialize};

/// An event emitted by the simulation, tagged with the tick it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number (0-indexed).
    pub tick: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Tick started.
    TickBegin {
        /// Simulation time at the start of the tick (seconds).
        sim_time: f64,
        /// Requested tick length (seconds).
        dt: f32,
    },

    /// Tick completed.
    TickEnd {
        /// Wall-clock time for the whole tick (seconds).
        wall_time: f64,
    },

    /// Collision passes completed.
    Collision {
        ground_contacts: u32,
        sphere_contacts: u32,
        /// Sphere velocity after feedback, if a sphere is attached.
        sphere_velocity: Option<[f32; 3]>,
    },

    /// Constraints exceeded the break threshold this tick.
    ConstraintsBroken {
        newly_broken: u32,
        total_broken: u32,
    },

    /// Energy at the end of the tick.
    Energy {
        /// Kinetic energy with unit particle mass.
        kinetic: f64,
    },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Short stable name of the payload variant.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::TickBegin { .. } => "tick_begin",
            EventKind::TickEnd { .. } => "tick_end",
            EventKind::Collision { .. } => "collision",
            EventKind::ConstraintsBroken { .. } => "constraints_broken",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { .. } => "custom",
        }
    }
}
