//! Inspection hooks.
//!
//! Hooks observe the tick loop at fixed points without touching the
//! solver state.
//!
//! ```text
//! for each tick:
//!   hook.on_tick_begin(...)
//!   for each constraint broken this tick:
//!     hook.on_constraint_broken(...)
//!   hook.on_tick_end(...)
//! hook.on_simulation_end()
//! ```

use ribbon_telemetry::events::{EventKind, SimulationEvent};
use ribbon_types::ConstraintId;

/// Observer of the simulation tick loop. All callbacks default to no-ops.
pub trait InspectionHook: Send {
    fn on_tick_begin(&mut self, tick: u64, sim_time: f64, dt: f32) {
        let _ = (tick, sim_time, dt);
    }

    fn on_constraint_broken(&mut self, tick: u64, constraint: ConstraintId, length: f32) {
        let _ = (tick, constraint, length);
    }

    fn on_tick_end(&mut self, tick: u64, wall_time: f64) {
        let _ = (tick, wall_time);
    }

    fn on_simulation_end(&mut self) {}

    fn name(&self) -> &str;
}

/// Turns hook callbacks into telemetry events, buffered until drained.
#[derive(Debug, Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    broken_this_tick: u32,
    broken_total: u32,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered event.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl InspectionHook for TelemetryHook {
    fn on_tick_begin(&mut self, tick: u64, sim_time: f64, dt: f32) {
        self.broken_this_tick = 0;
        self.events
            .push(SimulationEvent::new(tick, EventKind::TickBegin { sim_time, dt }));
    }

    fn on_constraint_broken(&mut self, _tick: u64, _constraint: ConstraintId, _length: f32) {
        self.broken_this_tick += 1;
        self.broken_total += 1;
    }

    fn on_tick_end(&mut self, tick: u64, wall_time: f64) {
        if self.broken_this_tick > 0 {
            self.events.push(SimulationEvent::new(
                tick,
                EventKind::ConstraintsBroken {
                    newly_broken: self.broken_this_tick,
                    total_broken: self.broken_total,
                },
            ));
        }
        self.events
            .push(SimulationEvent::new(tick, EventKind::TickEnd { wall_time }));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Records every break as `(tick, constraint, length at break)`.
#[derive(Debug, Default)]
pub struct BreakRecorder {
    pub breaks: Vec<(u64, ConstraintId, f32)>,
    finished: bool,
}

impl BreakRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the simulation has reported its end.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl InspectionHook for BreakRecorder {
    fn on_constraint_broken(&mut self, tick: u64, constraint: ConstraintId, length: f32) {
        self.breaks.push((tick, constraint, length));
    }

    fn on_simulation_end(&mut self) {
        self.finished = true;
    }

    fn name(&self) -> &str {
        "break_recorder"
    }
}
