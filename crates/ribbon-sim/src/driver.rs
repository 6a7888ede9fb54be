//! Fixed-step driver.
//!
//! Accumulates elapsed wall-clock time and runs one simulation step per
//! whole `dt`. The simulation itself never schedules ticks.

use std::time::Duration;

use ribbon_types::{RibbonError, RibbonResult};

use crate::simulation::{RibbonSimulation, TickReport};

pub struct FixedStepDriver {
    dt: f32,
    accumulator: f32,
    /// Upper bound on steps per [`FixedStepDriver::advance`] call.
    pub max_ticks_per_advance: u32,
    paused: bool,
}

impl FixedStepDriver {
    /// Fails unless `dt` is positive and finite.
    pub fn new(dt: f32) -> RibbonResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(RibbonError::InvalidTimestep(dt));
        }
        Ok(Self {
            dt,
            accumulator: 0.0,
            max_ticks_per_advance: 8,
            paused: false,
        })
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time carried over to the next [`FixedStepDriver::advance`].
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// A paused driver discards elapsed time.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Feed `elapsed` wall-clock time and run every whole step it covers.
    /// Returns the number of steps run.
    ///
    /// Time beyond `max_ticks_per_advance` steps is dropped.
    pub fn advance(&mut self, elapsed: Duration, sim: &mut RibbonSimulation) -> RibbonResult<u32> {
        if self.paused {
            return Ok(0);
        }
        self.accumulator += elapsed.as_secs_f32();

        let mut ran = 0;
        while self.accumulator >= self.dt && ran < self.max_ticks_per_advance {
            self.step(sim)?;
            self.accumulator -= self.dt;
            ran += 1;
        }

        if self.accumulator >= self.dt {
            tracing::warn!(
                dropped = self.accumulator,
                "fixed step driver falling behind, dropping time"
            );
            self.accumulator = 0.0;
        }
        Ok(ran)
    }

    /// Run exactly one step regardless of accumulated time.
    pub fn step(&mut self, sim: &mut RibbonSimulation) -> RibbonResult<TickReport> {
        sim.step(self.dt)
    }
}
