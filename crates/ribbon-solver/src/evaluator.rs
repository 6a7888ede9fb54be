//! Constraint breaking.
//!
//! `Active → Broken`, one way, triggered only by over-extension.

use ribbon_types::ConstraintId;

use crate::config::SolverConfig;
use crate::state::SolverState;

/// Deactivates constraints stretched beyond a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator {
    pub break_threshold: f32,
}

impl ConstraintEvaluator {
    pub fn new(break_threshold: f32) -> Self {
        Self { break_threshold }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.break_threshold)
    }

    /// Break every active constraint whose current length exceeds the
    /// threshold. Returns the constraints broken by this call.
    pub fn evaluate(&self, state: &mut SolverState) -> Vec<ConstraintId> {
        let particles = &state.particles;
        let over_extended: Vec<ConstraintId> = state
            .constraints
            .active_ids()
            .filter(|&c| state.constraints.current_length(c, particles) > self.break_threshold)
            .collect();

        for &c in &over_extended {
            state.constraints.deactivate(c);
        }

        over_extended
    }
}
