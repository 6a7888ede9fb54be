//! State snapshots.
//!
//! A snapshot captures particle positions, velocities and constraint
//! activity at one tick, serialized with `bincode`.

use std::path::Path;

use ribbon_solver::state::SolverState;
use ribbon_types::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};

/// Particle and constraint state at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tick count when the snapshot was taken.
    pub tick: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub particle_count: usize,
    /// Flat `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Flat `[vx0, vy0, vz0, ...]`.
    pub velocities: Vec<f32>,
    /// Per-constraint activity.
    pub active: Vec<bool>,
}

impl StateSnapshot {
    pub fn from_state(tick: u64, sim_time: f64, state: &SolverState) -> Self {
        let particles = &state.particles;
        let n = particles.particle_count;
        let mut positions = Vec::with_capacity(n * 3);
        let mut velocities = Vec::with_capacity(n * 3);

        for i in 0..n {
            positions.extend_from_slice(&[particles.pos_x[i], particles.pos_y[i], particles.pos_z[i]]);
            velocities.extend_from_slice(&[particles.vel_x[i], particles.vel_y[i], particles.vel_z[i]]);
        }

        Self {
            tick,
            sim_time,
            particle_count: n,
            positions,
            velocities,
            active: state.constraints.active_flags().to_vec(),
        }
    }

    pub fn constraint_count(&self) -> usize {
        self.active.len()
    }

    pub fn broken_count(&self) -> usize {
        self.active.iter().filter(|a| !**a).count()
    }

    /// Check that the flat buffers hold three components per particle.
    pub fn validate(&self) -> RibbonResult<()> {
        let expected = self.particle_count.checked_mul(3);
        if expected != Some(self.positions.len()) || expected != Some(self.velocities.len()) {
            return Err(RibbonError::Serialization(format!(
                "Snapshot of {} particles holds {} position and {} velocity components",
                self.particle_count,
                self.positions.len(),
                self.velocities.len()
            )));
        }
        Ok(())
    }

    /// Position of particle `i`, or `None` past the end of the buffer.
    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        match self.positions.get(3 * i..3 * i + 3)? {
            &[x, y, z] => Some([x, y, z]),
            _ => None,
        }
    }

    /// Largest distance between a snapshot position and the same particle
    /// in `other`. `None` if the particle counts differ or either snapshot
    /// is malformed.
    pub fn max_position_delta(&self, other: &StateSnapshot) -> Option<f32> {
        if self.particle_count != other.particle_count
            || self.validate().is_err()
            || other.validate().is_err()
        {
            return None;
        }
        let delta = self
            .positions
            .chunks_exact(3)
            .zip(other.positions.chunks_exact(3))
            .map(|(a, b)| {
                ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
            })
            .fold(0.0_f32, f32::max);
        Some(delta)
    }

    /// Write positions, velocities and breaks back into `state`.
    ///
    /// Constraints broken in the snapshot are broken in `state`; a
    /// constraint broken in `state` cannot be revived.
    pub fn restore_into(&self, state: &mut SolverState) -> RibbonResult<()> {
        self.validate()?;
        if state.particles.particle_count != self.particle_count
            || state.constraints.len() != self.active.len()
        {
            return Err(RibbonError::InvalidTopology(format!(
                "Snapshot has {} particles / {} constraints, state has {} / {}",
                self.particle_count,
                self.active.len(),
                state.particles.particle_count,
                state.constraints.len()
            )));
        }

        let particles = &mut state.particles;
        for i in 0..self.particle_count {
            particles.pos_x[i] = self.positions[3 * i];
            particles.pos_y[i] = self.positions[3 * i + 1];
            particles.pos_z[i] = self.positions[3 * i + 2];
            particles.vel_x[i] = self.velocities[3 * i];
            particles.vel_y[i] = self.velocities[3 * i + 1];
            particles.vel_z[i] = self.velocities[3 * i + 2];
        }

        for (c, _) in self.active.iter().enumerate().filter(|(_, a)| !**a) {
            state.constraints.deactivate((c as u32).into());
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> RibbonResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RibbonError::Serialization(e.to_string()))
    }

    /// Decode a snapshot, rejecting buffers that disagree with
    /// `particle_count`.
    pub fn from_bytes(data: &[u8]) -> RibbonResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| RibbonError::Serialization(format!("Snapshot deserialization failed: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> RibbonResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> RibbonResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
