//! Simulation state: SoA buffers for all per-particle data.
//!
//! This is the primary mutable data structure during simulation.
//! Every stage of a tick reads and writes it through [`SolverState`].

use ribbon_math::Vec3;
use ribbon_types::{ParticleId, RibbonResult};

use crate::config::SolverConfig;
use crate::constraints::ConstraintTable;
use crate::topology::{Adjacency, RibbonTopology};

/// SoA particle buffers.
///
/// All arrays have length `particle_count`. The simulation is planar:
/// `pos_z` and `vel_z` stay zero.
#[derive(Debug, Clone)]
pub struct ParticleState {
    /// Number of particles.
    pub particle_count: usize,

    // ─── Position ───
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    // ─── Velocity ───
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vel_z: Vec<f32>,

    // ─── Force (scratch, rewritten every substep) ───
    pub force_x: Vec<f32>,
    pub force_y: Vec<f32>,
    pub force_z: Vec<f32>,

    /// Constraints touching each particle.
    pub adjacency: Vec<Adjacency>,
}

impl ParticleState {
    /// Initialize particles at their rest positions, at rest.
    pub fn from_topology(topology: &RibbonTopology) -> Self {
        let n = topology.particle_count();
        Self {
            particle_count: n,
            pos_x: topology.rest_positions.iter().map(|p| p.x).collect(),
            pos_y: topology.rest_positions.iter().map(|p| p.y).collect(),
            pos_z: topology.rest_positions.iter().map(|p| p.z).collect(),
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            vel_z: vec![0.0; n],
            force_x: vec![0.0; n],
            force_y: vec![0.0; n],
            force_z: vec![0.0; n],
            adjacency: topology.adjacency.clone(),
        }
    }

    #[inline]
    pub fn position(&self, p: ParticleId) -> Vec3 {
        let i = p.index();
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn velocity(&self, p: ParticleId) -> Vec3 {
        let i = p.index();
        Vec3::new(self.vel_x[i], self.vel_y[i], self.vel_z[i])
    }

    #[inline]
    pub fn force(&self, p: ParticleId) -> Vec3 {
        let i = p.index();
        Vec3::new(self.force_x[i], self.force_y[i], self.force_z[i])
    }

    #[inline]
    pub fn set_position(&mut self, p: ParticleId, v: Vec3) {
        let i = p.index();
        self.pos_x[i] = v.x;
        self.pos_y[i] = v.y;
        self.pos_z[i] = v.z;
    }

    #[inline]
    pub fn set_velocity(&mut self, p: ParticleId, v: Vec3) {
        let i = p.index();
        self.vel_x[i] = v.x;
        self.vel_y[i] = v.y;
        self.vel_z[i] = v.z;
    }

    #[inline]
    pub fn set_force(&mut self, p: ParticleId, v: Vec3) {
        let i = p.index();
        self.force_x[i] = v.x;
        self.force_y[i] = v.y;
        self.force_z[i] = v.z;
    }

    /// Iterate all particle ids in index order.
    pub fn ids(&self) -> impl Iterator<Item = ParticleId> {
        (0..self.particle_count as u32).map(ParticleId)
    }

    /// Force the out-of-plane components of position and velocity to zero.
    pub fn enforce_planar(&mut self) {
        self.pos_z.fill(0.0);
        self.vel_z.fill(0.0);
    }

    /// Compute total kinetic energy with unit mass: 0.5 * Σ ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        (0..self.particle_count)
            .map(|i| {
                let vx = self.vel_x[i] as f64;
                let vy = self.vel_y[i] as f64;
                let vz = self.vel_z[i] as f64;
                0.5 * (vx * vx + vy * vy + vz * vz)
            })
            .sum()
    }

    /// Returns true if every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        [
            &self.pos_x, &self.pos_y, &self.pos_z, &self.vel_x, &self.vel_y, &self.vel_z,
        ]
        .iter()
        .all(|channel| channel.iter().all(|v| v.is_finite()))
    }
}

/// Everything the solver owns, passed by exclusive reference through
/// each stage of a tick.
#[derive(Debug, Clone)]
pub struct SolverState {
    pub particles: ParticleState,
    pub constraints: ConstraintTable,
}

impl SolverState {
    /// Build the grid lattice described by `config` and apply the initial kick.
    pub fn new(config: &SolverConfig) -> RibbonResult<(Self, RibbonTopology)> {
        config.validate()?;
        let topology = RibbonTopology::grid(config.grid_width, config.grid_height, config.spacing)?;
        let mut state = Self::from_topology(&topology, config.stiffness, config.damping);

        let kicked = ParticleId(config.perturbed_particle as u32);
        state
            .particles
            .set_velocity(kicked, Vec3::Y * config.initial_velocity);

        Ok((state, topology))
    }

    /// Particles at rest and every constraint active.
    pub fn from_topology(topology: &RibbonTopology, stiffness: f32, damping: f32) -> Self {
        Self {
            particles: ParticleState::from_topology(topology),
            constraints: ConstraintTable::from_topology(topology, stiffness, damping),
        }
    }
}
