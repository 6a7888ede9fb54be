//! Constraint table: SoA buffers for every spring of the lattice.
//!
//! Endpoints, rest lengths and coefficients never change after setup.
//! The active flag only ever goes from `true` to `false`.

use ribbon_types::{ConstraintId, ParticleId};

use crate::state::ParticleState;
use crate::topology::RibbonTopology;

/// SoA constraint buffers, indexed by [`ConstraintId`].
#[derive(Debug, Clone)]
pub struct ConstraintTable {
    /// `[start, end]` particle pair per constraint.
    pub ends: Vec<[ParticleId; 2]>,
    /// Rest length per constraint.
    pub rest_length: Vec<f32>,
    /// Spring stiffness per constraint.
    pub stiffness: Vec<f32>,
    /// Damping coefficient per constraint.
    pub damping: Vec<f32>,
    active: Vec<bool>,
}

impl ConstraintTable {
    /// Create one active constraint per topology edge with uniform coefficients.
    pub fn from_topology(topology: &RibbonTopology, stiffness: f32, damping: f32) -> Self {
        let n = topology.constraint_count();
        Self {
            ends: topology.edges.iter().map(|e| [e.start, e.end]).collect(),
            rest_length: topology.edges.iter().map(|e| e.rest_length).collect(),
            stiffness: vec![stiffness; n],
            damping: vec![damping; n],
            active: vec![true; n],
        }
    }

    /// Number of constraints, active or broken.
    #[inline]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// True for a table with no constraints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Whether `c` still carries force.
    #[inline]
    pub fn is_active(&self, c: ConstraintId) -> bool {
        self.active[c.index()]
    }

    /// Break constraint `c`. Returns true if it was active until now.
    ///
    /// There is no way back: a broken constraint stays broken.
    #[inline]
    pub fn deactivate(&mut self, c: ConstraintId) -> bool {
        std::mem::replace(&mut self.active[c.index()], false)
    }

    /// Active flags, indexed by constraint id.
    #[inline]
    pub fn active_flags(&self) -> &[bool] {
        &self.active
    }

    /// Number of constraints that are still active.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Number of constraints broken so far.
    pub fn broken_count(&self) -> usize {
        self.len() - self.active_count()
    }

    /// Iterate the ids of constraints that are still active.
    pub fn active_ids(&self) -> impl Iterator<Item = ConstraintId> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, &a)| a)
            .map(|(c, _)| ConstraintId(c as u32))
    }

    /// Current distance between the endpoints of `c`.
    #[inline]
    pub fn current_length(&self, c: ConstraintId, particles: &ParticleState) -> f32 {
        let [start, end] = self.ends[c.index()];
        (particles.position(end) - particles.position(start)).length()
    }

    /// Relative elongation `(length − rest) / rest`. Zero for zero-length springs.
    pub fn strain(&self, c: ConstraintId, particles: &ParticleState) -> f32 {
        let rest = self.rest_length[c.index()];
        if rest <= 0.0 {
            return 0.0;
        }
        (self.current_length(c, particles) - rest) / rest
    }
}
