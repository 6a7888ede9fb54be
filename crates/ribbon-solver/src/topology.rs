//! Lattice topology: particle rest positions, constraint edges and the
//! per-particle constraint adjacency table.
//!
//! Built once at setup and never resized. The edge order fixes constraint
//! ids for the lifetime of the simulation:
//!
//! ```text
//! per interior cell (col, row), row-major:
//!   +0  vertical    (col, row)   → (col, row+1)
//!   +1  horizontal  (col, row)   → (col+1, row)
//!   +2  shear       (col, row)   → (col+1, row+1)
//!   +3  shear       (col, row+1) → (col+1, row)
//! then the last row's horizontal edges, then the last column's vertical edges.
//! ```

use ribbon_math::Vec3;
use ribbon_types::constants::MAX_CONSTRAINTS_PER_PARTICLE;
use ribbon_types::{ConstraintId, ParticleId, RibbonError, RibbonResult};

/// Fixed-capacity list of the constraints touching one particle.
/// Unused slots are `None`.
pub type Adjacency = [Option<ConstraintId>; MAX_CONSTRAINTS_PER_PARTICLE];

/// Which family a constraint edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Axis-aligned grid edge, rest length = spacing.
    Structural,
    /// Cell diagonal, rest length = spacing·√2.
    Shear,
}

/// One spring edge of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Endpoint the force convention is defined from.
    pub start: ParticleId,
    /// Endpoint that receives the opposite reaction.
    pub end: ParticleId,
    /// Length at which the spring exerts no force.
    pub rest_length: f32,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(start: u32, end: u32, rest_length: f32, kind: EdgeKind) -> Self {
        Self {
            start: ParticleId(start),
            end: ParticleId(end),
            rest_length,
            kind,
        }
    }

    /// Returns true if `p` is one of the two endpoints.
    #[inline]
    pub fn touches(&self, p: ParticleId) -> bool {
        self.start == p || self.end == p
    }
}

/// Precomputed lattice topology.
#[derive(Debug, Clone)]
pub struct RibbonTopology {
    /// Particles per row (0 for topologies built from explicit edges).
    pub width: usize,
    /// Particles per column (0 for topologies built from explicit edges).
    pub height: usize,
    /// Initial particle positions, indexed by particle id.
    pub rest_positions: Vec<Vec3>,
    /// Constraint edges, indexed by constraint id.
    pub edges: Vec<Edge>,
    /// For each particle, the constraints that touch it.
    pub adjacency: Vec<Adjacency>,
}

impl RibbonTopology {
    /// Build the quad-grid lattice of `width × height` particles.
    ///
    /// Particle `row * width + col` rests at `(col·spacing, row·spacing, 0)`.
    /// Fails if either dimension is below 2.
    pub fn grid(width: usize, height: usize, spacing: f32) -> RibbonResult<Self> {
        if width < 2 || height < 2 {
            return Err(RibbonError::InvalidGrid { width, height });
        }

        let mut rest_positions = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                rest_positions.push(Vec3::new(col as f32 * spacing, row as f32 * spacing, 0.0));
            }
        }

        let edges = grid_edges(width, height, spacing);
        debug_assert_eq!(edges.len(), Self::grid_constraint_count(width, height));

        let adjacency = build_adjacency(rest_positions.len(), &edges);

        tracing::debug!(
            width,
            height,
            particles = rest_positions.len(),
            constraints = edges.len(),
            "built ribbon lattice"
        );

        Ok(Self {
            width,
            height,
            rest_positions,
            edges,
            adjacency,
        })
    }

    /// Build a topology from explicit particles and edges.
    ///
    /// Uses the same adjacency scan as [`RibbonTopology::grid`]. Fails if an
    /// edge references a particle that does not exist or has a negative
    /// rest length.
    pub fn from_edges(rest_positions: Vec<Vec3>, edges: Vec<Edge>) -> RibbonResult<Self> {
        let n = rest_positions.len();
        for (c, edge) in edges.iter().enumerate() {
            if edge.start.index() >= n || edge.end.index() >= n {
                return Err(RibbonError::InvalidTopology(format!(
                    "Constraint {} joins particles {} and {}, but only {} exist",
                    c, edge.start.0, edge.end.0, n
                )));
            }
            if edge.start == edge.end {
                return Err(RibbonError::InvalidTopology(format!(
                    "Constraint {} joins particle {} to itself",
                    c, edge.start.0
                )));
            }
            if !(edge.rest_length >= 0.0) {
                return Err(RibbonError::InvalidTopology(format!(
                    "Constraint {} has rest length {}",
                    c, edge.rest_length
                )));
            }
        }

        let adjacency = build_adjacency(n, &edges);

        Ok(Self {
            width: 0,
            height: 0,
            rest_positions,
            edges,
            adjacency,
        })
    }

    /// Total constraints of a `width × height` grid:
    /// `4·(W−1)(H−1) + (W−1) + (H−1)`.
    pub fn grid_constraint_count(width: usize, height: usize) -> usize {
        let (w, h) = (width.saturating_sub(1), height.saturating_sub(1));
        4 * w * h + w + h
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.rest_positions.len()
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.edges.len()
    }

    /// Particle id of grid cell `(col, row)`.
    #[inline]
    pub fn particle_at(&self, col: usize, row: usize) -> ParticleId {
        ParticleId((row * self.width + col) as u32)
    }

    /// Iterate the occupied adjacency slots of particle `p`.
    pub fn constraints_of(&self, p: ParticleId) -> impl Iterator<Item = ConstraintId> + '_ {
        self.adjacency[p.index()].iter().flatten().copied()
    }
}

fn grid_edges(width: usize, height: usize, spacing: f32) -> Vec<Edge> {
    let diagonal = spacing * std::f32::consts::SQRT_2;
    let w = width as u32;
    let mut edges = Vec::with_capacity(RibbonTopology::grid_constraint_count(width, height));

    for row in 0..height as u32 - 1 {
        for col in 0..w - 1 {
            let here = w * row + col;
            let up = here + w;
            edges.push(Edge::new(here, up, spacing, EdgeKind::Structural));
            edges.push(Edge::new(here, here + 1, spacing, EdgeKind::Structural));
            edges.push(Edge::new(here, up + 1, diagonal, EdgeKind::Shear));
            edges.push(Edge::new(up, here + 1, diagonal, EdgeKind::Shear));
        }
    }

    // Last row: horizontal edges only.
    let last_row = height as u32 - 1;
    for col in 0..w - 1 {
        let here = w * last_row + col;
        edges.push(Edge::new(here, here + 1, spacing, EdgeKind::Structural));
    }

    // Last column: vertical edges only.
    let last_col = w - 1;
    for row in 0..height as u32 - 1 {
        let here = w * row + last_col;
        edges.push(Edge::new(here, here + w, spacing, EdgeKind::Structural));
    }

    edges
}

/// For every particle, scan all edges and record those touching it,
/// up to the fixed slot capacity.
fn build_adjacency(particle_count: usize, edges: &[Edge]) -> Vec<Adjacency> {
    let mut adjacency = vec![[None; MAX_CONSTRAINTS_PER_PARTICLE]; particle_count];

    for (p, slots) in adjacency.iter_mut().enumerate() {
        let particle = ParticleId(p as u32);
        let mut filled = 0;
        for (c, edge) in edges.iter().enumerate() {
            if !edge.touches(particle) {
                continue;
            }
            if filled == MAX_CONSTRAINTS_PER_PARTICLE {
                tracing::warn!(
                    particle = p,
                    constraint = c,
                    "adjacency full, constraint ignored for this particle"
                );
                continue;
            }
            slots[filled] = Some(ConstraintId(c as u32));
            filled += 1;
        }
    }

    adjacency
}
