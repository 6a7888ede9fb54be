//! # ribbon-solver
//!
//! Mass-spring core of the ribbon simulation: lattice topology, particle
//! and constraint state, force accumulation, explicit integration and
//! constraint breaking.
//!
//! ## Key Types
//!
//! - [`RibbonTopology`]: Grid lattice and per-particle constraint adjacency
//! - [`SolverState`]: Owned aggregate of [`ParticleState`] and [`ConstraintTable`]
//! - [`Integrator`]: Time integration trait, implemented by [`ExplicitEuler`]
//! - [`ConstraintEvaluator`]: Breaks over-extended constraints
//! - [`SolverConfig`]: Construction-time solver parameters

pub mod config;
pub mod constraints;
pub mod evaluator;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod topology;

pub use config::SolverConfig;
pub use constraints::ConstraintTable;
pub use evaluator::ConstraintEvaluator;
pub use integrator::{ExplicitEuler, Integrator, StepResult};
pub use state::{ParticleState, SolverState};
pub use topology::{Adjacency, Edge, EdgeKind, RibbonTopology};
