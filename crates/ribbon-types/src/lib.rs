//! # ribbon-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the ribbon mass-spring simulation.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other ribbon crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{RibbonError, RibbonResult};
pub use ids::{ConstraintId, ParticleId};
