//! # ribbon-math
//!
//! Vector primitives for the ribbon solver.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`)
//! - Guarded vector helpers that never produce NaN for degenerate input

pub mod vector;

// Re-export glam types as the canonical math types for the solver.
pub use glam::Vec3;

pub use vector::{normalize_or, project, safe_length};
