//! # ribbon-mesh
//!
//! Displayable triangle surface fed by the solver once per tick.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: SoA positions, normals, UVs and a triangle index buffer.
//! - [`generators::ribbon_grid`]: the row-major grid surface matching the particle lattice.
//! - [`normals::compute_vertex_normals`]: area-weighted normal recomputation.

pub mod generators;
pub mod mesh;
pub mod normals;

pub use mesh::TriangleMesh;
