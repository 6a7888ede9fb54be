//! The displayable ribbon surface.
//!
//! Channels are stored separately (`pos_x`, `pos_y`, ...), one entry per
//! vertex, so the solver's particle buffers can be copied in with three
//! `copy_from_slice` calls. Vertex `i` of the mesh is particle `i`.

use ribbon_math::Vec3;
use ribbon_types::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};

/// Triangle surface with per-vertex positions, normals and UVs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    /// Recomputed after every position update.
    pub normal_x: Vec<f32>,
    pub normal_y: Vec<f32>,
    pub normal_z: Vec<f32>,

    pub uv_u: Vec<f32>,
    pub uv_v: Vec<f32>,

    /// Flat triangle list, three vertex indices per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// An empty mesh with room for the given number of vertices and triangles.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        let channel = || Vec::with_capacity(vertices);
        Self {
            pos_x: channel(),
            pos_y: channel(),
            pos_z: channel(),
            normal_x: channel(),
            normal_y: channel(),
            normal_z: channel(),
            uv_u: channel(),
            uv_v: channel(),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.normal_x[i], self.normal_y[i], self.normal_z[i])
    }

    /// Vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Overwrite every vertex position.
    ///
    /// Fails without touching the mesh unless each channel has exactly one
    /// entry per vertex.
    pub fn update_positions(&mut self, xs: &[f32], ys: &[f32], zs: &[f32]) -> RibbonResult<()> {
        let n = self.vertex_count();
        if xs.len() != n || ys.len() != n || zs.len() != n {
            return Err(RibbonError::InvalidMesh(format!(
                "got {} positions for a mesh of {n} vertices",
                xs.len()
            )));
        }
        self.pos_x.copy_from_slice(xs);
        self.pos_y.copy_from_slice(ys);
        self.pos_z.copy_from_slice(zs);
        Ok(())
    }

    /// Lowest and highest vertex Y, or `None` for an empty mesh.
    pub fn y_range(&self) -> Option<(f32, f32)> {
        if self.pos_y.is_empty() {
            return None;
        }
        Some(
            self.pos_y
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &y| (lo.min(y), hi.max(y))),
        )
    }

    /// Check channel lengths and triangle indices.
    pub fn validate(&self) -> RibbonResult<()> {
        let n = self.vertex_count();
        let channels = [
            ("pos_y", self.pos_y.len()),
            ("pos_z", self.pos_z.len()),
            ("normal_x", self.normal_x.len()),
            ("normal_y", self.normal_y.len()),
            ("normal_z", self.normal_z.len()),
            ("uv_u", self.uv_u.len()),
            ("uv_v", self.uv_v.len()),
        ];
        if let Some((name, len)) = channels.iter().find(|(_, len)| *len != n) {
            return Err(RibbonError::InvalidMesh(format!(
                "{name} has {len} entries, expected {n}"
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(RibbonError::InvalidMesh(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if [a, b, c].iter().any(|&v| v as usize >= n) {
                return Err(RibbonError::InvalidMesh(format!(
                    "triangle {t} references a vertex past {n}"
                )));
            }
            if a == b || b == c || a == c {
                return Err(RibbonError::InvalidMesh(format!(
                    "triangle {t} is degenerate: [{a}, {b}, {c}]"
                )));
            }
        }

        Ok(())
    }
}
