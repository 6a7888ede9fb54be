//! Vertex normal computation from triangle mesh data.
//!
//! Computes area-weighted vertex normals by accumulating
//! face normals from each adjacent triangle.

use ribbon_math::Vec3;

use crate::mesh::TriangleMesh;

/// Recompute vertex normals from triangle geometry (area-weighted).
///
/// Each triangle's cross product (magnitude = twice its area) is accumulated
/// at its three corners and the sums are normalised. Vertices touched only
/// by collapsed triangles keep a zero normal.
pub fn compute_vertex_normals(mesh: &mut TriangleMesh) {
    let n = mesh.vertex_count();
    let mut accum = vec![Vec3::ZERO; n];

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t).map(|v| v as usize);
        let pa = mesh.position(a);
        let face = (mesh.position(b) - pa).cross(mesh.position(c) - pa);

        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    for (i, normal) in accum.into_iter().enumerate() {
        let unit = if normal.length_squared() > 1e-20 {
            normal.normalize()
        } else {
            Vec3::ZERO
        };
        mesh.normal_x[i] = unit.x;
        mesh.normal_y[i] = unit.y;
        mesh.normal_z[i] = unit.z;
    }
}
