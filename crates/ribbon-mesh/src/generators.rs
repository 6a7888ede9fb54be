//! Procedural surface matching the particle lattice.

use crate::mesh::TriangleMesh;

/// Generates the ribbon surface: a `width × height` vertex grid in the XY plane.
///
/// Vertex `row * width + col` sits at `(col * spacing, row * spacing, 0)`,
/// the same layout the solver uses for its particles. Each cell contributes
/// two triangles sharing the `(col, row) → (col + 1, row + 1)` diagonal.
///
/// # Example
/// ```
/// use ribbon_mesh::generators::ribbon_grid;
/// let mesh = ribbon_grid(3, 3, 0.5);
/// assert_eq!(mesh.vertex_count(), 9);
/// assert_eq!(mesh.triangle_count(), 8);
/// ```
pub fn ribbon_grid(width: usize, height: usize, spacing: f32) -> TriangleMesh {
    let cells = width.saturating_sub(1) * height.saturating_sub(1);
    let mut mesh = TriangleMesh::with_capacity(width * height, cells * 2);

    for j in 0..height {
        for i in 0..width {
            mesh.pos_x.push(i as f32 * spacing);
            mesh.pos_y.push(j as f32 * spacing);
            mesh.pos_z.push(0.0);

            mesh.normal_x.push(0.0);
            mesh.normal_y.push(0.0);
            mesh.normal_z.push(-1.0);

            mesh.uv_u.push(i as f32 / width as f32);
            mesh.uv_v.push(j as f32 / height as f32);
        }
    }

    for j in 0..height.saturating_sub(1) {
        for i in 0..width.saturating_sub(1) {
            let here = (width * j + i) as u32;
            let right = here + 1;
            let up = here + width as u32;
            let up_right = up + 1;

            mesh.indices.extend_from_slice(&[here, up, up_right]);
            mesh.indices.extend_from_slice(&[here, up_right, right]);
        }
    }

    mesh
}
