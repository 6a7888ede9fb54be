//! Integration tests for ribbon-mesh.

use ribbon_math::Vec3;
use ribbon_mesh::generators::ribbon_grid;
use ribbon_mesh::normals::compute_vertex_normals;
use ribbon_mesh::TriangleMesh;

fn one_triangle() -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity(3, 1);
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
        mesh.pos_x.push(x);
        mesh.pos_y.push(y);
        mesh.pos_z.push(0.0);
        mesh.normal_x.push(0.0);
        mesh.normal_y.push(0.0);
        mesh.normal_z.push(0.0);
        mesh.uv_u.push(x);
        mesh.uv_v.push(y);
    }
    mesh.indices.extend_from_slice(&[0, 1, 2]);
    mesh
}

// ─── TriangleMesh Tests ───────────────────────────────────────

#[test]
fn counts_and_bounds() {
    let mesh = one_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
    assert_eq!(mesh.y_range(), Some((0.0, 1.0)));
    assert_eq!(TriangleMesh::with_capacity(4, 2).y_range(), None);
}

#[test]
fn validate_catches_short_channel() {
    let mut mesh = one_triangle();
    mesh.uv_v.pop();
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_dangling_index() {
    let mut mesh = one_triangle();
    mesh.indices[2] = 3;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = one_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn update_positions_rejects_wrong_length() {
    let mut mesh = one_triangle();
    assert!(mesh.update_positions(&[0.0; 2], &[0.0; 2], &[0.0; 2]).is_err());
    mesh.update_positions(&[5.0; 3], &[6.0; 3], &[0.0; 3]).unwrap();
    assert_eq!(mesh.position(2), Vec3::new(5.0, 6.0, 0.0));
}

#[test]
fn mesh_serialization() {
    let mesh = one_triangle();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.indices, vec![0, 1, 2]);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn ribbon_grid_layout_is_row_major() {
    let mesh = ribbon_grid(4, 3, 0.5);
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 2 * 3 * 2);
    // Vertex (col 2, row 1) → index 1 * 4 + 2
    assert_eq!(mesh.position(6), Vec3::new(1.0, 0.5, 0.0));
    assert!(mesh.validate().is_ok());
}

#[test]
fn ribbon_grid_winding() {
    let mesh = ribbon_grid(2, 2, 1.0);
    assert_eq!(mesh.triangle(0), [0, 2, 3]);
    assert_eq!(mesh.triangle(1), [0, 3, 1]);
}

#[test]
fn ribbon_grid_uvs() {
    let mesh = ribbon_grid(4, 2, 1.0);
    assert_eq!(mesh.uv_u[3], 0.75);
    assert_eq!(mesh.uv_v[4], 0.5);
}

// ─── Normal Tests ─────────────────────────────────────────────

#[test]
fn flat_grid_normals_are_unit_z() {
    let mut mesh = ribbon_grid(3, 3, 0.5);
    compute_vertex_normals(&mut mesh);
    for i in 0..mesh.vertex_count() {
        let n = mesh.normal(i);
        assert!((n.length() - 1.0).abs() < 1e-5, "vertex {i}: {n:?}");
        assert!((n.z.abs() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn normals_follow_deformation() {
    let mut mesh = one_triangle();
    // Rotate the triangle into the XZ plane.
    mesh.pos_y = vec![0.0, 0.0, 0.0];
    mesh.pos_z = vec![0.0, 0.0, 1.0];
    compute_vertex_normals(&mut mesh);
    assert!((mesh.normal(0).y.abs() - 1.0).abs() < 1e-5);
}
