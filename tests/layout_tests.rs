// GPU-facing data: plane grids, uniform layout, OBJ meshes and viewport sizing.

use glam::{Mat4, Vec3};
use std::mem::size_of;
use verse_stage::constants::{PLANE_SEGMENTS, PLANE_SIZE};
use verse_stage::core::camera::Camera;
use verse_stage::core::geometry::plane_grid;
use verse_stage::core::model::ModelMesh;
use verse_stage::core::theme::{Palette, RAVE};
use verse_stage::core::uniforms::{FrameUniforms, ThemeUniforms, UniformBundle};
use verse_stage::core::viewport::{Surface, Viewport};
use verse_stage::core::ModelError;

#[test]
fn full_plane_grid_counts() {
    let grid = plane_grid(PLANE_SIZE, PLANE_SEGMENTS);
    assert_eq!(grid.positions.len(), 65 * 65);
    assert_eq!(grid.line_indices.len(), 2 * (2 * 65 * 64 + 64 * 64));
    assert!(grid.line_indices.iter().all(|&i| (i as usize) < grid.positions.len()));
    assert_eq!(grid.positions[0], [-75.0, 75.0]);
    assert_eq!(grid.positions[65 * 65 - 1], [75.0, -75.0]);
}

#[test]
fn filled_grid_has_two_triangles_per_quad() {
    let grid = plane_grid(PLANE_SIZE, PLANE_SEGMENTS);
    assert_eq!(grid.triangle_indices.len(), 6 * 64 * 64);
    assert!(grid.triangle_indices.iter().all(|&i| (i as usize) < grid.positions.len()));

    // split along the same diagonal the wireframe draws
    let quad = plane_grid(2.0, 1);
    assert_eq!(quad.triangle_indices, vec![0, 2, 1, 2, 3, 1]);
    assert_eq!(&quad.line_indices[8..], &[2, 1]);
}

#[test]
fn single_quad_grid_has_five_edges() {
    let grid = plane_grid(2.0, 1);
    assert_eq!(grid.positions, vec![[-1.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]);
    assert_eq!(grid.line_indices.len(), 10);
    // zero segments is treated as one
    assert_eq!(plane_grid(2.0, 0).line_indices.len(), 10);
}

#[test]
fn frame_uniforms_match_wgsl_layout() {
    assert_eq!(size_of::<FrameUniforms>(), 368);
    assert_eq!(size_of::<FrameUniforms>() % 16, 0);
    assert_eq!(size_of::<ThemeUniforms>(), 16);
}

#[test]
fn pack_places_spectrum_in_vec4_lanes() {
    let mut bundle = UniformBundle::default();
    bundle.push_spectrum(&[0, 0, 0, 0, 0, 7]);
    bundle.time = 0.25;
    let packed = bundle.pack(Mat4::IDENTITY, Vec3::X, Vec3::Y);
    assert_eq!(packed.spectrum[1][1], 7.0);
    assert_eq!(packed.spectrum[15][3], 0.0);
    assert_eq!(packed.time, 0.25);
    assert_eq!(packed.amplitude, 3.0);
    assert_eq!(packed.camera_right, [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(packed.view_proj, Mat4::IDENTITY.to_cols_array_2d());

    bundle.clear_spectrum();
    assert!(bundle.spectrum.iter().all(|v| *v == 0.0));
}

#[test]
fn theme_uniforms_carry_palette_id() {
    let u = ThemeUniforms::from(&RAVE);
    assert_eq!(u.palette, Palette::Rave as u32);
    assert_eq!(u.threshold, 2.9);
    assert_eq!(u.divisor, 30.0);
}

#[test]
fn obj_quad_is_triangulated_with_rebuilt_normals() {
    let obj = b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
    let mesh = ModelMesh::from_obj_bytes(obj).unwrap();
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    assert_eq!(mesh.normals.len(), 4);
    for n in &mesh.normals {
        assert!((n[2] - 1.0).abs() < 1e-5, "{:?}", n);
    }
}

#[test]
fn obj_without_faces_is_rejected() {
    assert!(matches!(
        ModelMesh::from_obj_bytes(b""),
        Err(ModelError::NoGeometry)
    ));
    assert!(matches!(
        ModelMesh::from_obj_bytes(b"v 0 0 0\nv 1 0 0\n"),
        Err(ModelError::NoGeometry)
    ));
}

#[test]
fn pixel_ratio_is_capped() {
    let vp = |dpr| Viewport {
        css_width: 800.0,
        css_height: 600.0,
        device_pixel_ratio: dpr,
    };
    assert_eq!(vp(3.0).pixel_ratio(), 2.0);
    assert_eq!(vp(1.5).pixel_ratio(), 1.5);
    assert_eq!(vp(0.0).pixel_ratio(), 1.0);
    assert_eq!(vp(f64::NAN).pixel_ratio(), 1.0);
    assert_eq!(vp(3.0).backing_size(), (1600, 1200));
    assert_eq!(vp(1.0).backing_size(), (800, 600));
}

#[test]
fn repeated_resize_is_a_no_op() {
    let mut surface = Surface::default();
    let mut a = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let mut b = Camera::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let vp = Viewport {
        css_width: 800.0,
        css_height: 600.0,
        device_pixel_ratio: 2.0,
    };
    assert!(surface.resize(vp, &mut [&mut a, &mut b]));
    assert!((a.aspect - 4.0 / 3.0).abs() < 1e-6);
    assert_eq!(b.aspect, a.aspect);
    let view_proj = a.view_proj();

    assert!(!surface.resize(vp, &mut [&mut a, &mut b]));
    assert_eq!(a.view_proj(), view_proj);
    assert_eq!(surface.viewport(), Some(vp));

    let wider = Viewport {
        css_width: 1200.0,
        ..vp
    };
    assert!(surface.resize(wider, &mut [&mut a, &mut b]));
    assert_eq!(a.aspect, 2.0);
}
