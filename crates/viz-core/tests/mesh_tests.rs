// Host-side tests for icosphere construction and procedural deformation.

use glam::Vec3;
use viz_core::*;

fn small_sphere() -> SphereMesh {
    SphereMesh::icosphere(2)
}

fn drive(bass: f32, treble: f32) -> DriveSignal {
    DriveSignal {
        bass,
        treble,
        intensity: 1.0,
    }
}

#[test]
fn home_directions_are_unit_length() {
    let mesh = small_sphere();
    for i in 0..mesh.vertex_count() {
        let len = mesh.home(i).length();
        assert!((len - 1.0).abs() < 1e-5, "vertex {i} home length {len}");
    }
}

#[test]
fn icosphere_vertex_and_edge_counts() {
    // V = 10 * 4^n + 2, F = 20 * 4^n, unique edges E = 3F/2
    for n in 0..3_u32 {
        let mesh = SphereMesh::icosphere(n);
        let faces = 20 * 4_usize.pow(n);
        assert_eq!(mesh.vertex_count(), 10 * 4_usize.pow(n) + 2);
        assert_eq!(mesh.triangle_count(), faces);
        assert_eq!(mesh.edge_indices().len(), 3 * faces);
        let max = *mesh.edge_indices().iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }
}

#[test]
fn deformation_depends_only_on_inputs_never_on_previous_frame() {
    let field = NoiseField::new(7);
    let mut mesh = small_sphere();
    let d = drive(2.0, 1.5);

    mesh.deform(&field, &d, 1000.0);
    let first: Vec<f32> = (0..mesh.vertex_count()).map(|i| mesh.radius(i)).collect();

    // Wander through other states, then replay the original inputs
    mesh.deform(&field, &drive(7.0, 3.9), 250_000.0);
    mesh.deform(&field, &drive(0.0, 0.0), 99.0);
    mesh.deform(&field, &d, 1000.0);

    for (i, r) in first.iter().enumerate() {
        assert_eq!(*r, mesh.radius(i), "radius drifted at vertex {i}");
    }
}

#[test]
fn zero_treble_collapses_to_base_radius_plus_bass() {
    let field = NoiseField::new(0);
    let mut mesh = small_sphere();
    mesh.deform(&field, &drive(3.0, 0.0), 5_000.0);
    for i in 0..mesh.vertex_count() {
        assert!((mesh.radius(i) - (BASE_RADIUS + 3.0)).abs() < 1e-5);
    }
}

#[test]
fn deformed_radii_stay_within_noise_envelope() {
    let field = NoiseField::new(42);
    let mut mesh = small_sphere();
    let d = drive(4.0, 2.0);
    mesh.deform(&field, &d, 123_456.0);
    // Small slack in case the noise implementation grazes past the nominal
    // [-1, 1] range
    let bound = NOISE_AMPLITUDE * d.treble * 2.0 * 1.05;
    for i in 0..mesh.vertex_count() {
        let r = mesh.radius(i);
        assert!(r >= BASE_RADIUS + d.bass - bound);
        assert!(r <= BASE_RADIUS + d.bass + bound);
    }
}

#[test]
fn positions_follow_home_direction_times_radius() {
    let field = NoiseField::new(3);
    let mut mesh = small_sphere();
    mesh.deform(&field, &drive(1.0, 2.5), 77_000.0);
    for (i, v) in mesh.vertices().iter().enumerate() {
        let expect = mesh.home(i) * mesh.radius(i);
        let got = Vec3::from(v.position);
        assert!((expect - got).length() < 1e-4);
    }
}

#[test]
fn undeformed_normals_point_along_home_directions() {
    let mut mesh = small_sphere();
    mesh.recompute_normals();
    for (i, v) in mesh.vertices().iter().enumerate() {
        let n = Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(
            n.dot(mesh.home(i)) > 0.9,
            "normal diverges from home at vertex {i}"
        );
    }
}

#[test]
fn normals_are_refreshed_after_deformation() {
    let field = NoiseField::new(11);
    let mut mesh = small_sphere();
    mesh.recompute_normals();
    let before: Vec<[f32; 3]> = mesh.vertices().iter().map(|v| v.normal).collect();

    mesh.deform(&field, &drive(0.0, 3.5), 400_000.0);
    mesh.recompute_normals();
    let changed = mesh
        .vertices()
        .iter()
        .zip(&before)
        .any(|(v, b)| Vec3::from(v.normal).distance(Vec3::from(*b)) > 1e-4);
    assert!(changed, "normals did not respond to deformation");
    for v in mesh.vertices() {
        assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-3);
    }
}

#[test]
fn indexed_radius_write_updates_position() {
    let mut mesh = small_sphere();
    mesh.set_radius(0, 31.5);
    assert_eq!(mesh.radius(0), 31.5);
    let p = Vec3::from(mesh.vertices()[0].position);
    assert!((p.length() - 31.5).abs() < 1e-4);
}

#[test]
fn noise_field_range_and_determinism() {
    let a = NoiseField::new(5);
    let b = NoiseField::new(5);
    for i in 0..200 {
        let p = [i as f64 * 0.13, i as f64 * 0.07, i as f64 * 0.19];
        let va = a.sample(p);
        assert!((-1.05..=1.05).contains(&va));
        assert_eq!(va, b.sample(p));
    }
}
