//! Integration tests for parallelepiped modeling and central projection.
//!
//! The demo solid (support (1,1,1), spans (1,2,3), (3,1,3), (3,2,1)) and
//! the centers (10,5,20) and (1,4,20) are the classic worked example; the
//! expected image points below are computed by hand from the projection
//! formula.

use std::path::Path;

use tempfile::TempDir;

use linlab::projection::scene::{Scene, SceneError};
use linlab::projection::svg::{render, SvgOptions};
use linlab::projection::{
    project_point, Parallelepiped, Point2, ProjectionError, Vec3, CORNER_LABELS,
};

fn demo_solid() -> Parallelepiped {
    Parallelepiped::new(
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(3.0, 1.0, 3.0),
        Vec3::new(3.0, 2.0, 1.0),
    )
    .expect("demo solid is valid")
}

fn assert_point(actual: Point2, expected_x: f64, expected_y: f64) {
    assert!(
        (actual.x - expected_x).abs() < 1e-9 && (actual.y - expected_y).abs() < 1e-9,
        "{} != ({}, {})",
        actual,
        expected_x,
        expected_y
    );
}

// =============================================================================
// Projection math
// =============================================================================

#[test]
fn demo_projection_matches_hand_computation() {
    let solid = demo_solid();
    let projection = solid.project(Vec3::new(10.0, 5.0, 20.0)).unwrap();

    // s = (1,1,1): x' = (1 - 10/20) / (1 - 1/20) = 10/19
    assert_point(projection.points[0], 10.0 / 19.0, 15.0 / 19.0);
    // g = (8,6,8): x' = (8 - 10*0.4) / 0.6 = 20/3, y' = (6 - 2) / 0.6 = 20/3
    assert_point(projection.points[7], 20.0 / 3.0, 20.0 / 3.0);
}

#[test]
fn moving_the_center_moves_the_image() {
    let solid = demo_solid();
    let wide = solid.project(Vec3::new(10.0, 5.0, 20.0)).unwrap();
    let narrow = solid.project(Vec3::new(1.0, 4.0, 20.0)).unwrap();

    // The x coordinate of the support's image shifts with the center.
    assert_point(narrow.points[0], 19.0 / 19.0, 16.0 / 19.0);
    assert!((wide.points[0].x - narrow.points[0].x).abs() > 1e-6);
}

#[test]
fn projection_agrees_with_ray_interpolation() {
    // The image of p is the point where the ray from the center through p
    // meets z = 0: p + t * (u - p) with t = -z_p / (z_u - z_p).
    let solid = demo_solid();
    let center = Vec3::new(10.0, 5.0, 20.0);
    let projection = solid.project(center).unwrap();

    for (corner, image) in solid.corners().iter().zip(projection.points.iter()) {
        let t = -corner.z / (center.z - corner.z);
        let expected_x = corner.x + t * (center.x - corner.x);
        let expected_y = corner.y + t * (center.y - corner.y);
        assert_point(*image, expected_x, expected_y);
    }
}

#[test]
fn plane_points_project_to_themselves() {
    let image = project_point(Vec3::new(4.0, 2.0, 0.0), Vec3::new(3.0, 3.0, 9.0)).unwrap();
    assert_point(image, 4.0, 2.0);
}

#[test]
fn labels_follow_storage_order() {
    let solid = demo_solid();
    let projection = solid.project(Vec3::new(10.0, 5.0, 20.0)).unwrap();
    let labels: Vec<&str> = projection.labeled().map(|(label, _)| label).collect();
    assert_eq!(labels, CORNER_LABELS);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn solid_outside_first_octant_is_rejected() {
    let err = Parallelepiped::new(
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(3.0, 1.0, 3.0),
        Vec3::new(3.0, 2.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(err, ProjectionError::OutsideFirstOctant { .. }));
}

#[test]
fn center_below_solid_is_rejected() {
    let err = demo_solid().project(Vec3::new(10.0, 5.0, 8.0)).unwrap_err();
    assert_eq!(
        err,
        ProjectionError::CenterTooLow {
            center_z: 8.0,
            max_z: 8.0
        }
    );
}

#[test]
fn center_outside_first_octant_is_rejected() {
    let err = demo_solid().project(Vec3::new(10.0, 0.0, 20.0)).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::CenterOutsideFirstOctant { .. }
    ));
}

// =============================================================================
// Scene files
// =============================================================================

#[test]
fn scene_roundtrips_through_a_file() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("scene.toml");
    std::fs::write(
        &path,
        r#"
        support = [1.0, 1.0, 1.0]
        a = [1.0, 2.0, 3.0]
        b = [3.0, 1.0, 3.0]
        c = [3.0, 2.0, 1.0]

        [[center]]
        name = "wide"
        position = [10.0, 5.0, 20.0]
        "#,
    )
    .expect("write scene");

    let scene = Scene::load(&path).expect("load scene");
    assert_eq!(scene.centers.len(), 1);
    let solid = scene.parallelepiped().unwrap();
    assert_eq!(solid.max_z(), 8.0);
}

#[test]
fn missing_scene_file_reports_the_path() {
    let err = Scene::load(Path::new("/nonexistent/scene.toml")).unwrap_err();
    match err {
        SceneError::ReadError { path, .. } => {
            assert_eq!(path, Path::new("/nonexistent/scene.toml"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// =============================================================================
// SVG rendering
// =============================================================================

#[test]
fn svg_renders_full_figure() {
    let projection = demo_solid().project(Vec3::new(10.0, 5.0, 20.0)).unwrap();
    let svg = render(&projection, &SvgOptions::default());
    assert!(svg.contains("<polygon"));
    assert_eq!(svg.matches("<line").count(), 12);
    // One edge group per spanning direction.
    assert!(svg.contains("stroke=\"#008000\""));
    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(svg.contains("stroke=\"#0000ff\""));
}
