use glam::Vec3;
use crate::camera::{CameraDescriptor, CameraKey, Projection};
use crate::scene::{NodeKind, SceneGraph, Transform};
use super::*;

fn setup() -> (SceneGraph, CameraDescriptor, CameraHelper) {
    let mut graph = SceneGraph::new();
    let camera_node = graph.add_node("camera", NodeKind::Group, Transform::IDENTITY);
    let helper_node = graph.add_node("camera helper", NodeKind::Helper(HelperKey::default()), Transform::IDENTITY);
    let camera = CameraDescriptor::new(
        "perspective",
        Projection::Perspective { fov_degrees: 50.0, aspect: 1.0, near: 150.0, far: 1000.0 },
        camera_node,
    );
    let helper = CameraHelper::new(CameraKey::default(), helper_node);
    (graph, camera, helper)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_helper_new_has_no_geometry() {
    let (_, _, helper) = setup();
    assert_eq!(helper.update_count(), 0);
    assert!(helper.corners().iter().all(|c| *c == Vec3::ZERO));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_computes_corners() {
    let (graph, camera, mut helper) = setup();

    helper.update(&camera, &graph).unwrap();

    assert_eq!(helper.update_count(), 1);
    assert!((helper.depth() - 850.0).abs() < 1.0);
}

#[test]
fn test_update_follows_far_plane() {
    let (graph, mut camera, mut helper) = setup();
    helper.update(&camera, &graph).unwrap();
    let before = helper.depth();

    camera.set_far(500.0);
    helper.update(&camera, &graph).unwrap();

    assert!(helper.depth() < before);
    assert!((helper.depth() - 350.0).abs() < 1.0);
    assert_eq!(helper.update_count(), 2);
}

#[test]
fn test_update_follows_camera_node() {
    let (mut graph, camera, mut helper) = setup();
    graph.set_translation(camera.node(), Vec3::new(0.0, 0.0, 100.0)).unwrap();

    helper.update(&camera, &graph).unwrap();

    assert!((helper.corners()[0].z - (100.0 - 150.0)).abs() < 0.1);
}

#[test]
fn test_update_fails_when_camera_node_removed() {
    let (mut graph, camera, mut helper) = setup();
    graph.remove_node(camera.node());

    assert!(helper.update(&camera, &graph).is_err());
    assert_eq!(helper.update_count(), 0);
}
