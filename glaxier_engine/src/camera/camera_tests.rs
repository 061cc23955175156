use glam::{Mat4, Vec3};
use crate::camera::CameraView;
use crate::render::Viewport;
use crate::scene::{NodeKind, SceneGraph, Transform};
use super::*;

fn perspective() -> Projection {
    Projection::Perspective { fov_degrees: 50.0, aspect: 0.5, near: 150.0, far: 1000.0 }
}

fn orthographic() -> Projection {
    Projection::Orthographic { left: -75.0, right: 75.0, top: 300.0, bottom: -300.0, near: 150.0, far: 1000.0 }
}

fn graph_with_node() -> (SceneGraph, NodeKey) {
    let mut graph = SceneGraph::new();
    let node = graph.add_node("camera", NodeKind::Group, Transform::from_translation(Vec3::new(0.0, 0.0, 2500.0)));
    (graph, node)
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_projection_kind_and_planes() {
    assert_eq!(perspective().kind(), ProjectionKind::Perspective);
    assert_eq!(orthographic().kind(), ProjectionKind::Orthographic);
    assert_eq!(perspective().near(), 150.0);
    assert_eq!(orthographic().far(), 1000.0);
}

#[test]
fn test_perspective_matrix_matches_glam() {
    let expected = Mat4::perspective_rh_gl(50f32.to_radians(), 0.5, 150.0, 1000.0);
    assert_eq!(perspective().matrix(), expected);
}

#[test]
fn test_orthographic_matrix_matches_glam() {
    let expected = Mat4::orthographic_rh_gl(-75.0, 75.0, -300.0, 300.0, 150.0, 1000.0);
    assert_eq!(orthographic().matrix(), expected);
}

// ============================================================================
// Descriptor setters
// ============================================================================

#[test]
fn test_set_far_on_both_kinds() {
    let (_, node) = graph_with_node();
    let mut persp = CameraDescriptor::new("perspective", perspective(), node);
    let mut ortho = CameraDescriptor::new("orthographic", orthographic(), node);

    persp.set_far(700.0);
    ortho.set_far(800.0);

    assert_eq!(persp.far(), 700.0);
    assert_eq!(ortho.far(), 800.0);
}

#[test]
fn test_perspective_only_setters_ignore_orthographic() {
    let (_, node) = graph_with_node();
    let mut ortho = CameraDescriptor::new("orthographic", orthographic(), node);

    ortho.set_aspect(3.0);
    ortho.set_fov_degrees(10.0);

    assert_eq!(*ortho.projection(), orthographic());
    assert_eq!(ortho.aspect(), None);
    assert_eq!(ortho.fov_degrees(), None);
}

#[test]
fn test_set_extents_ignores_perspective() {
    let (_, node) = graph_with_node();
    let mut persp = CameraDescriptor::new("perspective", perspective(), node);

    persp.set_extents(-1.0, 1.0, 1.0, -1.0);

    assert_eq!(*persp.projection(), perspective());
}

#[test]
fn test_effective_aspect() {
    let (_, node) = graph_with_node();
    let persp = CameraDescriptor::new("perspective", perspective(), node);
    let ortho = CameraDescriptor::new("orthographic", orthographic(), node);

    assert_eq!(persp.effective_aspect(), 0.5);
    assert!((ortho.effective_aspect() - 0.25).abs() < 1e-6);
}

// ============================================================================
// Matrices and views
// ============================================================================

#[test]
fn test_view_matrix_is_inverse_world() {
    let (graph, node) = graph_with_node();
    let camera = CameraDescriptor::new("observer", perspective(), node);

    let view = camera.view_matrix(&graph).unwrap();
    let origin_in_view = view.transform_point3(Vec3::ZERO);

    assert!((origin_in_view - Vec3::new(0.0, 0.0, -2500.0)).length() < 1e-3);
}

#[test]
fn test_view_matrix_fails_for_removed_node() {
    let (mut graph, node) = graph_with_node();
    let camera = CameraDescriptor::new("observer", perspective(), node);
    graph.remove_node(node);

    assert!(camera.view_matrix(&graph).is_err());
}

#[test]
fn test_camera_view_snapshot() {
    let (graph, node) = graph_with_node();
    let camera = CameraDescriptor::new("observer", perspective(), node);
    let viewport = Viewport::new(0.0, 0.0, 400.0, 800.0);

    let view = CameraView::capture(CameraKey::default(), &camera, &graph, viewport).unwrap();

    assert_eq!(view.name(), "observer");
    assert_eq!(view.kind(), ProjectionKind::Perspective);
    assert_eq!(view.aspect(), 0.5);
    assert_eq!(*view.viewport(), viewport);
    assert_eq!(view.view_projection_matrix(), *view.projection_matrix() * *view.view_matrix());
    assert!(view.frustum().contains_point(Vec3::new(0.0, 0.0, 2000.0)));
}
