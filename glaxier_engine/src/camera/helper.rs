/// CameraHelper: frustum visualization of a camera.
///
/// The helper's geometry is the eight world-space corners of its camera's
/// volume. It is drawn into the *other* viewport, so its geometry has to be
/// recomputed whenever the camera's intrinsics or placement change.
/// Visibility is stored on the helper's scene-graph node.

use glam::Vec3;
use slotmap::new_key_type;
use crate::error::Result;
use crate::scene::{NodeKey, SceneGraph};
use super::camera::{CameraDescriptor, CameraKey};
use super::frustum::Frustum;

new_key_type! {
    /// Stable handle to a camera helper owned by a rig controller
    pub struct HelperKey;
}

#[derive(Debug, Clone)]
pub struct CameraHelper {
    camera: CameraKey,
    node: NodeKey,
    corners: [Vec3; 8],
    update_count: u64,
}

impl CameraHelper {
    pub fn new(camera: CameraKey, node: NodeKey) -> Self {
        Self {
            camera,
            node,
            corners: [Vec3::ZERO; 8],
            update_count: 0,
        }
    }

    /// Camera this helper visualizes
    pub fn camera(&self) -> CameraKey {
        self.camera
    }

    pub fn node(&self) -> NodeKey {
        self.node
    }

    /// World-space frustum corners: near face then far face
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Number of geometry recomputations so far
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Recompute the frustum geometry from the camera's current state
    pub fn update(&mut self, camera: &CameraDescriptor, graph: &SceneGraph) -> Result<()> {
        let vp = camera.view_projection_matrix(graph)?;
        self.corners = Frustum::corners(&vp);
        self.update_count += 1;
        Ok(())
    }

    /// Distance from the near-face center to the far-face center
    pub fn depth(&self) -> f32 {
        let near = (self.corners[0] + self.corners[1] + self.corners[2] + self.corners[3]) * 0.25;
        let far = (self.corners[4] + self.corners[5] + self.corners[6] + self.corners[7]) * 0.25;
        near.distance(far)
    }
}

#[cfg(test)]
#[path = "helper_tests.rs"]
mod tests;
