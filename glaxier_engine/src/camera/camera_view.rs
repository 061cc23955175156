/// CameraView: snapshot of a camera for one render pass.
///
/// A passive data container handed to the surface: it computes nothing
/// after construction. Built fresh for every pass so it always carries the
/// intrinsics in effect at render time.

use glam::Mat4;
use crate::error::Result;
use crate::render::Viewport;
use crate::scene::SceneGraph;
use super::camera::{CameraDescriptor, CameraKey, ProjectionKind};
use super::frustum::Frustum;

#[derive(Debug, Clone)]
pub struct CameraView {
    camera: CameraKey,
    name: String,
    kind: ProjectionKind,
    aspect: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    viewport: Viewport,
}

impl CameraView {
    /// Snapshot `camera` as seen through `viewport`
    pub fn capture(
        key: CameraKey,
        camera: &CameraDescriptor,
        graph: &SceneGraph,
        viewport: Viewport,
    ) -> Result<Self> {
        let view_matrix = camera.view_matrix(graph)?;
        let projection_matrix = camera.projection_matrix();
        Ok(Self {
            camera: key,
            name: camera.name().to_string(),
            kind: camera.kind(),
            aspect: camera.effective_aspect(),
            view_matrix,
            projection_matrix,
            frustum: Frustum::from_view_projection(&(projection_matrix * view_matrix)),
            viewport,
        })
    }

    // ===== GETTERS =====

    pub fn camera(&self) -> CameraKey {
        self.camera
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// Aspect ratio of the projection at capture time
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
