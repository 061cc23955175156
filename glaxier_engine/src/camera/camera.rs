/// CameraDescriptor: a named projection attached to a scene-graph node.
///
/// The descriptor owns the intrinsics (field of view or orthographic
/// extents, near/far planes, aspect). Its placement comes from the node it
/// is attached to, so moving or rotating a rig moves every camera under it.

use glam::Mat4;
use slotmap::new_key_type;
use crate::error::Result;
use crate::scene::{NodeKey, SceneGraph};

new_key_type! {
    /// Stable handle to a camera owned by a rig controller
    pub struct CameraKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// Projection intrinsics
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view, in degrees
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Perspective { .. } => ProjectionKind::Perspective,
            Projection::Orthographic { .. } => ProjectionKind::Orthographic,
        }
    }

    pub fn near(&self) -> f32 {
        match *self {
            Projection::Perspective { near, .. } | Projection::Orthographic { near, .. } => near,
        }
    }

    pub fn far(&self) -> f32 {
        match *self {
            Projection::Perspective { far, .. } | Projection::Orthographic { far, .. } => far,
        }
    }

    /// OpenGL-convention projection matrix (right handed, NDC z in [-1, 1])
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective { fov_degrees, aspect, near, far } => {
                Mat4::perspective_rh_gl(fov_degrees.to_radians(), aspect, near, far)
            }
            Projection::Orthographic { left, right, top, bottom, near, far } => {
                Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraDescriptor {
    name: String,
    projection: Projection,
    node: NodeKey,
}

impl CameraDescriptor {
    pub fn new(name: &str, projection: Projection, node: NodeKey) -> Self {
        Self {
            name: name.to_string(),
            projection,
            node,
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn kind(&self) -> ProjectionKind {
        self.projection.kind()
    }

    /// Scene-graph node carrying the camera's transform
    pub fn node(&self) -> NodeKey {
        self.node
    }

    pub fn near(&self) -> f32 {
        self.projection.near()
    }

    pub fn far(&self) -> f32 {
        self.projection.far()
    }

    /// Aspect ratio for perspective cameras, `None` for orthographic ones
    pub fn aspect(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { aspect, .. } => Some(aspect),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Field of view in degrees for perspective cameras
    pub fn fov_degrees(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov_degrees, .. } => Some(fov_degrees),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Width over height of the projected volume, for either kind
    pub fn effective_aspect(&self) -> f32 {
        match self.projection {
            Projection::Perspective { aspect, .. } => aspect,
            Projection::Orthographic { left, right, top, bottom, .. } => {
                let height = top - bottom;
                if height != 0.0 { (right - left) / height } else { 0.0 }
            }
        }
    }

    // ===== SETTERS =====

    pub fn set_far(&mut self, value: f32) {
        match &mut self.projection {
            Projection::Perspective { far, .. } | Projection::Orthographic { far, .. } => *far = value,
        }
    }

    /// No-op on orthographic cameras
    pub fn set_aspect(&mut self, value: f32) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = value;
        }
    }

    /// No-op on orthographic cameras
    pub fn set_fov_degrees(&mut self, value: f32) {
        if let Projection::Perspective { fov_degrees, .. } = &mut self.projection {
            *fov_degrees = value;
        }
    }

    /// No-op on perspective cameras
    pub fn set_extents(&mut self, new_left: f32, new_right: f32, new_top: f32, new_bottom: f32) {
        if let Projection::Orthographic { left, right, top, bottom, .. } = &mut self.projection {
            *left = new_left;
            *right = new_right;
            *top = new_top;
            *bottom = new_bottom;
        }
    }

    // ===== MATRICES =====

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Inverse of the node's world transform
    pub fn view_matrix(&self, graph: &SceneGraph) -> Result<Mat4> {
        Ok(graph.world_matrix(self.node)?.inverse())
    }

    pub fn view_projection_matrix(&self, graph: &SceneGraph) -> Result<Mat4> {
        Ok(self.projection_matrix() * self.view_matrix(graph)?)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
