//! Camera module: cameras, frustum helpers, and the camera rig.
//!
//! Cameras are plain descriptors attached to scene-graph nodes. The rig
//! controller owns the cameras of a dual-viewport scene and drives which
//! one is active.

mod camera;
mod camera_view;
mod frustum;
mod helper;
mod rig;

pub use camera::{CameraDescriptor, CameraKey, Projection, ProjectionKind};
pub use camera_view::CameraView;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use helper::{CameraHelper, HelperKey};
pub use rig::{CameraRigConfig, RigController, RigState, PROP_ACTIVE_CAMERA, PROP_ACTIVE_HELPER};
