/// RigController: the camera state machine of a dual-viewport scene.
///
/// Owns a fixed observer camera plus the rig cameras (perspective and
/// orthographic) parented to one rig node, a helper per rig camera, and the
/// [`RigState`] naming which rig camera is active.
///
/// Mutation rules:
/// - `RigState` only changes through [`RigController::set_active_camera`]
///   (directly, through the `activeCamera`/`activeHelper` properties, or
///   through a key binding). Every path sets camera and helper together.
/// - [`RigController::on_resize`] only touches aspect-dependent intrinsics.
/// - [`RigController::update`] (per tick) only touches the active camera's
///   intrinsics, helper geometry/visibility, and the rig orientation.

use std::f32::consts::PI;
use glam::{Quat, Vec3};
use slotmap::{SecondaryMap, SlotMap};
use winit::keyboard::KeyCode;
use crate::error::Result;
use crate::render::Viewport;
use crate::scene::{KeySwitch, NodeKey, NodeKind, PropValue, PropertyTable, SceneGraph, SphereMesh, Transform};
use crate::{engine_bail, engine_debug, engine_err, engine_trace, engine_warn};
use super::camera::{CameraDescriptor, CameraKey, Projection, ProjectionKind};
use super::camera_view::CameraView;
use super::helper::{CameraHelper, HelperKey};

/// Property name of the active rig camera
pub const PROP_ACTIVE_CAMERA: &str = "activeCamera";
/// Property name of the active camera's helper
pub const PROP_ACTIVE_HELPER: &str = "activeHelper";

/// Far plane never collapses onto the near plane
const MIN_DEPTH_RANGE: f32 = 1.0;

/// Fraction of the surface width each viewport gets
const VIEWPORT_SHARE: f32 = 0.5;

/// Intrinsics and bindings of the standard observer + rig setup
#[derive(Debug, Clone)]
pub struct CameraRigConfig {
    pub observer_fov_degrees: f32,
    pub observer_near: f32,
    pub observer_far: f32,
    /// Observer sits on +Z at this distance, looking at the origin
    pub observer_distance: f32,
    pub rig_fov_degrees: f32,
    pub rig_near: f32,
    pub rig_far: f32,
    /// Reference height of the orthographic volume
    pub frustum_size: f32,
    /// Marker sphere carried by the rig
    pub marker_radius: f32,
    pub marker_offset: f32,
    pub marker_color: u32,
    /// Perspective fov while active: `fov_base + fov_swing * sin(0.5 r)`
    pub fov_base: f32,
    pub fov_swing: f32,
    pub orthographic_key: KeyCode,
    pub perspective_key: KeyCode,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            observer_fov_degrees: 50.0,
            observer_near: 1.0,
            observer_far: 10000.0,
            observer_distance: 2500.0,
            rig_fov_degrees: 50.0,
            rig_near: 150.0,
            rig_far: 1000.0,
            frustum_size: 600.0,
            marker_radius: 5.0,
            marker_offset: 150.0,
            marker_color: 0x0000ff,
            fov_base: 35.0,
            fov_swing: 30.0,
            orthographic_key: KeyCode::KeyO,
            perspective_key: KeyCode::KeyP,
        }
    }
}

/// Which rig camera is active, and its helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigState {
    pub active_camera: CameraKey,
    pub active_helper: HelperKey,
}

pub struct RigController {
    config: CameraRigConfig,
    cameras: SlotMap<CameraKey, CameraDescriptor>,
    helpers: SlotMap<HelperKey, CameraHelper>,
    helper_of: SecondaryMap<CameraKey, HelperKey>,
    observer: CameraKey,
    perspective: CameraKey,
    orthographic: CameraKey,
    rig_node: NodeKey,
    marker_node: NodeKey,
    state: RigState,
    bindings: KeySwitch,
    tracked_distance: Option<f32>,
}

impl RigController {
    /// Build the observer, the rig with its two cameras and marker, and one
    /// helper per rig camera. The perspective camera starts active.
    ///
    /// `aspect` is the full surface aspect (width / height).
    pub fn new(graph: &mut SceneGraph, config: CameraRigConfig, aspect: f32) -> Result<Self> {
        let mut cameras = SlotMap::with_key();
        let mut helpers = SlotMap::with_key();
        let mut helper_of = SecondaryMap::new();

        let observer = cameras.try_insert_with_key(|key| -> Result<CameraDescriptor> {
            let node = graph.add_node(
                "observer",
                NodeKind::Camera(key),
                Transform::from_translation(Vec3::new(0.0, 0.0, config.observer_distance)),
            );
            Ok(CameraDescriptor::new("observer", Projection::Perspective {
                fov_degrees: config.observer_fov_degrees,
                aspect: VIEWPORT_SHARE * aspect,
                near: config.observer_near,
                far: config.observer_far,
            }, node))
        })?;

        let rig_node = graph.add_node("camera rig", NodeKind::Group, Transform::IDENTITY);

        // Cameras look down -Z, the rig looks down +Z
        let half_turn = Transform::from_rotation(Quat::from_rotation_y(PI));

        let perspective = cameras.try_insert_with_key(|key| -> Result<CameraDescriptor> {
            let node = graph.add_child(rig_node, "perspective", NodeKind::Camera(key), half_turn)?;
            Ok(CameraDescriptor::new("perspective", Projection::Perspective {
                fov_degrees: config.rig_fov_degrees,
                aspect: VIEWPORT_SHARE * aspect,
                near: config.rig_near,
                far: config.rig_far,
            }, node))
        })?;

        let (left, right, top, bottom) = Self::orthographic_extents(config.frustum_size, aspect);
        let orthographic = cameras.try_insert_with_key(|key| -> Result<CameraDescriptor> {
            let node = graph.add_child(rig_node, "orthographic", NodeKind::Camera(key), half_turn)?;
            Ok(CameraDescriptor::new("orthographic", Projection::Orthographic {
                left, right, top, bottom,
                near: config.rig_near,
                far: config.rig_far,
            }, node))
        })?;

        let marker_node = graph.add_child(
            rig_node,
            "rig marker",
            NodeKind::Mesh(SphereMesh::wireframe(config.marker_radius, config.marker_color)),
            Transform::from_translation(Vec3::new(0.0, 0.0, config.marker_offset)),
        )?;

        for (camera, name) in [(perspective, "perspective helper"), (orthographic, "orthographic helper")] {
            let helper = helpers.insert_with_key(|key| {
                let node = graph.add_node(name, NodeKind::Helper(key), Transform::IDENTITY);
                CameraHelper::new(camera, node)
            });
            helper_of.insert(camera, helper);
        }

        let state = RigState {
            active_camera: perspective,
            active_helper: helper_of[perspective],
        };

        let bindings = KeySwitch::new()
            .with(config.orthographic_key, &[
                (PROP_ACTIVE_CAMERA, PropValue::Camera(orthographic)),
                (PROP_ACTIVE_HELPER, PropValue::Helper(helper_of[orthographic])),
            ])
            .with(config.perspective_key, &[
                (PROP_ACTIVE_CAMERA, PropValue::Camera(perspective)),
                (PROP_ACTIVE_HELPER, PropValue::Helper(helper_of[perspective])),
            ]);

        let rig = Self {
            config,
            cameras,
            helpers,
            helper_of,
            observer,
            perspective,
            orthographic,
            rig_node,
            marker_node,
            state,
            bindings,
            tracked_distance: None,
        };
        rig.sync_helper_visibility(graph)?;

        engine_debug!("glaxier::RigController", "Camera rig created ({} cameras, {} helpers)",
            rig.cameras.len(), rig.helpers.len());

        Ok(rig)
    }

    fn orthographic_extents(frustum_size: f32, aspect: f32) -> (f32, f32, f32, f32) {
        let half_width = VIEWPORT_SHARE * frustum_size * aspect / 2.0;
        (-half_width, half_width, frustum_size / 2.0, -frustum_size / 2.0)
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &CameraRigConfig {
        &self.config
    }

    pub fn state(&self) -> RigState {
        self.state
    }

    pub fn active_camera(&self) -> CameraKey {
        self.state.active_camera
    }

    pub fn active_helper(&self) -> HelperKey {
        self.state.active_helper
    }

    pub fn observer(&self) -> CameraKey {
        self.observer
    }

    pub fn perspective(&self) -> CameraKey {
        self.perspective
    }

    pub fn orthographic(&self) -> CameraKey {
        self.orthographic
    }

    pub fn rig_node(&self) -> NodeKey {
        self.rig_node
    }

    pub fn marker_node(&self) -> NodeKey {
        self.marker_node
    }

    pub fn camera(&self, key: CameraKey) -> Option<&CameraDescriptor> {
        self.cameras.get(key)
    }

    pub fn helper(&self, key: HelperKey) -> Option<&CameraHelper> {
        self.helpers.get(key)
    }

    /// Helper visualizing `camera`, if it is a rig camera
    pub fn helper_for(&self, camera: CameraKey) -> Option<HelperKey> {
        self.helper_of.get(camera).copied()
    }

    pub fn cameras(&self) -> impl Iterator<Item = (CameraKey, &CameraDescriptor)> {
        self.cameras.iter()
    }

    pub fn helpers(&self) -> impl Iterator<Item = (HelperKey, &CameraHelper)> {
        self.helpers.iter()
    }

    /// Distance to the target seen by the last [`RigController::update`]
    pub fn tracked_distance(&self) -> Option<f32> {
        self.tracked_distance
    }

    pub fn bindings(&self) -> &KeySwitch {
        &self.bindings
    }

    /// Resolve a state to its camera and helper, if both still exist and belong together
    pub fn resolve(&self, state: RigState) -> Option<(&CameraDescriptor, &CameraHelper)> {
        let camera = self.cameras.get(state.active_camera)?;
        let helper = self.helpers.get(state.active_helper)?;
        (helper.camera() == state.active_camera).then_some((camera, helper))
    }

    /// Snapshot a camera for rendering into `viewport`
    pub fn camera_view(&self, key: CameraKey, graph: &SceneGraph, viewport: Viewport) -> Result<CameraView> {
        let camera = self.cameras.get(key).ok_or_else(|| {
            engine_err!("glaxier::RigController", InvalidResource: "camera key no longer resolves")
        })?;
        CameraView::capture(key, camera, graph, viewport)
    }

    // ===== STATE TRANSITIONS =====

    /// Make `camera` the active rig camera, together with its helper.
    ///
    /// If a target has been tracked, the far-plane rule is applied to the
    /// new camera right away so its far plane never depends on switch history.
    pub fn set_active_camera(&mut self, camera: CameraKey) -> Result<()> {
        let Some(helper) = self.helper_for(camera) else {
            engine_bail!("glaxier::RigController", InvalidArgument:
                "camera is not a rig camera and cannot become active");
        };
        if !self.cameras.contains_key(camera) {
            engine_bail!("glaxier::RigController", InvalidResource: "camera key no longer resolves");
        }

        let changed = self.state.active_camera != camera;
        self.state = RigState { active_camera: camera, active_helper: helper };

        if let Some(distance) = self.tracked_distance {
            self.apply_far_rule(camera, distance);
        }
        if changed {
            engine_debug!("glaxier::RigController", "Active camera -> {}", self.cameras[camera].name());
        }
        Ok(())
    }

    /// Make the camera visualized by `helper` active
    pub fn set_active_helper(&mut self, helper: HelperKey) -> Result<()> {
        let camera = self.helpers.get(helper).map(|h| h.camera()).ok_or_else(|| {
            engine_err!("glaxier::RigController", InvalidResource: "helper key no longer resolves")
        })?;
        self.set_active_camera(camera)
    }

    /// Accessors for `activeCamera` / `activeHelper`
    pub fn properties() -> PropertyTable<RigController> {
        PropertyTable::<Self>::new()
            .with(
                PROP_ACTIVE_CAMERA,
                |rig| PropValue::Camera(rig.state.active_camera),
                |rig, value| rig.set_active_camera(value.as_camera()?),
            )
            .with(
                PROP_ACTIVE_HELPER,
                |rig| PropValue::Helper(rig.state.active_helper),
                |rig, value| rig.set_active_helper(value.as_helper()?),
            )
    }

    /// Bind `key` to activate `camera` (and its helper)
    pub fn bind(&mut self, key: KeyCode, camera: CameraKey) -> Result<()> {
        let Some(helper) = self.helper_for(camera) else {
            engine_bail!("glaxier::RigController", InvalidArgument:
                "cannot bind {:?}: camera is not a rig camera", key);
        };
        self.bind_pair(key, camera, helper)
    }

    /// Bind `key` to an explicit camera/helper pair.
    ///
    /// The pair must belong together, otherwise the binding is rejected.
    pub fn bind_pair(&mut self, key: KeyCode, camera: CameraKey, helper: HelperKey) -> Result<()> {
        if self.helper_for(camera) != Some(helper) {
            engine_bail!("glaxier::RigController", InvalidArgument:
                "cannot bind {:?}: helper does not belong to camera", key);
        }
        self.bindings.bind(key, &[
            (PROP_ACTIVE_CAMERA, PropValue::Camera(camera)),
            (PROP_ACTIVE_HELPER, PropValue::Helper(helper)),
        ]);
        Ok(())
    }

    /// Apply the binding of `key`. Unbound keys are ignored (`Ok(false)`).
    pub fn switch_active(&mut self, key: KeyCode) -> Result<bool> {
        let Some(assignments) = self.bindings.assignments(key).map(|a| a.to_vec()) else {
            engine_trace!("glaxier::RigController", "No binding for {:?}", key);
            return Ok(false);
        };
        Self::properties().apply_all(self, &assignments)?;
        Ok(true)
    }

    /// Remove a rig camera, its helper and their nodes.
    ///
    /// The rig state is left as is: if the removed camera was active, the
    /// state no longer resolves until another camera is activated, and the
    /// render loop keeps using its last good state. Returns false for
    /// unknown keys.
    pub fn remove_camera(&mut self, graph: &mut SceneGraph, camera: CameraKey) -> Result<bool> {
        if camera == self.observer {
            engine_bail!("glaxier::RigController", InvalidArgument: "the observer camera cannot be removed");
        }
        let Some(descriptor) = self.cameras.remove(camera) else {
            return Ok(false);
        };
        graph.remove_node(descriptor.node());
        if let Some(helper) = self.helper_of.remove(camera).and_then(|h| self.helpers.remove(h)) {
            graph.remove_node(helper.node());
        }
        engine_debug!("glaxier::RigController", "Removed camera '{}'", descriptor.name());
        Ok(true)
    }

    // ===== RESIZE =====

    /// Recompute aspect-dependent intrinsics for a surface of the given aspect.
    ///
    /// Perspective cameras get half the surface aspect (each renders into one
    /// half); orthographic extents are recomputed from the frustum size.
    /// Idempotent. Non-finite or non-positive aspects are ignored.
    pub fn on_resize(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            engine_warn!("glaxier::RigController", "Ignoring resize to aspect {}", aspect);
            return;
        }
        let (left, right, top, bottom) = Self::orthographic_extents(self.config.frustum_size, aspect);
        for (_, camera) in self.cameras.iter_mut() {
            match camera.kind() {
                ProjectionKind::Perspective => camera.set_aspect(VIEWPORT_SHARE * aspect),
                ProjectionKind::Orthographic => camera.set_extents(left, right, top, bottom),
            }
        }
        engine_trace!("glaxier::RigController", "Resized cameras to aspect {:.3}", aspect);
    }

    // ===== PER-TICK =====

    /// Per-tick update: aim the rig at `target`, drive the active camera's
    /// intrinsics, and refresh helper geometry and visibility.
    ///
    /// `phase` is the scene's animation phase `r`; the perspective fov
    /// oscillates as `fov_base + fov_swing * sin(0.5 r)`.
    pub fn update(&mut self, graph: &mut SceneGraph, target: Vec3, phase: f32) -> Result<()> {
        graph.look_at(self.rig_node, target)?;

        let origin = graph.world_position(self.rig_node)?;
        let distance = origin.distance(target);
        self.tracked_distance = Some(distance);

        let active = self.state.active_camera;
        if let Some(camera) = self.cameras.get_mut(active) {
            if camera.kind() == ProjectionKind::Perspective {
                camera.set_fov_degrees(self.config.fov_base + self.config.fov_swing * (0.5 * phase).sin());
            }
        }
        self.apply_far_rule(active, distance);
        self.sync_helper_visibility(graph)?;

        if let (Some(camera), Some(helper)) = (
            self.cameras.get(active),
            self.helpers.get_mut(self.state.active_helper),
        ) {
            helper.update(camera, graph)?;
        }
        Ok(())
    }

    fn apply_far_rule(&mut self, camera: CameraKey, distance: f32) {
        if let Some(camera) = self.cameras.get_mut(camera) {
            let far = distance.max(camera.near() + MIN_DEPTH_RANGE);
            camera.set_far(far);
        }
    }

    /// Active helper visible, every other helper hidden
    fn sync_helper_visibility(&self, graph: &mut SceneGraph) -> Result<()> {
        for (key, helper) in self.helpers.iter() {
            graph.set_visible(helper.node(), key == self.state.active_helper)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "rig_tests.rs"]
mod tests;
