/// CamerasScene: the dual-camera demo.
///
/// A wireframe target orbits the origin carrying a smaller satellite. A
/// camera rig at the origin tracks it with either a perspective or an
/// orthographic camera (keys `P` / `O`). The left half of the surface shows
/// the scene from a fixed observer, including the active camera's frustum;
/// the right half shows what the active camera sees.

use glam::Vec3;
use crate::camera::{CameraKey, CameraRigConfig, HelperKey, RigController, PROP_ACTIVE_CAMERA, PROP_ACTIVE_HELPER};
use crate::error::Result;
use crate::render::{DualViewportLoop, FrameReport};
use crate::scene::{
    FrameContext, NodeKey, NodeKind, PointCloud, PropValue, PropertyTable, SceneGraph,
    SceneRender, SetupContext, SphereMesh, Transform,
};
use crate::{engine_bail, engine_debug, engine_err, engine_warn};

/// Scene layout and animation constants
#[derive(Debug, Clone)]
pub struct CamerasConfig {
    pub rig: CameraRigConfig,
    /// Animation phase per elapsed second
    pub angular_speed: f32,
    pub orbit_radius: f32,
    pub target_radius: f32,
    pub target_color: u32,
    pub satellite_radius: f32,
    pub satellite_color: u32,
    /// Horizontal swing of the satellite around the target
    pub satellite_swing: f32,
    pub satellite_height: f32,
    pub particle_count: usize,
    pub particle_spread: f32,
    pub particle_color: u32,
    pub particle_seed: u64,
}

impl Default for CamerasConfig {
    fn default() -> Self {
        Self {
            rig: CameraRigConfig::default(),
            angular_speed: 0.5,
            orbit_radius: 700.0,
            target_radius: 100.0,
            target_color: 0xffffff,
            satellite_radius: 50.0,
            satellite_color: 0x00ff00,
            satellite_swing: 70.0,
            satellite_height: 150.0,
            particle_count: 10000,
            particle_spread: 2000.0,
            particle_color: 0x888888,
            particle_seed: 0x5eed,
        }
    }
}

/// Everything built by `initialize`
struct Stage {
    rig: RigController,
    target: NodeKey,
    satellite: NodeKey,
    frame_loop: DualViewportLoop,
}

pub struct CamerasScene {
    config: CamerasConfig,
    graph: SceneGraph,
    stage: Option<Stage>,
    last_report: Option<FrameReport>,
}

impl CamerasScene {
    pub fn new() -> Self {
        Self::with_config(CamerasConfig::default())
    }

    pub fn with_config(config: CamerasConfig) -> Self {
        Self {
            config,
            graph: SceneGraph::new(),
            stage: None,
            last_report: None,
        }
    }

    pub fn config(&self) -> &CamerasConfig {
        &self.config
    }

    /// Camera rig, once initialized
    pub fn rig(&self) -> Option<&RigController> {
        self.stage.as_ref().map(|s| &s.rig)
    }

    pub fn rig_mut(&mut self) -> Option<&mut RigController> {
        self.stage.as_mut().map(|s| &mut s.rig)
    }

    pub fn target(&self) -> Option<NodeKey> {
        self.stage.as_ref().map(|s| s.target)
    }

    pub fn satellite(&self) -> Option<NodeKey> {
        self.stage.as_ref().map(|s| s.satellite)
    }

    /// Report of the last rendered frame
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// Target position at animation phase `r`
    pub fn target_position(&self, r: f32) -> Vec3 {
        self.config.orbit_radius * Vec3::new(r.cos(), r.sin(), r.sin())
    }

    /// Satellite position relative to the target at phase `r`
    pub fn satellite_offset(&self, r: f32) -> Vec3 {
        Vec3::new(
            self.config.satellite_swing * (2.0 * r).cos(),
            self.config.satellite_height,
            self.config.satellite_swing * r.sin(),
        )
    }

    fn rig_for_write(&mut self) -> Result<&mut RigController> {
        match self.stage.as_mut() {
            Some(stage) => Ok(&mut stage.rig),
            None => Err(engine_err!("glaxier::CamerasScene", InvalidArgument: "scene is not initialized")),
        }
    }
}

impl Default for CamerasScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRender for CamerasScene {
    fn title(&self) -> &str {
        "Cameras"
    }

    fn objects(&self) -> &SceneGraph {
        &self.graph
    }

    fn initialize(&mut self, setup: &mut SetupContext) -> Result<()> {
        if self.stage.is_some() {
            engine_bail!("glaxier::CamerasScene", InitializationFailed: "scene already initialized");
        }

        let size = setup.surface_size();
        let aspect = size.aspect().unwrap_or_else(|| {
            engine_warn!("glaxier::CamerasScene", "Empty surface at setup, assuming a square aspect");
            1.0
        });

        let rig = RigController::new(&mut self.graph, self.config.rig.clone(), aspect)?;

        let target = self.graph.add_node(
            "target",
            NodeKind::Mesh(SphereMesh::wireframe(self.config.target_radius, self.config.target_color)),
            Transform::from_translation(self.target_position(0.0)),
        );
        let satellite = self.graph.add_child(
            target,
            "satellite",
            NodeKind::Mesh(SphereMesh::wireframe(self.config.satellite_radius, self.config.satellite_color)),
            Transform::from_translation(self.satellite_offset(0.0)),
        )?;
        self.graph.add_node(
            "particles",
            NodeKind::Points(PointCloud::random_spread(
                self.config.particle_count,
                self.config.particle_spread,
                self.config.particle_color,
                self.config.particle_seed,
            )),
            Transform::IDENTITY,
        );

        setup.key_switch(rig.bindings().clone());
        setup.auto_resize();

        engine_debug!("glaxier::CamerasScene", "Initialized with {} nodes", self.graph.len());
        self.stage = Some(Stage {
            rig,
            target,
            satellite,
            frame_loop: DualViewportLoop::new(size),
        });
        Ok(())
    }

    fn tick(&mut self, frame: &mut FrameContext<'_>, elapsed_seconds: f64) -> Result<()> {
        let r = (elapsed_seconds as f32) * self.config.angular_speed;
        let target_position = self.target_position(r);
        let satellite_offset = self.satellite_offset(r);

        let Some(stage) = self.stage.as_mut() else {
            engine_bail!("glaxier::CamerasScene", InitializationFailed: "tick before initialize");
        };

        self.graph.set_translation(stage.target, target_position)?;
        self.graph.set_translation(stage.satellite, satellite_offset)?;
        stage.rig.update(&mut self.graph, target_position, r)?;

        let region = frame.region();
        if let Some(report) = stage.frame_loop.render_frame_in(frame.surface(), region, &mut self.graph, &stage.rig)? {
            self.last_report = Some(report);
        }
        Ok(())
    }

    fn resize(&mut self, aspect: f32) {
        if let Some(stage) = self.stage.as_mut() {
            stage.rig.on_resize(aspect);
        }
    }

    fn exposed_properties() -> PropertyTable<Self> {
        PropertyTable::<Self>::new()
            .with(
                PROP_ACTIVE_CAMERA,
                |scene| PropValue::Camera(scene.rig().map_or_else(CameraKey::default, |r| r.active_camera())),
                |scene, value| scene.rig_for_write()?.set_active_camera(value.as_camera()?),
            )
            .with(
                PROP_ACTIVE_HELPER,
                |scene| PropValue::Helper(scene.rig().map_or_else(HelperKey::default, |r| r.active_helper())),
                |scene, value| scene.rig_for_write()?.set_active_helper(value.as_helper()?),
            )
    }
}

#[cfg(test)]
#[path = "cameras_tests.rs"]
mod tests;
