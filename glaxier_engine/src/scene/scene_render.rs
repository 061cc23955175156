/// SceneRender: the contract every demo scene implements.
///
/// A host calls [`SceneRender::initialize`] once, then
/// [`SceneRender::tick`] once per frame until the scene is torn down.
/// Resize notifications are only delivered to scenes that opted in through
/// [`SetupContext::auto_resize`], and key input only reaches scenes that
/// registered a [`KeySwitch`].

use crate::error::Result;
use crate::render::{RenderSurface, SurfaceSize, Viewport};
use super::key_switch::KeySwitch;
use super::props::PropertyTable;
use super::scene_graph::SceneGraph;

pub trait SceneRender: Send {
    /// Human-readable scene title
    fn title(&self) -> &str;

    /// Scene graph holding everything the scene draws
    fn objects(&self) -> &SceneGraph;

    /// Build cameras and objects, register key bindings and resize interest
    fn initialize(&mut self, setup: &mut SetupContext) -> Result<()>;

    /// Advance the scene to `elapsed_seconds` and draw it
    fn tick(&mut self, frame: &mut FrameContext<'_>, elapsed_seconds: f64) -> Result<()>;

    /// Surface aspect changed (width / height)
    fn resize(&mut self, _aspect: f32) {}

    /// Named properties hosts and key switches may read and write
    fn exposed_properties() -> PropertyTable<Self> where Self: Sized;
}

/// What a scene can ask of its host during initialization
#[derive(Debug, Clone)]
pub struct SetupContext {
    surface_size: SurfaceSize,
    key_switch: Option<KeySwitch>,
    auto_resize: bool,
}

impl SetupContext {
    pub fn new(surface_size: SurfaceSize) -> Self {
        Self {
            surface_size,
            key_switch: None,
            auto_resize: false,
        }
    }

    /// Surface size at initialization time
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    /// Register the key → property assignments table
    pub fn key_switch(&mut self, switch: KeySwitch) {
        self.key_switch = Some(switch);
    }

    /// Ask to be notified on every surface resize
    pub fn auto_resize(&mut self) {
        self.auto_resize = true;
    }

    pub fn wants_resize(&self) -> bool {
        self.auto_resize
    }

    pub fn registered_key_switch(&self) -> Option<&KeySwitch> {
        self.key_switch.as_ref()
    }

    /// Hand the registrations over to the host
    pub fn into_parts(self) -> (Option<KeySwitch>, bool) {
        (self.key_switch, self.auto_resize)
    }
}

/// Per-frame access to the output surface.
///
/// A scene draws into [`FrameContext::region`] only. Hosting one scene, the
/// region is the whole surface; a composed stage gives each scene its own.
pub struct FrameContext<'a> {
    surface: &'a mut dyn RenderSurface,
    region: Viewport,
    frame_index: u64,
}

impl<'a> FrameContext<'a> {
    pub fn new(surface: &'a mut dyn RenderSurface, frame_index: u64) -> Self {
        let region = Viewport::full(surface.size());
        Self { surface, region, frame_index }
    }

    pub fn with_region(surface: &'a mut dyn RenderSurface, region: Viewport, frame_index: u64) -> Self {
        Self { surface, region, frame_index }
    }

    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.surface
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface.size()
    }

    /// Part of the surface this scene owns for the frame
    pub fn region(&self) -> Viewport {
        self.region
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
