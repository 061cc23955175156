/// SceneDriver: hosts one scene on one surface.
///
/// The driver calls `initialize` once, turns winit window events into
/// resize and key calls, and ticks the scene while its [`Liveness`] flag is
/// set. Once torn down, ticks return `Ok(false)` without touching the scene,
/// so a scheduler holding a stale tick callback cannot revive it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use crate::error::Result;
use crate::render::{RenderSurface, SurfaceSize};
use crate::{engine_bail, engine_debug, engine_info};
use super::key_switch::KeySwitch;
use super::props::PropertyTable;
use super::scene_render::{FrameContext, SceneRender, SetupContext};

/// Shared "scene is still shown" flag
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag for every clone
    pub fn kill(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SceneDriver<S: SceneRender, F: RenderSurface> {
    scene: S,
    surface: F,
    properties: PropertyTable<S>,
    key_switch: Option<KeySwitch>,
    auto_resize: bool,
    liveness: Liveness,
    started: bool,
    frame_index: u64,
}

impl<S: SceneRender, F: RenderSurface> SceneDriver<S, F> {
    pub fn new(scene: S, surface: F) -> Self {
        Self {
            scene,
            surface,
            properties: S::exposed_properties(),
            key_switch: None,
            auto_resize: false,
            liveness: Liveness::new(),
            started: false,
            frame_index: 0,
        }
    }

    /// Initialize the scene and apply the initial surface size
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            engine_bail!("glaxier::SceneDriver", InitializationFailed:
                "scene '{}' already started", self.scene.title());
        }
        if !self.liveness.is_alive() {
            engine_bail!("glaxier::SceneDriver", InitializationFailed:
                "scene '{}' was torn down", self.scene.title());
        }

        let mut setup = SetupContext::new(self.surface.size());
        self.scene.initialize(&mut setup)?;
        let (key_switch, auto_resize) = setup.into_parts();
        self.key_switch = key_switch;
        self.auto_resize = auto_resize;
        self.started = true;

        if self.auto_resize {
            if let Some(aspect) = self.surface.size().aspect() {
                self.scene.resize(aspect);
            }
        }

        engine_info!("glaxier::SceneDriver", "Scene '{}' started ({} key bindings, auto-resize: {})",
            self.scene.title(),
            self.key_switch.as_ref().map_or(0, |k| k.len()),
            self.auto_resize);
        Ok(())
    }

    /// Route a winit window event. Returns whether the event was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Result<bool> {
        match event {
            WindowEvent::Resized(size) => Ok(self.resize(*size)),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(code) => self.key(code),
                    PhysicalKey::Unidentified(_) => Ok(false),
                }
            }
            _ => Ok(false),
        }
    }

    /// Resize the surface, then notify the scene if it asked for it.
    ///
    /// Zero-sized surfaces (minimized windows) are ignored.
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> bool {
        let size = SurfaceSize::from(size);
        if size.is_empty() {
            engine_debug!("glaxier::SceneDriver", "Ignoring resize to {}x{}", size.width, size.height);
            return false;
        }
        self.surface.resize(size);
        if self.started && self.auto_resize && self.liveness.is_alive() {
            if let Some(aspect) = size.aspect() {
                self.scene.resize(aspect);
            }
        }
        true
    }

    /// Apply the scene's key switch for `code`
    pub fn key(&mut self, code: KeyCode) -> Result<bool> {
        if !self.started || !self.liveness.is_alive() {
            return Ok(false);
        }
        match &self.key_switch {
            Some(switch) => switch.apply(code, &mut self.scene, &self.properties),
            None => Ok(false),
        }
    }

    /// Advance and draw one frame. `Ok(false)` once torn down.
    pub fn tick(&mut self, elapsed_seconds: f64) -> Result<bool> {
        if !self.liveness.is_alive() {
            return Ok(false);
        }
        if !self.started {
            engine_bail!("glaxier::SceneDriver", InitializationFailed:
                "scene '{}' ticked before start()", self.scene.title());
        }
        let mut frame = FrameContext::new(&mut self.surface, self.frame_index);
        self.scene.tick(&mut frame, elapsed_seconds)?;
        self.frame_index += 1;
        Ok(true)
    }

    /// Stop ticking. Every [`Liveness`] clone observes it.
    pub fn teardown(&mut self) {
        if self.liveness.is_alive() {
            self.liveness.kill();
            engine_info!("glaxier::SceneDriver", "Scene '{}' torn down after {} frames",
                self.scene.title(), self.frame_index);
        }
    }

    // ===== GETTERS =====

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    /// Mutable access to the surface between ticks (e.g. to drain a recorder)
    pub fn surface_mut(&mut self) -> &mut F {
        &mut self.surface
    }

    pub fn properties(&self) -> &PropertyTable<S> {
        &self.properties
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
