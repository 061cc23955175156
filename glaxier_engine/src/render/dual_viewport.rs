/// DualViewportLoop: draws one frame as two passes over the same scene.
///
/// Pass A renders the fixed observer into the left half with the active
/// camera's helper shown, so the observer sees the active camera's volume.
/// Pass B renders the active rig camera into the right half with every
/// helper hidden, so no camera ever sees its own helper.
///
/// Both passes capture their cameras from the same rig state, which is read
/// once at the start of the frame. A loop owns one region of the surface
/// (the whole surface unless told otherwise) and never clears or draws
/// outside it, so several loops can share one surface.

use crate::camera::{CameraKey, RigController, RigState};
use crate::error::Result;
use crate::scene::SceneGraph;
use crate::{engine_bail, engine_trace, engine_warn};
use super::surface::RenderSurface;
use super::viewport::{SurfaceSize, Viewport, ViewportSplit};

const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Which half a pass rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassRole {
    /// Left half, fixed observer camera
    Observer,
    /// Right half, active rig camera
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub role: PassRole,
    pub camera: CameraKey,
    pub viewport: Viewport,
    /// Whether the active camera's helper was visible during the pass
    pub active_helper_visible: bool,
    /// Nodes drawn by the surface
    pub drawn: usize,
}

/// Outcome of one rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    /// Rig state both passes were rendered with
    pub state: RigState,
    /// True when the rig's current state did not resolve and the last good one was used
    pub fell_back: bool,
    pub passes: Vec<PassReport>,
}

pub struct DualViewportLoop {
    region: Viewport,
    split: ViewportSplit,
    clear_color: [f32; 4],
    last_good: Option<RigState>,
    frame_index: u64,
}

impl DualViewportLoop {
    pub fn new(size: SurfaceSize) -> Self {
        let region = Viewport::full(size);
        Self {
            region,
            split: ViewportSplit::from_region(region),
            clear_color: DEFAULT_CLEAR_COLOR,
            last_good: None,
            frame_index: 0,
        }
    }

    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Surface region the loop draws into
    pub fn region(&self) -> Viewport {
        self.region
    }

    pub fn split(&self) -> ViewportSplit {
        self.split
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Last state both passes were rendered with
    pub fn last_good_state(&self) -> Option<RigState> {
        self.last_good
    }

    /// Draw over the whole surface of `size`. Returns whether the split changed.
    pub fn resize(&mut self, size: SurfaceSize) -> bool {
        self.set_region(Viewport::full(size))
    }

    /// Recompute the split for `region`. Empty regions are ignored;
    /// returns whether the split changed.
    pub fn set_region(&mut self, region: Viewport) -> bool {
        if region.is_empty() || region == self.region {
            return false;
        }
        self.region = region;
        self.split = ViewportSplit::from_region(region);
        true
    }

    /// Render one frame over the whole surface. Returns `Ok(None)` when the
    /// frame was skipped because neither the current nor the last good rig
    /// state resolves, or the surface is empty.
    pub fn render_frame(
        &mut self,
        surface: &mut dyn RenderSurface,
        graph: &mut SceneGraph,
        rig: &RigController,
    ) -> Result<Option<FrameReport>> {
        let region = Viewport::full(surface.size());
        self.render_frame_in(surface, region, graph, rig)
    }

    /// Render one frame into `region` only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `region` does not fit the surface.
    pub fn render_frame_in(
        &mut self,
        surface: &mut dyn RenderSurface,
        region: Viewport,
        graph: &mut SceneGraph,
        rig: &RigController,
    ) -> Result<Option<FrameReport>> {
        if surface.size().is_empty() || region.is_empty() {
            engine_trace!("glaxier::DualViewportLoop", "Skipping frame on empty region");
            return Ok(None);
        }
        if !region.fits(surface.size()) {
            engine_bail!("glaxier::DualViewportLoop", InvalidArgument:
                "region {}x{} at ({}, {}) exceeds the surface",
                region.width, region.height, region.x, region.y);
        }
        self.set_region(region);

        let (state, fell_back) = match self.resolve_state(rig) {
            Some(resolved) => resolved,
            None => {
                engine_warn!("glaxier::DualViewportLoop",
                    "Active camera does not resolve and no previous state is available, skipping frame");
                return Ok(None);
            }
        };

        surface.clear(self.region, self.clear_color)?;

        // Pass A: observer sees the active helper only
        self.set_helper_visibility(graph, rig, Some(state))?;
        let observer_pass = self.render_pass(surface, graph, rig, PassRole::Observer, rig.observer(), state)?;

        // Pass B: active camera sees no helper
        self.set_helper_visibility(graph, rig, None)?;
        let active_pass = self.render_pass(surface, graph, rig, PassRole::Active, state.active_camera, state);

        // Scene state keeps the active helper shown, even if pass B failed
        self.set_helper_visibility(graph, rig, Some(state))?;
        let active_pass = active_pass?;

        self.last_good = Some(state);
        let report = FrameReport {
            frame_index: self.frame_index,
            state,
            fell_back,
            passes: vec![observer_pass, active_pass],
        };
        self.frame_index += 1;
        Ok(Some(report))
    }

    fn resolve_state(&self, rig: &RigController) -> Option<(RigState, bool)> {
        let current = rig.state();
        if rig.resolve(current).is_some() {
            return Some((current, false));
        }
        let previous = self.last_good?;
        if rig.resolve(previous).is_some() {
            engine_warn!("glaxier::DualViewportLoop", "Active camera does not resolve, keeping previous camera");
            return Some((previous, true));
        }
        None
    }

    /// Show only `state`'s helper, or hide every helper when `state` is `None`
    fn set_helper_visibility(&self, graph: &mut SceneGraph, rig: &RigController, state: Option<RigState>) -> Result<()> {
        for (key, helper) in rig.helpers() {
            let visible = state.is_some_and(|s| s.active_helper == key);
            graph.set_visible(helper.node(), visible)?;
        }
        Ok(())
    }

    fn render_pass(
        &self,
        surface: &mut dyn RenderSurface,
        graph: &SceneGraph,
        rig: &RigController,
        role: PassRole,
        camera: CameraKey,
        state: RigState,
    ) -> Result<PassReport> {
        let viewport = match role {
            PassRole::Observer => self.split.left,
            PassRole::Active => self.split.right,
        };
        let view = rig.camera_view(camera, graph, viewport)?;
        let active_helper_visible = rig
            .helper(state.active_helper)
            .is_some_and(|h| graph.is_effectively_visible(h.node()));
        let drawn = surface.render(graph, &view)?;
        Ok(PassReport { role, camera, viewport, active_helper_visible, drawn })
    }
}

#[cfg(test)]
#[path = "dual_viewport_tests.rs"]
mod tests;
