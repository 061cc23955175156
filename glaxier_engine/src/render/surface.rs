/// RenderSurface: the output a dual-viewport loop draws into.
///
/// No GPU backend ships with the engine. [`HeadlessSurface`] records the
/// commands it receives (like a mock command list), which is what the demo
/// and the tests render through.

use crate::camera::{CameraKey, CameraView};
use crate::error::Result;
use crate::scene::{NodeKind, SceneGraph};
use crate::{engine_bail, engine_trace};
use super::viewport::{SurfaceSize, Viewport};

/// Surface abstraction used by the render loop
pub trait RenderSurface: Send {
    /// Current size in physical pixels
    fn size(&self) -> SurfaceSize;

    /// Adopt a new size. Called with non-empty sizes only.
    fn resize(&mut self, size: SurfaceSize);

    /// Clear `region`, leaving the rest of the surface untouched
    fn clear(&mut self, region: Viewport, color: [f32; 4]) -> Result<()>;

    /// Restrict subsequent draws to `viewport`
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Draw every visible node of `graph` through `view`, into the view's viewport.
    ///
    /// Returns the number of nodes drawn.
    fn render(&mut self, graph: &SceneGraph, view: &CameraView) -> Result<usize>;
}

/// One command received by a [`HeadlessSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Clear {
        region: Viewport,
        color: [f32; 4],
    },
    Resize(SurfaceSize),
    SetViewport(Viewport),
    Render {
        camera: CameraKey,
        viewport: Viewport,
        /// Projection aspect at render time
        aspect: f32,
        /// Names of the nodes drawn, in draw order
        drawn: Vec<String>,
    },
}

/// Surface that draws nothing and records everything
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    size: SurfaceSize,
    viewport: Option<Viewport>,
    commands: Vec<SurfaceCommand>,
}

impl HeadlessSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            viewport: None,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drain the recorded commands
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Render commands only
    pub fn renders(&self) -> impl DoubleEndedIterator<Item = &SurfaceCommand> {
        self.commands.iter().filter(|c| matches!(c, SurfaceCommand::Render { .. }))
    }

    /// Regions cleared so far, in order
    pub fn cleared_regions(&self) -> impl Iterator<Item = Viewport> + '_ {
        self.commands.iter().filter_map(|c| match c {
            SurfaceCommand::Clear { region, .. } => Some(*region),
            _ => None,
        })
    }

    /// Viewport set by the last `set_viewport`
    pub fn current_viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.viewport = None;
        self.commands.push(SurfaceCommand::Resize(size));
    }

    fn clear(&mut self, region: Viewport, color: [f32; 4]) -> Result<()> {
        if !region.fits(self.size) {
            engine_bail!("glaxier::HeadlessSurface", InvalidArgument:
                "clear region {}x{} at ({}, {}) exceeds surface {}x{}",
                region.width, region.height, region.x, region.y,
                self.size.width, self.size.height);
        }
        self.commands.push(SurfaceCommand::Clear { region, color });
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if !viewport.fits(self.size) {
            engine_bail!("glaxier::HeadlessSurface", InvalidArgument:
                "viewport {}x{} at ({}, {}) exceeds surface {}x{}",
                viewport.width, viewport.height, viewport.x, viewport.y,
                self.size.width, self.size.height);
        }
        self.viewport = Some(viewport);
        self.commands.push(SurfaceCommand::SetViewport(viewport));
        Ok(())
    }

    fn render(&mut self, graph: &SceneGraph, view: &CameraView) -> Result<usize> {
        if self.viewport != Some(*view.viewport()) {
            self.set_viewport(*view.viewport())?;
        }

        let mut drawn = Vec::new();
        for key in graph.drawable_nodes() {
            let Some(node) = graph.node(key) else { continue };
            // Meshes are culled against the frustum; helpers and point clouds are never culled
            if let NodeKind::Mesh(mesh) = node.kind() {
                let center = graph.world_position(key)?;
                if !view.frustum().intersects_sphere(center, mesh.radius) {
                    continue;
                }
            }
            drawn.push(node.name().to_string());
        }

        let count = drawn.len();
        engine_trace!("glaxier::HeadlessSurface", "Render '{}': {} nodes", view.name(), count);
        self.commands.push(SurfaceCommand::Render {
            camera: view.camera(),
            viewport: *view.viewport(),
            aspect: view.aspect(),
            drawn,
        });
        Ok(count)
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
