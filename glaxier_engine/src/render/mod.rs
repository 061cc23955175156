//! Render module: surfaces, viewports, and the dual-viewport loop.

mod dual_viewport;
mod surface;
mod viewport;

pub use dual_viewport::{DualViewportLoop, FrameReport, PassReport, PassRole};
pub use surface::{HeadlessSurface, RenderSurface, SurfaceCommand};
pub use viewport::{SurfaceSize, Viewport, ViewportSplit};
