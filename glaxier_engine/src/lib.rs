/*!
# Glaxier Engine

Interactive 3D demo scenes and the plumbing that composes them into one
window.

## Architecture

- **Camera rig**: observer + rig cameras, helpers, and the key-driven
  hand-off between a perspective and an orthographic camera
- **Dual-viewport loop**: one frame drawn as two passes (observer / active
  camera) with helper visibility toggled between them
- **Scene contract**: `SceneRender` trait, property tables, key switches,
  and a driver that hosts one scene on one surface
- **Composition**: documents mounting several scenes on one shared runtime,
  staged and opened through pluggable collaborators

Rendering goes through the `RenderSurface` trait. The engine ships a headless
surface that records what it is asked to draw.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod compose;
pub mod render;
pub mod scene;
pub mod scenes;

// Main glaxier namespace module
pub mod glaxier {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only; the engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Cameras, helpers, and the camera rig
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene composition
    pub mod compose {
        pub use crate::compose::*;
    }

    // Surfaces, viewports, and the dual-viewport loop
    pub mod render {
        pub use crate::render::*;
    }

    // Scene graph, scene contract, and scene runtime
    pub mod scene {
        pub use crate::scene::*;
    }

    // Built-in demo scenes
    pub mod scenes {
        pub use crate::scenes::*;
    }
}

// Re-export math library at crate root
pub use glam;
