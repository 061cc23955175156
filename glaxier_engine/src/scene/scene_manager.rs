/// SceneManager: the shared scene runtime behind composed documents.
///
/// Scenes register a factory under their identifier. Mounting an ordered
/// list of identifiers instantiates and initializes one scene per entry and
/// returns a [`ComposedStage`] that drives them together on one surface.
/// Each mounted scene owns one full-width horizontal band of the surface,
/// in mount order from the top, so every scene stays visible.

use std::collections::HashMap;
use crate::compose::SceneBundleRef;
use crate::error::Result;
use crate::render::{RenderSurface, SurfaceSize, Viewport};
use crate::{engine_bail, engine_debug, engine_info};
use super::scene_render::{FrameContext, SceneRender, SetupContext};

/// Builds a fresh scene instance
pub type SceneFactory = Box<dyn Fn() -> Result<Box<dyn SceneRender>> + Send + Sync>;

/// Scene manager singleton (managed by Engine)
pub struct SceneManager {
    factories: HashMap<String, SceneFactory>,
}

impl SceneManager {
    /// Create an empty scene manager
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a scene factory under `id`
    ///
    /// # Errors
    ///
    /// Returns an error if a scene with the same identifier is already registered.
    pub fn register_scene<F>(&mut self, id: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Result<Box<dyn SceneRender>> + Send + Sync + 'static,
    {
        if self.factories.contains_key(id) {
            engine_bail!("glaxier::SceneManager", InvalidArgument:
                "scene '{}' already registered", id);
        }
        self.factories.insert(id.to_string(), Box::new(factory));
        engine_debug!("glaxier::SceneManager", "Registered scene '{}'", id);
        Ok(())
    }

    /// Remove a registration. Returns false if `id` was unknown.
    pub fn unregister_scene(&mut self, id: &str) -> bool {
        self.factories.remove(id).is_some()
    }

    pub fn has_scene(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn scene_count(&self) -> usize {
        self.factories.len()
    }

    /// Registered identifiers, sorted
    pub fn scene_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Instantiate and initialize `scenes`, in order.
    ///
    /// Every identifier is resolved before any scene is built, so an unknown
    /// identifier never leaves a partially mounted stage behind.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for an empty list
    /// - `MountFailed` for an identifier with no registered factory
    /// - any error raised by a factory or by `initialize`
    pub fn mount(&self, scenes: &[SceneBundleRef], surface_size: SurfaceSize) -> Result<ComposedStage> {
        if scenes.is_empty() {
            engine_bail!("glaxier::SceneManager", InvalidArgument: "nothing to mount");
        }

        let mut factories = Vec::with_capacity(scenes.len());
        for id in scenes {
            match self.factories.get(id.as_str()) {
                Some(factory) => factories.push((id, factory)),
                None => engine_bail!("glaxier::SceneManager", MountFailed: "{}", id),
            }
        }

        let regions = Viewport::bands(surface_size, factories.len());
        let mut mounted = Vec::with_capacity(factories.len());
        for ((id, factory), region) in factories.into_iter().zip(regions) {
            let mut scene = factory()?;
            let mut setup = SetupContext::new(region.size());
            scene.initialize(&mut setup)?;
            let auto_resize = setup.wants_resize();
            if auto_resize {
                if let Some(aspect) = region.size().aspect() {
                    scene.resize(aspect);
                }
            }
            mounted.push(MountedScene { id: id.clone(), scene, region, auto_resize });
        }

        engine_info!("glaxier::SceneManager", "Mounted {} scene(s): {}",
            mounted.len(),
            mounted.iter().map(|m| m.id.as_str()).collect::<Vec<_>>().join(", "));
        Ok(ComposedStage { scenes: mounted, size: surface_size, frame_index: 0 })
    }

    /// Remove all registrations
    pub fn clear(&mut self) {
        self.factories.clear();
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

/// One scene of a [`ComposedStage`]
pub struct MountedScene {
    id: SceneBundleRef,
    scene: Box<dyn SceneRender>,
    region: Viewport,
    auto_resize: bool,
}

impl MountedScene {
    pub fn id(&self) -> &SceneBundleRef {
        &self.id
    }

    pub fn scene(&self) -> &dyn SceneRender {
        self.scene.as_ref()
    }

    /// Surface band the scene draws into
    pub fn region(&self) -> Viewport {
        self.region
    }

    pub fn wants_resize(&self) -> bool {
        self.auto_resize
    }
}

/// Scenes mounted together, driven in mount order
pub struct ComposedStage {
    scenes: Vec<MountedScene>,
    size: SurfaceSize,
    frame_index: u64,
}

impl ComposedStage {
    /// Tick every scene, in mount order, each inside its own band of the
    /// shared surface. A surface whose size changed since the last resize
    /// re-lays the bands first.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface, elapsed_seconds: f64) -> Result<()> {
        let size = surface.size();
        if size != self.size {
            self.resize(size);
        }
        for mounted in &mut self.scenes {
            let mut frame = FrameContext::with_region(&mut *surface, mounted.region, self.frame_index);
            mounted.scene.tick(&mut frame, elapsed_seconds)?;
        }
        self.frame_index += 1;
        Ok(())
    }

    /// Re-lay the bands for `size` and forward each band's aspect to the
    /// scenes that asked for it. Empty sizes are ignored.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            engine_debug!("glaxier::ComposedStage", "Ignoring resize to {}x{}", size.width, size.height);
            return;
        }
        self.size = size;
        let regions = Viewport::bands(size, self.scenes.len());
        for (mounted, region) in self.scenes.iter_mut().zip(regions) {
            mounted.region = region;
            if !mounted.auto_resize {
                continue;
            }
            if let Some(aspect) = region.size().aspect() {
                mounted.scene.resize(aspect);
            }
        }
    }

    /// Bands of the surface, one per scene in mount order
    pub fn regions(&self) -> Vec<Viewport> {
        self.scenes.iter().map(|m| m.region).collect()
    }

    pub fn scenes(&self) -> &[MountedScene] {
        &self.scenes
    }

    /// Identifiers in mount order
    pub fn ids(&self) -> Vec<&SceneBundleRef> {
        self.scenes.iter().map(|m| &m.id).collect()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

#[cfg(test)]
#[path = "scene_manager_tests.rs"]
mod tests;
