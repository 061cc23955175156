/// Tests for SceneManager and ComposedStage
///
/// These tests validate registration, mount ordering, mount failure,
/// and how a stage drives its scenes.

use std::sync::{Arc, Mutex};
use crate::error::Error;
use crate::render::{HeadlessSurface, SurfaceCommand};
use crate::scene::{PropertyTable, SceneGraph};
use crate::scenes::{CamerasConfig, CamerasScene};
use super::*;

type TickLog = Arc<Mutex<Vec<String>>>;

struct TaggedScene {
    tag: String,
    graph: SceneGraph,
    log: TickLog,
    auto_resize: bool,
    aspects: Vec<f32>,
}

impl SceneRender for TaggedScene {
    fn title(&self) -> &str {
        &self.tag
    }

    fn objects(&self) -> &SceneGraph {
        &self.graph
    }

    fn initialize(&mut self, setup: &mut SetupContext) -> Result<()> {
        if self.auto_resize {
            setup.auto_resize();
        }
        Ok(())
    }

    fn tick(&mut self, frame: &mut FrameContext<'_>, _elapsed_seconds: f64) -> Result<()> {
        self.log.lock().unwrap().push(format!("{}#{}", self.tag, frame.frame_index()));
        Ok(())
    }

    fn resize(&mut self, aspect: f32) {
        self.aspects.push(aspect);
    }

    fn exposed_properties() -> PropertyTable<Self> {
        PropertyTable::<Self>::new()
    }
}

fn register(sm: &mut SceneManager, id: &'static str, log: &TickLog, auto_resize: bool) {
    let log = Arc::clone(log);
    sm.register_scene(id, move || {
        Ok(Box::new(TaggedScene {
            tag: id.to_string(),
            graph: SceneGraph::new(),
            log: Arc::clone(&log),
            auto_resize,
            aspects: Vec::new(),
        }) as Box<dyn SceneRender>)
    }).unwrap();
}

fn ids(list: &[&str]) -> Vec<SceneBundleRef> {
    list.iter().map(|id| SceneBundleRef::from(*id)).collect()
}

fn manager(log: &TickLog) -> SceneManager {
    let mut sm = SceneManager::new();
    register(&mut sm, "a", log, false);
    register(&mut sm, "b", log, true);
    register(&mut sm, "c", log, false);
    sm
}

const SIZE: SurfaceSize = SurfaceSize { width: 800, height: 400 };

// ============================================================================
// Tests: Registration
// ============================================================================

#[test]
fn test_scene_manager_new() {
    let sm = SceneManager::new();
    assert_eq!(sm.scene_count(), 0);
}

#[test]
fn test_register_scene() {
    let log = TickLog::default();
    let sm = manager(&log);
    assert_eq!(sm.scene_count(), 3);
    assert!(sm.has_scene("b"));
    assert_eq!(sm.scene_ids(), vec!["a", "b", "c"]);
}

#[test]
fn test_register_duplicate_fails() {
    let log = TickLog::default();
    let mut sm = manager(&log);
    let result = sm.register_scene("a", || Err(Error::InvalidArgument("unused".to_string())));
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(sm.scene_count(), 3);
}

#[test]
fn test_unregister_scene() {
    let log = TickLog::default();
    let mut sm = manager(&log);
    assert!(sm.unregister_scene("a"));
    assert!(!sm.unregister_scene("a"));
    assert_eq!(sm.scene_count(), 2);
}

#[test]
fn test_clear() {
    let log = TickLog::default();
    let mut sm = manager(&log);
    sm.clear();
    assert_eq!(sm.scene_count(), 0);
}

// ============================================================================
// Tests: Mount
// ============================================================================

#[test]
fn test_mount_preserves_order() {
    let log = TickLog::default();
    let sm = manager(&log);
    let stage = sm.mount(&ids(&["c", "a", "b"]), SIZE).unwrap();

    let mounted: Vec<&str> = stage.ids().iter().map(|id| id.as_str()).collect();
    assert_eq!(mounted, vec!["c", "a", "b"]);
    assert_eq!(stage.len(), 3);
}

#[test]
fn test_mount_same_scene_twice() {
    let log = TickLog::default();
    let sm = manager(&log);
    let stage = sm.mount(&ids(&["a", "a"]), SIZE).unwrap();
    assert_eq!(stage.len(), 2);
}

#[test]
fn test_mount_unknown_scene_fails() {
    let log = TickLog::default();
    let sm = manager(&log);
    let result = sm.mount(&ids(&["a", "missing", "b"]), SIZE);
    match result {
        Err(Error::MountFailed(id)) => assert_eq!(id, "missing"),
        _ => panic!("expected MountFailed"),
    }
}

#[test]
fn test_mount_empty_fails() {
    let log = TickLog::default();
    let sm = manager(&log);
    assert!(matches!(sm.mount(&[], SIZE), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_mount_propagates_factory_error() {
    let mut sm = SceneManager::new();
    sm.register_scene("broken", || Err(Error::InitializationFailed("no assets".to_string()))).unwrap();
    assert!(matches!(
        sm.mount(&ids(&["broken"]), SIZE),
        Err(Error::InitializationFailed(_))
    ));
}

#[test]
fn test_mount_records_resize_interest() {
    let log = TickLog::default();
    let sm = manager(&log);
    let stage = sm.mount(&ids(&["a", "b"]), SIZE).unwrap();
    assert!(!stage.scenes()[0].wants_resize());
    assert!(stage.scenes()[1].wants_resize());
}

// ============================================================================
// Tests: Stage
// ============================================================================

#[test]
fn test_stage_ticks_in_mount_order() {
    let log = TickLog::default();
    let sm = manager(&log);
    let mut stage = sm.mount(&ids(&["b", "c", "a"]), SIZE).unwrap();
    let mut surface = HeadlessSurface::new(SIZE);

    stage.tick(&mut surface, 0.0).unwrap();
    stage.tick(&mut surface, 0.1).unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["b#0", "c#0", "a#0", "b#1", "c#1", "a#1"]);
    assert_eq!(stage.frame_count(), 2);
}

#[test]
fn test_stage_scene_titles() {
    let log = TickLog::default();
    let sm = manager(&log);
    let stage = sm.mount(&ids(&["a", "c"]), SIZE).unwrap();
    let titles: Vec<&str> = stage.scenes().iter().map(|m| m.scene().title()).collect();
    assert_eq!(titles, vec!["a", "c"]);
}

// ============================================================================
// Tests: Regions
// ============================================================================

fn cameras_manager() -> SceneManager {
    let mut sm = SceneManager::new();
    sm.register_scene("cameras", || {
        let config = CamerasConfig { particle_count: 32, ..CamerasConfig::default() };
        Ok(Box::new(CamerasScene::with_config(config)) as Box<dyn SceneRender>)
    }).unwrap();
    sm
}

#[test]
fn test_mount_assigns_disjoint_bands() {
    let log = TickLog::default();
    let sm = manager(&log);
    let stage = sm.mount(&ids(&["a", "b", "c"]), SIZE).unwrap();
    let regions = stage.regions();

    assert_eq!(regions.len(), 3);
    for (i, region) in regions.iter().enumerate() {
        assert!(region.fits(SIZE));
        assert!(!region.is_empty());
        for other in &regions[i + 1..] {
            assert!(!region.overlaps(other));
        }
    }
    let covered: f32 = regions.iter().map(|r| r.height).sum();
    assert_eq!(covered, SIZE.height as f32);
}

#[test]
fn test_stage_scenes_draw_inside_their_own_band() {
    let sm = cameras_manager();
    let size = SurfaceSize::new(800, 600);
    let mut stage = sm.mount(&ids(&["cameras", "cameras"]), size).unwrap();
    let mut surface = HeadlessSurface::new(size);

    stage.tick(&mut surface, 0.5).unwrap();

    let bands = stage.regions();
    assert_eq!(bands, vec![
        Viewport::new(0.0, 0.0, 800.0, 300.0),
        Viewport::new(0.0, 300.0, 800.0, 300.0),
    ]);

    // Each scene clears only its own band, so the first one stays drawn
    let cleared: Vec<Viewport> = surface.cleared_regions().collect();
    assert_eq!(cleared, bands);

    let viewports: Vec<Viewport> = surface
        .renders()
        .map(|c| match c {
            SurfaceCommand::Render { viewport, .. } => *viewport,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(viewports.len(), 4);
    for (index, viewport) in viewports.iter().enumerate() {
        let band = bands[index / 2];
        assert!(viewport.y >= band.y && viewport.y + viewport.height <= band.y + band.height);
        assert!(!viewport.overlaps(&bands[1 - index / 2]));
    }
}

#[test]
fn test_stage_follows_surface_resize() {
    let sm = cameras_manager();
    let mut stage = sm.mount(&ids(&["cameras", "cameras"]), SurfaceSize::new(800, 600)).unwrap();
    let mut surface = HeadlessSurface::new(SurfaceSize::new(1000, 400));

    stage.tick(&mut surface, 0.0).unwrap();

    assert_eq!(stage.regions()[1], Viewport::new(0.0, 200.0, 1000.0, 200.0));
    assert!(surface.cleared_regions().all(|r| r.fits(SurfaceSize::new(1000, 400))));
}

#[test]
fn test_stage_resize_ignores_empty_size() {
    let log = TickLog::default();
    let sm = manager(&log);
    let mut stage = sm.mount(&ids(&["a", "b"]), SIZE).unwrap();
    let before = stage.regions();
    stage.resize(SurfaceSize::new(0, 0));
    assert_eq!(stage.regions(), before);
}
