/// Tests for SceneDriver and Liveness

use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use crate::render::{HeadlessSurface, SurfaceCommand};
use crate::scene::{PropValue, SceneGraph};
use super::*;

/// Minimal scene recording what the host did to it
#[derive(Default)]
struct RecordingScene {
    graph: SceneGraph,
    bind_keys: bool,
    auto_resize: bool,
    initialized: u32,
    ticks: Vec<f64>,
    aspects: Vec<f32>,
    mode: f32,
}

impl RecordingScene {
    fn interactive() -> Self {
        Self { bind_keys: true, auto_resize: true, ..Self::default() }
    }
}

impl SceneRender for RecordingScene {
    fn title(&self) -> &str {
        "Recording"
    }

    fn objects(&self) -> &SceneGraph {
        &self.graph
    }

    fn initialize(&mut self, setup: &mut SetupContext) -> Result<()> {
        self.initialized += 1;
        if self.bind_keys {
            setup.key_switch(KeySwitch::new().with(KeyCode::KeyM, &[("mode", PropValue::Float(2.0))]));
        }
        if self.auto_resize {
            setup.auto_resize();
        }
        Ok(())
    }

    fn tick(&mut self, frame: &mut FrameContext<'_>, elapsed_seconds: f64) -> Result<()> {
        let region = frame.region();
        frame.surface().clear(region, [0.0; 4])?;
        self.ticks.push(elapsed_seconds);
        Ok(())
    }

    fn resize(&mut self, aspect: f32) {
        self.aspects.push(aspect);
    }

    fn exposed_properties() -> PropertyTable<Self> {
        PropertyTable::<Self>::new().with("mode", |s| PropValue::Float(s.mode), |s, v| {
            s.mode = v.as_float()?;
            Ok(())
        })
    }
}

fn driver(scene: RecordingScene) -> SceneDriver<RecordingScene, HeadlessSurface> {
    SceneDriver::new(scene, HeadlessSurface::new(SurfaceSize::new(800, 400)))
}

// ============================================================================
// Tests: Liveness
// ============================================================================

#[test]
fn test_liveness_clones_share_flag() {
    let liveness = Liveness::new();
    let clone = liveness.clone();
    assert!(clone.is_alive());
    liveness.kill();
    assert!(!clone.is_alive());
}

// ============================================================================
// Tests: Start
// ============================================================================

#[test]
fn test_start_initializes_once() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(driver.is_started());
    assert_eq!(driver.scene().initialized, 1);
    assert!(driver.start().is_err());
    assert_eq!(driver.scene().initialized, 1);
}

#[test]
fn test_start_applies_initial_aspect() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert_eq!(driver.scene().aspects, vec![2.0]);
}

#[test]
fn test_tick_before_start_fails() {
    let mut driver = driver(RecordingScene::default());
    assert!(driver.tick(0.0).is_err());
}

// ============================================================================
// Tests: Tick and teardown
// ============================================================================

#[test]
fn test_tick_advances_scene() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    assert!(driver.tick(0.5).unwrap());
    assert!(driver.tick(1.0).unwrap());
    assert_eq!(driver.scene().ticks, vec![0.5, 1.0]);
    assert_eq!(driver.frame_count(), 2);
    assert_eq!(driver.surface().commands().len(), 2);
}

#[test]
fn test_surface_recorder_can_be_drained_between_ticks() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    for frame in 0..10 {
        driver.tick(frame as f64).unwrap();
        assert_eq!(driver.surface_mut().take_commands().len(), 1);
    }
    assert!(driver.surface().commands().is_empty());
}

#[test]
fn test_tick_after_teardown_is_noop() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    driver.tick(0.0).unwrap();
    driver.teardown();

    assert!(!driver.tick(1.0).unwrap());
    assert_eq!(driver.scene().ticks.len(), 1);
    assert!(!driver.liveness().is_alive());
}

#[test]
fn test_teardown_through_liveness_clone() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    let handle = driver.liveness();
    handle.kill();
    assert!(!driver.tick(0.0).unwrap());
    assert!(driver.scene().ticks.is_empty());
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_notifies_auto_resize_scene() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(driver.resize(PhysicalSize::new(900, 300)));
    assert_eq!(driver.scene().aspects, vec![2.0, 3.0]);
    assert_eq!(driver.surface().size(), SurfaceSize::new(900, 300));
}

#[test]
fn test_resize_skips_scene_without_auto_resize() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    assert!(driver.resize(PhysicalSize::new(900, 300)));
    assert!(driver.scene().aspects.is_empty());
    assert_eq!(driver.surface().commands(), &[SurfaceCommand::Resize(SurfaceSize::new(900, 300))]);
}

#[test]
fn test_resize_ignores_zero_size() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(!driver.resize(PhysicalSize::new(0, 300)));
    assert_eq!(driver.surface().size(), SurfaceSize::new(800, 400));
    assert_eq!(driver.scene().aspects, vec![2.0]);
}

#[test]
fn test_window_resized_event_routes_to_resize() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    let consumed = driver.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(400, 400))).unwrap();
    assert!(consumed);
    assert_eq!(driver.scene().aspects.last(), Some(&1.0));
}

#[test]
fn test_other_window_events_are_ignored() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(!driver.handle_window_event(&WindowEvent::Focused(true)).unwrap());
}

// ============================================================================
// Tests: Keys
// ============================================================================

#[test]
fn test_key_applies_switch() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(driver.key(KeyCode::KeyM).unwrap());
    assert_eq!(driver.scene().mode, 2.0);
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    assert!(!driver.key(KeyCode::KeyQ).unwrap());
    assert_eq!(driver.scene().mode, 0.0);
}

#[test]
fn test_key_without_switch_is_ignored() {
    let mut driver = driver(RecordingScene::default());
    driver.start().unwrap();
    assert!(!driver.key(KeyCode::KeyM).unwrap());
}

#[test]
fn test_key_after_teardown_is_ignored() {
    let mut driver = driver(RecordingScene::interactive());
    driver.start().unwrap();
    driver.teardown();
    assert!(!driver.key(KeyCode::KeyM).unwrap());
    assert_eq!(driver.scene().mode, 0.0);
}
