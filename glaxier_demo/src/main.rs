//! Headless driver for the Glaxier demo scenes.
//!
//! Runs the dual-camera scene for a fixed number of frames, toggling the
//! rig between its perspective and orthographic camera. With `--compose`,
//! also builds a composed document for the given scene identifiers, stages
//! it, opens the "composed" window and mounts the scenes on one stage.

use std::path::PathBuf;

use clap::Parser;
use glaxier_engine::glaxier::compose::{FileStager, SceneBundleRef, SceneComposer, WindowRegistry};
use glaxier_engine::glaxier::render::{HeadlessSurface, SurfaceCommand, SurfaceSize};
use glaxier_engine::glaxier::scene::{SceneDriver, SceneRender};
use glaxier_engine::glaxier::scenes::CamerasScene;
use glaxier_engine::glaxier::{Engine, Result};
use glaxier_engine::{engine_error, engine_info};
use winit::keyboard::KeyCode;

const FRAME_SECONDS: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "glaxier_demo", about = "Run Glaxier demo scenes headless")]
struct Args {
    /// Number of frames to render
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Surface width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Frames between camera switches
    #[arg(long, default_value_t = 60)]
    switch_every: u64,

    /// Scene identifiers to compose into one window, in order
    #[arg(long, num_args = 1..)]
    compose: Vec<String>,

    /// Directory for the staged document (defaults to the temp dir)
    #[arg(long)]
    staging_dir: Option<PathBuf>,
}

/// Drain the recorder, returning how many render passes it held
fn drain_renders(surface: &mut HeadlessSurface) -> usize {
    surface
        .take_commands()
        .iter()
        .filter(|c| matches!(c, SurfaceCommand::Render { .. }))
        .count()
}

/// Tick `frames` frames, toggling the rig every `switch_every` frames.
/// Returns the number of render passes drawn.
fn drive_cameras(
    driver: &mut SceneDriver<CamerasScene, HeadlessSurface>,
    frames: u64,
    switch_every: u64,
) -> Result<usize> {
    let mut ortho = false;
    let mut passes = 0;
    for frame in 0..frames {
        if switch_every > 0 && frame > 0 && frame % switch_every == 0 {
            ortho = !ortho;
            let key = if ortho { KeyCode::KeyO } else { KeyCode::KeyP };
            driver.key(key)?;
        }
        driver.tick(frame as f64 * FRAME_SECONDS)?;
        passes += drain_renders(driver.surface_mut());
    }
    Ok(passes)
}

fn run_cameras(args: &Args) -> Result<()> {
    let size = SurfaceSize::new(args.width, args.height);
    let mut driver = SceneDriver::new(CamerasScene::new(), HeadlessSurface::new(size));
    driver.start()?;

    let passes = drive_cameras(&mut driver, args.frames, args.switch_every)?;

    if let Some(report) = driver.scene().last_report() {
        engine_info!("glaxier_demo", "Rendered {} frames ({} passes), last frame {} (fell back: {})",
            driver.frame_count(), passes, report.frame_index, report.fell_back);
    }
    driver.teardown();
    Ok(())
}

fn run_composed(args: &Args) -> Result<()> {
    let stager = match &args.staging_dir {
        Some(dir) => FileStager::new(dir.clone()),
        None => FileStager::in_temp_dir(),
    };
    let mut composer = SceneComposer::new(stager, WindowRegistry::new());

    let scenes: Vec<SceneBundleRef> = args.compose.iter().map(SceneBundleRef::new).collect();
    let composition = composer.compose(&scenes)?;
    println!("{}", composition.staged.src());

    Engine::create_scene_manager()?;
    let manager = Engine::scene_manager()?;
    let mut stage = {
        let mut manager = manager
            .lock()
            .map_err(|_| glaxier_engine::glaxier::Error::BackendError("scene manager lock poisoned".into()))?;
        manager.register_scene("cameras", || Ok(Box::new(CamerasScene::new()) as Box<dyn SceneRender>))?;
        manager.mount(composition.document.scenes(), SurfaceSize::new(args.width, args.height))?
    };

    let mut surface = HeadlessSurface::new(SurfaceSize::new(args.width, args.height));
    let mut passes = 0;
    for frame in 0..args.frames {
        stage.tick(&mut surface, frame as f64 * FRAME_SECONDS)?;
        passes += drain_renders(&mut surface);
    }
    engine_info!("glaxier_demo", "Composed stage ran {} frames over {} scenes ({} passes)",
        stage.frame_count(), stage.len(), passes);

    Engine::destroy_scene_manager()?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    Engine::initialize()?;
    run_cameras(args)?;
    if !args.compose.is_empty() {
        run_composed(args)?;
    }
    Engine::shutdown();
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(error) = run(&args) {
        engine_error!("glaxier_demo", "{}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
