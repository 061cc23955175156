/// Glaxier Engine - Singleton manager for engine subsystems
///
/// Holds the global logger and the scene runtime shared by composed
/// documents. Storage is thread-safe static state guarded by RwLocks.

use std::sync::{Arc, Mutex, OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::scene::SceneManager;

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Scene runtime singleton
    scene_manager: RwLock<Option<Arc<Mutex<SceneManager>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            scene_manager: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```no_run
/// use glaxier_engine::glaxier::Engine;
///
/// Engine::initialize()?;
/// Engine::create_scene_manager()?;
///
/// let scenes = Engine::scene_manager()?;
/// // Register scenes, mount composed documents...
///
/// Engine::shutdown();
/// # Ok::<(), glaxier_engine::glaxier::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Log an error before returning it (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("glaxier::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| Self::log_and_return_error(
            Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
        ))
    }

    /// Initialize the engine
    ///
    /// Must be called once at startup, before creating any subsystem.
    /// Calling it again is harmless.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Destroy all singletons
    ///
    /// The engine stays initialized; subsystems can be created again.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut sm) = state.scene_manager.write() {
                *sm = None;
            }
        }
    }

    // ===== SCENE MANAGER API =====

    /// Create and register the scene manager singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A scene manager already exists
    pub fn create_scene_manager() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.scene_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("SceneManager already exists. Call Engine::destroy_scene_manager() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(SceneManager::new())));

        crate::engine_info!("glaxier::Engine", "SceneManager singleton created successfully");

        Ok(())
    }

    /// Get the scene manager singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The scene manager has not been created
    pub fn scene_manager() -> Result<Arc<Mutex<SceneManager>>> {
        let state = Self::state()?;

        let lock = state.scene_manager.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("SceneManager not created. Call Engine::create_scene_manager() first.".to_string())
            ))
    }

    /// Destroy the scene manager singleton
    ///
    /// Existing references stay valid until dropped.
    pub fn destroy_scene_manager() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.scene_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("glaxier::Engine", "SceneManager singleton destroyed");

        Ok(())
    }

    /// Reset all singletons (test builds and integration tests)
    #[doc(hidden)]
    pub fn reset_for_testing() {
        Self::shutdown();
    }

    // ===== LOGGING API =====

    /// Replace the default logger (file logger, capture logger, ...)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use glaxier_engine::glaxier::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to the default console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! macro.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
