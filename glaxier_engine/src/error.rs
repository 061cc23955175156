//! Error types for the Glaxier engine
//!
//! This module defines the error types used throughout the engine,
//! including scene setup, composition, staging, and window management.

use std::fmt;

/// Result type for Glaxier engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Glaxier engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller passed an argument the operation cannot accept
    /// (empty scene list, unknown property, mismatched binding, ...)
    InvalidArgument(String),

    /// Writing a generated document to its staging location failed
    StagingFailed(String),

    /// The window opener refused or failed to open a window
    WindowOpenFailed(String),

    /// The scene runtime could not resolve a scene identifier
    MountFailed(String),

    /// A key (camera, helper, node) no longer resolves
    InvalidResource(String),

    /// Initialization failed (engine, singletons, scene setup)
    InitializationFailed(String),

    /// Backend-specific error (surface, poisoned lock, ...)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::StagingFailed(msg) => write!(f, "Staging failed: {}", msg),
            Error::WindowOpenFailed(msg) => write!(f, "Window open failed: {}", msg),
            Error::MountFailed(msg) => write!(f, "Scene mount failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an error, logging it through the engine logger first
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("glaxier::SceneManager", MountFailed: "unknown scene '{}'", id);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident: $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::glaxier::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function
///
/// # Example
///
/// ```ignore
/// engine_bail!("glaxier::SceneComposer", InvalidArgument: "nothing to compose");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident: $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant: $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
