//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_argument_display() {
    let err = Error::InvalidArgument("compose() needs at least one scene".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid argument"));
    assert!(display.contains("at least one scene"));
}

#[test]
fn test_staging_failed_display() {
    let err = Error::StagingFailed("disk full".to_string());
    assert_eq!(format!("{}", err), "Staging failed: disk full");
}

#[test]
fn test_window_open_failed_display() {
    let err = Error::WindowOpenFailed("no display".to_string());
    assert_eq!(format!("{}", err), "Window open failed: no display");
}

#[test]
fn test_mount_failed_display() {
    let err = Error::MountFailed("unknown scene 'nope'".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Scene mount failed"));
    assert!(display.contains("nope"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("stale camera key".to_string());
    assert!(format!("{}", err).contains("Invalid resource"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("Engine not initialized".to_string());
    assert!(format!("{}", err).contains("Initialization failed"));
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("lock poisoned".to_string());
    assert_eq!(format!("{}", err), "Backend error: lock poisoned");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidArgument("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::MountFailed("a".to_string());
    assert_eq!(err.clone(), err);
    assert_ne!(err, Error::MountFailed("b".to_string()));
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_when(fail: bool) -> Result<u32> {
    if fail {
        crate::engine_bail!("glaxier::tests", InvalidArgument: "failed with {}", 42);
    }
    Ok(7)
}

#[test]
fn test_engine_bail_returns_variant() {
    assert_eq!(bail_when(false), Ok(7));
    assert_eq!(
        bail_when(true),
        Err(Error::InvalidArgument("failed with 42".to_string()))
    );
}

#[test]
fn test_engine_err_builds_variant() {
    let err = crate::engine_err!("glaxier::tests", StagingFailed: "slot {}", "busy");
    assert_eq!(err, Error::StagingFailed("slot busy".to_string()));
}
