use crate::compose::{MemoryStager, WindowRegistry};
use crate::error::Error;
use super::*;

fn refs(ids: &[&str]) -> Vec<SceneBundleRef> {
    ids.iter().map(|id| SceneBundleRef::from(*id)).collect()
}

fn composer() -> SceneComposer<MemoryStager, WindowRegistry> {
    SceneComposer::new(MemoryStager::new(), WindowRegistry::new())
}

/// Opener that always refuses
struct RefusingOpener;

impl WindowOpener for RefusingOpener {
    fn open(&mut self, request: WindowRequest) -> Result<WindowId> {
        Err(Error::WindowOpenFailed(request.name))
    }
}

// ============================================================================
// Compose
// ============================================================================

#[test]
fn test_compose_stages_and_opens() {
    let mut composer = composer();
    let composition = composer.compose(&refs(&["a", "b"])).unwrap();

    assert_eq!(composition.document.instruction(), "$scene = Scenes.compose('a', 'b')");
    assert_eq!(composition.staged.src(), composer.stager().staging_file());
    assert_eq!(composer.stager().contents().unwrap(), composition.document.markup());

    let window = composer.opener().window("composed").unwrap();
    assert_eq!(window.id(), composition.window);
    assert_eq!(window.src(), composition.staged.src());
}

#[test]
fn test_compose_rejects_empty_before_staging() {
    let mut composer = composer();
    let result = composer.compose(&[]);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(composer.stager().write_count(), 0);
    assert_eq!(composer.opener().window_count(), 0);
}

#[test]
fn test_compose_twice_reuses_window() {
    let mut composer = composer();
    let first = composer.compose(&refs(&["a"])).unwrap();
    let second = composer.compose(&refs(&["b", "c"])).unwrap();

    assert_eq!(first.window, second.window);
    assert_eq!(composer.opener().window_count(), 1);
    assert_eq!(composer.opener().window("composed").unwrap().loads(), 2);
    assert!(composer.stager().contents().unwrap().contains("Scenes.compose('b', 'c')"));
}

#[test]
fn test_compose_does_not_validate_identifiers() {
    let mut composer = composer();
    assert!(composer.compose(&refs(&["no-such-scene"])).is_ok());
}

#[test]
fn test_compose_surfaces_window_failure() {
    let stager = MemoryStager::new();
    let mut composer = SceneComposer::new(stager.clone(), RefusingOpener);
    let result = composer.compose(&refs(&["a"]));

    assert!(matches!(result, Err(Error::WindowOpenFailed(_))));
    // Staging already happened
    assert_eq!(stager.write_count(), 1);
}

#[test]
fn test_compose_custom_window_name() {
    let config = ComposerConfig { window_name: "gallery".to_string(), ..ComposerConfig::default() };
    let mut composer = SceneComposer::with_config(config, MemoryStager::new(), WindowRegistry::new());
    composer.compose(&refs(&["a"])).unwrap();
    assert!(composer.opener().window("gallery").is_some());
    assert!(composer.opener().window("composed").is_none());
}
