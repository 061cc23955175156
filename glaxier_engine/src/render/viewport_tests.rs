use super::*;

// ============================================================================
// SurfaceSize
// ============================================================================

#[test]
fn test_surface_size_aspect() {
    assert_eq!(SurfaceSize::new(1600, 800).aspect(), Some(2.0));
    assert_eq!(SurfaceSize::new(0, 800).aspect(), None);
    assert!(SurfaceSize::new(800, 0).is_empty());
}

#[test]
fn test_surface_size_from_physical_size() {
    let size: SurfaceSize = PhysicalSize::new(1280u32, 720u32).into();
    assert_eq!(size, SurfaceSize::new(1280, 720));
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_viewport_full() {
    let vp = Viewport::full(SurfaceSize::new(1920, 1080));
    assert_eq!(vp.width, 1920.0);
    assert_eq!(vp.height, 1080.0);
    assert_eq!(vp.min_depth, 0.0);
    assert_eq!(vp.max_depth, 1.0);
}

#[test]
fn test_viewport_fits() {
    let size = SurfaceSize::new(800, 600);
    assert!(Viewport::new(400.0, 0.0, 400.0, 600.0).fits(size));
    assert!(!Viewport::new(401.0, 0.0, 400.0, 600.0).fits(size));
    assert!(!Viewport::new(-1.0, 0.0, 10.0, 10.0).fits(size));
}

#[test]
fn test_viewport_bands_tile_surface() {
    let size = SurfaceSize::new(800, 601);
    let bands = Viewport::bands(size, 3);

    assert_eq!(bands.len(), 3);
    assert_eq!(bands[0], Viewport::new(0.0, 0.0, 800.0, 200.0));
    assert_eq!(bands[1], Viewport::new(0.0, 200.0, 800.0, 200.0));
    assert_eq!(bands[2], Viewport::new(0.0, 400.0, 800.0, 201.0));
    assert!(bands.iter().all(|b| b.fits(size)));
    assert!(!bands[0].overlaps(&bands[1]));
    assert!(!bands[1].overlaps(&bands[2]));
}

#[test]
fn test_viewport_bands_empty_count() {
    assert!(Viewport::bands(SurfaceSize::new(800, 600), 0).is_empty());
}

#[test]
fn test_viewport_overlaps_and_empty() {
    let a = Viewport::new(0.0, 0.0, 100.0, 100.0);
    assert!(a.overlaps(&Viewport::new(50.0, 50.0, 100.0, 100.0)));
    assert!(!a.overlaps(&Viewport::new(100.0, 0.0, 100.0, 100.0)));
    assert!(Viewport::new(0.0, 0.0, 0.0, 10.0).is_empty());
    assert_eq!(Viewport::new(0.0, 0.0, 400.5, 300.0).size(), SurfaceSize::new(400, 300));
}

// ============================================================================
// ViewportSplit
// ============================================================================

#[test]
fn test_split_halves_surface() {
    let split = ViewportSplit::from_size(SurfaceSize::new(1600, 900));

    assert_eq!(split.left, Viewport::new(0.0, 0.0, 800.0, 900.0));
    assert_eq!(split.right, Viewport::new(800.0, 0.0, 800.0, 900.0));
}

#[test]
fn test_split_aspect_is_half_surface_aspect() {
    let size = SurfaceSize::new(1000, 500);
    let split = ViewportSplit::from_size(size);

    assert!((split.left.aspect() - 0.5 * size.aspect().unwrap()).abs() < 1e-6);
    assert!((split.right.aspect() - split.left.aspect()).abs() < 1e-6);
}

#[test]
fn test_split_odd_width_covers_surface() {
    let size = SurfaceSize::new(801, 600);
    let split = ViewportSplit::from_size(size);

    assert!(split.left.fits(size));
    assert!(split.right.fits(size));
    assert_eq!(split.left.width + split.right.width, 801.0);
}

#[test]
fn test_split_region_stays_inside_region() {
    let region = Viewport::new(0.0, 300.0, 800.0, 300.0);
    let split = ViewportSplit::from_region(region);

    assert_eq!(split.left, Viewport::new(0.0, 300.0, 400.0, 300.0));
    assert_eq!(split.right, Viewport::new(400.0, 300.0, 400.0, 300.0));
}
