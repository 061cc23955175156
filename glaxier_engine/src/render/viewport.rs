/// Surface sizes, viewports, and the fixed two-way split used by the
/// dual-viewport loop.

use winit::dpi::PhysicalSize;

/// Output surface size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-sized surface (minimized window) must not reach the cameras
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. `None` for an empty surface.
    pub fn aspect(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

impl From<PhysicalSize<u32>> for SurfaceSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, min_depth: 0.0, max_depth: 1.0 }
    }

    /// Viewport covering the whole surface
    pub fn full(size: SurfaceSize) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 { self.width / self.height } else { 0.0 }
    }

    /// Nothing can be drawn into a viewport without area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Pixel size of the viewport, rounded down
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width.max(0.0) as u32, self.height.max(0.0) as u32)
    }

    /// Split a surface into `count` full-width horizontal bands, top to bottom.
    ///
    /// Bands never overlap; the last band absorbs the rounding remainder.
    pub fn bands(size: SurfaceSize, count: usize) -> Vec<Viewport> {
        if count == 0 {
            return Vec::new();
        }
        let band = size.height / count as u32;
        (0..count as u32)
            .map(|index| {
                let y = band * index;
                let height = if index + 1 == count as u32 { size.height - y } else { band };
                Viewport::new(0.0, y as f32, size.width as f32, height as f32)
            })
            .collect()
    }

    /// Whether two viewports share any area
    pub fn overlaps(&self, other: &Viewport) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Whether the viewport lies entirely inside a surface of `size`
    pub fn fits(&self, size: SurfaceSize) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= size.width as f32
            && self.y + self.height <= size.height as f32
    }
}

/// Left/right halves of a surface region.
///
/// Left renders the fixed observer, right renders the active rig camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSplit {
    pub left: Viewport,
    pub right: Viewport,
}

impl ViewportSplit {
    pub fn from_size(size: SurfaceSize) -> Self {
        Self::from_region(Viewport::full(size))
    }

    pub fn from_region(region: Viewport) -> Self {
        let half = region.width * 0.5;
        Self {
            left: Viewport::new(region.x, region.y, half, region.height),
            right: Viewport::new(region.x + half, region.y, half, region.height),
        }
    }
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
