//! Normalized viewport space
//!
//! Height always spans [-1, 1]; width spans [-aspect, aspect]. Spawn and
//! expiry logic only ever sees these bounds, never pixels.

use froth_core::{PixelSize, Vec2};

/// Half-extents of normalized viewport space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            half_height: 1.0,
        }
    }
}

impl ViewportBounds {
    /// True when `(x, y)` lies within the bounds grown by `margin` on every side
    pub fn contains(&self, x: f32, y: f32, margin: f32) -> bool {
        x.abs() <= self.half_width + margin && y.abs() <= self.half_height + margin
    }
}

/// Tracks the host viewport and its normalized bounds
#[derive(Debug, Clone)]
pub struct ViewportModel {
    bounds: ViewportBounds,
    size: PixelSize,
}

impl Default for ViewportModel {
    fn default() -> Self {
        Self {
            bounds: ViewportBounds::default(),
            size: PixelSize::new(1.0, 1.0),
        }
    }
}

impl ViewportModel {
    pub fn new(size: PixelSize) -> Self {
        let mut model = Self::default();
        model.recompute(size);
        model
    }

    pub fn bounds(&self) -> ViewportBounds {
        self.bounds
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Recompute bounds from pixel dimensions. Degenerate sizes (zero or
    /// non-finite) keep the previous bounds. Returns whether anything changed.
    pub fn recompute(&mut self, size: PixelSize) -> bool {
        if !size.is_usable() {
            tracing::debug!(
                width = size.width,
                height = size.height,
                "ignoring degenerate viewport size"
            );
            return false;
        }
        let bounds = ViewportBounds {
            half_width: size.width / size.height,
            half_height: 1.0,
        };
        let changed = bounds != self.bounds || size != self.size;
        self.bounds = bounds;
        self.size = size;
        changed
    }

    /// Project a CSS pixel coordinate (origin top-left, y down) into
    /// normalized viewport space (origin centre, y up).
    pub fn to_normalized(&self, px: f32, py: f32) -> Vec2 {
        let nx = 2.0 * px / self.size.width - 1.0;
        let ny = 1.0 - 2.0 * py / self.size.height;
        Vec2::new(nx * self.bounds.half_width, ny * self.bounds.half_height)
    }
}
