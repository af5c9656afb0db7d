//! Planar and viewport types

use serde::{Deserialize, Serialize};

/// A 2D vector in normalized viewport space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Host viewport dimensions in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are finite and strictly positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-6);
        assert_eq!(b.distance_squared(&a), a.distance_squared(&b));
    }

    #[test]
    fn degenerate_sizes_not_usable() {
        assert!(PixelSize::new(800.0, 600.0).is_usable());
        assert!(!PixelSize::new(800.0, 0.0).is_usable());
        assert!(!PixelSize::new(0.0, 600.0).is_usable());
        assert!(!PixelSize::new(f32::NAN, 600.0).is_usable());
    }
}
