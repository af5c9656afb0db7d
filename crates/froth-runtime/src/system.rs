//! Runtime system trait

use froth_core::{PixelSize, Result};

/// Viewport facts a system needs when it is initialized or resized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInfo {
    /// Viewport size in CSS pixels
    pub size: PixelSize,
    /// Device pixel ratio reported by the host
    pub device_pixel_ratio: f32,
    /// Whether the environment asks for reduced motion
    pub reduced_motion: bool,
}

/// A system that can be ticked by the frame loop
///
/// `update` runs once per frame with an already clamped step. Systems never
/// see frames while the loop is paused.
pub trait RuntimeSystem {
    /// Called once when the loop starts
    fn initialize(&mut self, viewport: &ViewportInfo) -> Result<()>;

    /// Called when the viewport changes between frames
    fn resize(&mut self, viewport: &ViewportInfo) -> Result<()>;

    /// Called once per frame for variable-rate logic
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the loop is disposed; releases every held resource
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
