//! Host environment interface

use froth_core::PixelSize;
use froth_runtime::{FrameScheduler, ViewportInfo};

/// The page (or any other environment) the bubble layer lives in.
///
/// Event delivery is push-based: the host calls
/// [`BubbleController::handle_event`](crate::BubbleController::handle_event)
/// between frames once listeners are attached.
pub trait Host: FrameScheduler {
    /// Whether the container with this id exists
    fn has_mount_point(&self, id: &str) -> bool;

    /// Whether the rendering library and a drawing context are usable
    fn renderer_available(&self) -> bool;

    /// Current viewport size in CSS pixels
    fn viewport_size(&self) -> PixelSize;

    fn device_pixel_ratio(&self) -> f32;

    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the page is currently shown. Later changes arrive as
    /// `HostEvent::VisibilityChanged`.
    fn is_visible(&self) -> bool;

    /// Start forwarding resize, visibility, device-loss, and pointer signals
    fn attach_listeners(&mut self);

    /// Stop forwarding signals
    fn detach_listeners(&mut self);

    /// Snapshot of the viewport facts systems consume
    fn viewport_info(&self) -> ViewportInfo {
        ViewportInfo {
            size: self.viewport_size(),
            device_pixel_ratio: self.device_pixel_ratio(),
            reduced_motion: self.prefers_reduced_motion(),
        }
    }
}
