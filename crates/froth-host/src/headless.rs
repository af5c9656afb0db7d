//! In-memory host and renderer for tools and tests

use crate::controller::BubbleController;
use crate::host::Host;
use froth_core::PixelSize;
use froth_particles::{BubbleRenderer, FrameData};
use froth_runtime::{FrameHandle, FrameScheduler, ManualScheduler};
use std::collections::HashSet;

/// A host with no page behind it. Frames fire only when the owner fires them.
pub struct HeadlessHost {
    pub size: PixelSize,
    pub device_pixel_ratio: f32,
    pub reduced_motion: bool,
    pub renderer_available: bool,
    pub visible: bool,
    mount_points: HashSet<String>,
    scheduler: ManualScheduler,
    listeners_attached: bool,
    attach_calls: u32,
    detach_calls: u32,
}

impl HeadlessHost {
    /// Host with a 1280x720 viewport exposing the given mount point
    pub fn new(mount_id: &str) -> Self {
        let mut mount_points = HashSet::new();
        mount_points.insert(mount_id.to_string());
        Self {
            size: PixelSize::new(1280.0, 720.0),
            device_pixel_ratio: 1.0,
            reduced_motion: false,
            renderer_available: true,
            visible: true,
            mount_points,
            scheduler: ManualScheduler::new(),
            listeners_attached: false,
            attach_calls: 0,
            detach_calls: 0,
        }
    }

    /// Host whose page has no mount point at all
    pub fn without_mount() -> Self {
        let mut host = Self::new("");
        host.mount_points.clear();
        host
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = PixelSize::new(width, height);
        self
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    /// Remove and return every pending frame request
    pub fn take_pending_frames(&mut self) -> Vec<FrameHandle> {
        self.scheduler.take_pending()
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners_attached
    }

    pub fn attach_calls(&self) -> u32 {
        self.attach_calls
    }

    pub fn detach_calls(&self) -> u32 {
        self.detach_calls
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.scheduler.request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.scheduler.cancel_frame(handle);
    }
}

impl Host for HeadlessHost {
    fn has_mount_point(&self, id: &str) -> bool {
        self.mount_points.contains(id)
    }

    fn renderer_available(&self) -> bool {
        self.renderer_available
    }

    fn viewport_size(&self) -> PixelSize {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn attach_listeners(&mut self) {
        self.listeners_attached = true;
        self.attach_calls += 1;
    }

    fn detach_listeners(&mut self) {
        self.listeners_attached = false;
        self.detach_calls += 1;
    }
}

/// Renderer that records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub draws: u64,
    pub last_instance_count: usize,
    pub peak_instance_count: usize,
    pub pops_drawn: usize,
    pub last_size: Option<PixelSize>,
    pub last_pixel_ratio: f32,
    pub resize_calls: u32,
    pub release_calls: u32,
}

impl BubbleRenderer for RecordingRenderer {
    fn resize(&mut self, size: PixelSize, pixel_ratio: f32) {
        self.last_size = Some(size);
        self.last_pixel_ratio = pixel_ratio;
        self.resize_calls += 1;
    }

    fn draw(&mut self, frame: &FrameData<'_>) {
        self.draws += 1;
        self.last_instance_count = frame.instances.len();
        self.peak_instance_count = self.peak_instance_count.max(frame.instances.len());
        self.pops_drawn += frame.pops.len();
    }

    fn release(&mut self) {
        self.release_calls += 1;
    }
}

/// Fire every frame the headless host has pending at time `now` (seconds).
/// Returns how many frames were actually drawn.
pub fn run_pending_frames<R: BubbleRenderer>(
    controller: &mut BubbleController<HeadlessHost, R>,
    now: f64,
) -> usize {
    let pending = controller.host_mut().take_pending_frames();
    pending
        .into_iter()
        .filter(|handle| controller.on_frame(*handle, now))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_host_reports_mounts() {
        let host = HeadlessHost::new("bg3d");
        assert!(host.has_mount_point("bg3d"));
        assert!(!host.has_mount_point("other"));
        assert!(!HeadlessHost::without_mount().has_mount_point("bg3d"));
    }

    #[test]
    fn headless_host_visible_by_default() {
        let mut host = HeadlessHost::new("bg3d");
        assert!(host.is_visible());
        host.visible = false;
        assert!(!host.is_visible());
    }

    #[test]
    fn headless_host_tracks_listeners() {
        let mut host = HeadlessHost::new("bg3d");
        host.attach_listeners();
        assert!(host.listeners_attached());
        host.detach_listeners();
        assert!(!host.listeners_attached());
        assert_eq!(host.attach_calls(), 1);
        assert_eq!(host.detach_calls(), 1);
    }

    #[test]
    fn viewport_info_reflects_host() {
        let mut host = HeadlessHost::new("bg3d").with_size(390.0, 844.0);
        host.device_pixel_ratio = 3.0;
        host.reduced_motion = true;
        let info = host.viewport_info();
        assert_eq!(info.size, PixelSize::new(390.0, 844.0));
        assert_eq!(info.device_pixel_ratio, 3.0);
        assert!(info.reduced_motion);
    }
}
