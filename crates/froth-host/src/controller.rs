//! Runtime controller: owns the frame loop for one mounted bubble layer.
//!
//! All mutation happens either inside [`BubbleController::on_frame`] or inside
//! an event handler; the host never runs the two concurrently. Pausing and
//! disposing invalidate the scheduled frame handle, so a callback that was
//! already queued is ignored when it arrives.

use crate::host::Host;
use crate::mount::{MountGuard, MountRegistry};
use froth_core::PixelSize;
use froth_particles::{BubbleRenderer, BubbleSystem};
use froth_runtime::{
    EventBus, FrameClock, FrameHandle, HostEvent, PauseReason, RunState, RunStateMachine,
    RuntimeSystem, ViewportInfo,
};

/// Orientation changes report stale dimensions for a moment; the viewport is
/// re-read once the settle delay has passed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OrientationSettle {
    Idle,
    /// Deadline is fixed on the next frame
    Requested,
    Until(f64),
}

pub struct BubbleController<H: Host, R: BubbleRenderer> {
    host: H,
    renderer: R,
    system: BubbleSystem,
    registry: MountRegistry,
    mount: Option<MountGuard>,
    state: RunStateMachine,
    clock: FrameClock,
    frame: Option<FrameHandle>,
    orientation: OrientationSettle,
    listeners_attached: bool,
    renderer_released: bool,
    hidden: bool,
    frames_drawn: u64,
}

impl<H: Host, R: BubbleRenderer> BubbleController<H, R> {
    pub fn new(host: H, renderer: R, system: BubbleSystem, registry: MountRegistry) -> Self {
        let clock = FrameClock::with_max_step(system.config().max_dt as f64);
        Self {
            host,
            renderer,
            system,
            registry,
            mount: None,
            state: RunStateMachine::new(),
            clock,
            frame: None,
            orientation: OrientationSettle::Idle,
            listeners_attached: false,
            renderer_released: false,
            hidden: false,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state.state()
    }

    pub fn system(&self) -> &BubbleSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut BubbleSystem {
        &mut self.system
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Handle of the frame currently scheduled, if any
    pub fn scheduled_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Mount the layer and begin the frame loop.
    ///
    /// Declines silently (returns false, stays `Stopped`) when the renderer
    /// or the mount point is missing, or another controller owns the mount.
    /// A page that is already hidden starts in `Paused(Hidden)`.
    pub fn start(&mut self) -> bool {
        if self.state.state() != RunState::Stopped {
            tracing::debug!(state = self.state.state().name(), "start ignored");
            return false;
        }

        let mount_id = self.system.config().mount_id.clone();
        if !self.host.renderer_available() {
            tracing::debug!("renderer unavailable; bubble layer not started");
            return false;
        }
        if !self.host.has_mount_point(&mount_id) {
            tracing::debug!(mount = %mount_id, "mount point missing; bubble layer not started");
            return false;
        }
        let guard = match self.registry.claim(&mount_id) {
            Ok(guard) => guard,
            Err(err) => {
                tracing::debug!(error = %err, "bubble layer not started");
                return false;
            }
        };

        let info = self.host.viewport_info();
        if let Err(err) = self.system.initialize(&info) {
            tracing::warn!(error = %err, "bubble system failed to initialize");
            return false;
        }
        self.renderer.resize(self.system.viewport().size(), self.system.pixel_ratio());

        self.mount = Some(guard);
        self.host.attach_listeners();
        self.listeners_attached = true;
        self.state.start();
        self.clock.reset();
        self.hidden = !self.host.is_visible();
        if self.hidden {
            self.state.pause(PauseReason::Hidden);
        } else {
            self.schedule();
        }

        tracing::info!(
            mount = %mount_id,
            active = self.system.active_count(),
            state = self.state.state().name(),
            "bubble layer started"
        );
        true
    }

    /// Frame callback. Ignored unless `handle` is the scheduled frame and the
    /// loop is running. Returns whether a frame was simulated and drawn.
    pub fn on_frame(&mut self, handle: FrameHandle, now: f64) -> bool {
        if self.frame != Some(handle) || !self.state.is_running() {
            tracing::trace!(handle = handle.0, "stale frame ignored");
            return false;
        }
        self.frame = None;

        self.settle_orientation(now);

        let dt = self.clock.tick(now);
        if let Err(err) = self.system.update(dt) {
            tracing::warn!(error = %err, system = self.system.name(), "update failed");
        }
        self.renderer.draw(&self.system.frame_data());
        self.system.clear_effects();
        self.frames_drawn += 1;

        self.schedule();
        true
    }

    /// Apply one host signal. Signals after dispose are ignored.
    pub fn handle_event(&mut self, event: HostEvent) {
        if self.state.is_disposed() {
            return;
        }
        match event {
            HostEvent::Resized(size) => self.resize(size),
            HostEvent::OrientationChanged => {
                if self.state.state() != RunState::Stopped {
                    self.orientation = OrientationSettle::Requested;
                }
            }
            HostEvent::VisibilityChanged(visible) => self.set_visible(visible),
            HostEvent::DeviceLost => {
                if self.state.pause(PauseReason::DeviceLost) {
                    self.cancel_frame();
                    tracing::warn!("rendering context lost; bubble layer paused");
                }
            }
            HostEvent::Pointer { x, y } => {
                if self.state.is_running() {
                    self.system.pop_at_pixel(x, y);
                }
            }
        }
    }

    /// Deliver every queued event in order
    pub fn pump(&mut self, bus: &mut EventBus) {
        while let Some(event) = bus.pop() {
            self.handle_event(event);
        }
    }

    /// Resume after a pause that does not clear itself (device loss).
    /// If the page is hidden the loop stays paused until it becomes visible.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.state.state(), RunState::Paused(_)) {
            return false;
        }
        if !self.host.renderer_available() {
            tracing::debug!("restart declined; renderer still unavailable");
            return false;
        }
        self.state.restart();
        self.clock.reset();
        if self.hidden {
            self.state.pause(PauseReason::Hidden);
        } else {
            self.schedule();
        }
        tracing::info!(state = self.state.state().name(), "bubble layer restarted");
        true
    }

    /// Tear everything down. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if !self.state.dispose() {
            return;
        }
        self.cancel_frame();
        if let Err(err) = self.system.shutdown() {
            tracing::warn!(error = %err, "bubble system shutdown failed");
        }
        if !self.renderer_released {
            self.renderer.release();
            self.renderer_released = true;
        }
        if self.listeners_attached {
            self.host.detach_listeners();
            self.listeners_attached = false;
        }
        self.mount = None;
        tracing::info!("bubble layer disposed");
    }

    fn resize(&mut self, size: PixelSize) {
        if self.state.state() == RunState::Stopped {
            return;
        }
        if !size.is_usable() {
            tracing::debug!(width = size.width, height = size.height, "resize ignored");
            return;
        }
        let info = ViewportInfo {
            size,
            device_pixel_ratio: self.host.device_pixel_ratio(),
            reduced_motion: self.host.prefers_reduced_motion(),
        };
        self.apply_viewport(&info);
    }

    fn apply_viewport(&mut self, info: &ViewportInfo) {
        if let Err(err) = self.system.resize(info) {
            tracing::warn!(error = %err, "bubble system resize failed");
            return;
        }
        self.renderer.resize(self.system.viewport().size(), self.system.pixel_ratio());
    }

    fn settle_orientation(&mut self, now: f64) {
        match self.orientation {
            OrientationSettle::Idle => {}
            OrientationSettle::Requested => {
                let settle = self.system.config().orientation_settle as f64;
                self.orientation = OrientationSettle::Until(now + settle);
                self.settle_orientation(now);
            }
            OrientationSettle::Until(deadline) => {
                if now >= deadline {
                    self.orientation = OrientationSettle::Idle;
                    let info = self.host.viewport_info();
                    self.apply_viewport(&info);
                }
            }
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.hidden = !visible;
        if visible {
            if self.state.resume_visible() {
                // The gap while hidden must not reach the simulation
                self.clock.reset();
                self.schedule();
            }
        } else if self.state.pause(PauseReason::Hidden) {
            self.cancel_frame();
        }
    }

    fn schedule(&mut self) {
        self.cancel_frame();
        self.frame = Some(self.host.request_frame());
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
        }
    }
}

impl<H: Host, R: BubbleRenderer> Drop for BubbleController<H, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
