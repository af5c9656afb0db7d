//! Froth Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the controller drives every display refresh:
//! - `FrameClock`: clamped delta-time tracking with resumable reference
//! - `HostEvent` / `EventBus`: environment signals queued between frames
//! - `FrameScheduler` / `FrameHandle`: cancellable frame requests
//! - `RunStateMachine`: stopped / running / paused / disposed lifecycle
//! - `RuntimeSystem`: trait for systems ticked by the frame loop

mod clock;
mod event;
mod event_bus;
mod scheduler;
mod state;
mod system;

pub use clock::FrameClock;
pub use event::HostEvent;
pub use event_bus::EventBus;
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use state::{PauseReason, RunState, RunStateMachine};
pub use system::{RuntimeSystem, ViewportInfo};
