//! Froth Host - mounting the bubble layer into a host environment
//!
//! - `Host`: what the controller needs from the page: mount point, viewport,
//!   preferences, frame scheduling, and listener wiring
//! - `BubbleController`: the run-state machine driving `BubbleSystem`
//! - `MountRegistry`: one controller per mount point, without global state
//! - `HeadlessHost` / `RecordingRenderer`: in-memory host for tools and tests

pub mod controller;
pub mod headless;
pub mod host;
pub mod mount;

pub use controller::BubbleController;
pub use headless::{run_pending_frames, HeadlessHost, RecordingRenderer};
pub use host::Host;
pub use mount::{MountGuard, MountRegistry};
