//! Environment signals delivered by the host between frames

use froth_core::PixelSize;
use serde::{Deserialize, Serialize};

/// A signal from the host environment.
///
/// Hosts dispatch these strictly between frame callbacks; none of them may be
/// delivered while a tick is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// The viewport changed size (CSS pixels)
    Resized(PixelSize),
    /// The device orientation changed; dimensions settle later
    OrientationChanged,
    /// The page became visible (`true`) or hidden (`false`)
    VisibilityChanged(bool),
    /// The rendering context was lost
    DeviceLost,
    /// A pointer press or tap at the given CSS pixel coordinates
    Pointer { x: f32, y: f32 },
}
