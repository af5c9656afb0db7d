//! Frame clock with clamped delta time

/// Default upper bound for a single simulation step (seconds)
pub const DEFAULT_MAX_STEP: f64 = 0.033;

/// Tracks host frame timestamps and turns them into clamped simulation steps.
///
/// Timestamps come from the host's frame callback (seconds, monotonic). The
/// first timestamp after construction or [`FrameClock::reset`] only records a
/// reference and yields a zero step, so a long gap (hidden tab, device loss)
/// never reaches the simulation.
pub struct FrameClock {
    /// Total simulated time in seconds
    pub total_time: f64,
    /// Step produced by the last tick in seconds
    pub delta_time: f64,
    /// Upper bound applied to every step
    pub max_step: f64,
    /// Last host timestamp seen
    last_timestamp: f64,
    /// Whether the next tick only establishes the reference
    needs_reference: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_step: DEFAULT_MAX_STEP,
            last_timestamp: 0.0,
            needs_reference: true,
        }
    }
}

impl FrameClock {
    /// Create a new clock with the default 33ms step cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom step cap
    pub fn with_max_step(max_step: f64) -> Self {
        Self {
            max_step: max_step.max(0.0),
            ..Self::default()
        }
    }

    /// Advance to the host timestamp `now`. Call once per frame.
    /// Returns the clamped step.
    pub fn tick(&mut self, now: f64) -> f64 {
        if self.needs_reference {
            self.needs_reference = false;
            self.last_timestamp = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        let elapsed = now - self.last_timestamp;
        self.last_timestamp = now;

        // Timestamps can go backwards across host clock resets
        self.delta_time = elapsed.clamp(0.0, self.max_step);
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Forget the previous timestamp; the next tick yields a zero step.
    pub fn reset(&mut self) {
        self.needs_reference = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.max_step - 0.033).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12.5), 0.0);
    }

    #[test]
    fn test_regular_step() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        let dt = clock.tick(1.016);
        assert!((dt - 0.016).abs() < 1e-9);
        assert!((clock.total_time - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let dt = clock.tick(5.0);
        assert!((dt - 0.033).abs() < 1e-9);
    }

    #[test]
    fn test_reset_discards_gap() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(0.016);
        clock.reset();
        assert_eq!(clock.tick(5.016), 0.0);
        let dt = clock.tick(5.032);
        assert!((dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(1.0), 0.0);
    }
}
