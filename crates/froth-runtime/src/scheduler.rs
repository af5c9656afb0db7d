//! Cancellable frame requests

/// Identifies one requested frame callback.
///
/// Handles are never reused, so a callback carrying an old handle can always
/// be told apart from the currently scheduled one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's frame-synchronized callback mechanism
pub trait FrameScheduler {
    /// Ask for one callback at the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler that only records requests; the owner decides when frames fire.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending handle, oldest first
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Handles requested but not yet fired or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Total number of frame requests made
    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    /// Total number of successful cancellations
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        let b = sched.request_frame();
        assert_ne!(a, b);
        assert_eq!(sched.pending(), &[a, b]);
    }

    #[test]
    fn cancel_removes_pending() {
        let mut sched = ManualScheduler::new();
        let a = sched.request_frame();
        sched.cancel_frame(a);
        assert!(sched.pending().is_empty());
        assert_eq!(sched.cancelled_count(), 1);

        // Second cancel of the same handle is a no-op
        sched.cancel_frame(a);
        assert_eq!(sched.cancelled_count(), 1);
    }

    #[test]
    fn take_pending_drains() {
        let mut sched = ManualScheduler::new();
        sched.request_frame();
        assert_eq!(sched.take_pending().len(), 1);
        assert!(sched.take_pending().is_empty());
        assert_eq!(sched.requested_count(), 1);
    }
}
