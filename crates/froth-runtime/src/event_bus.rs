//! Queue of host signals waiting for the controller

use crate::event::HostEvent;
use std::collections::VecDeque;

/// FIFO of host events. A resize queued directly behind another resize
/// replaces it, since only the latest dimensions are ever applied.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<HostEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        if let (HostEvent::Resized(size), Some(HostEvent::Resized(last))) =
            (&event, self.queue.back_mut())
        {
            *last = *size;
            return;
        }
        self.queue.push_back(event);
    }

    /// Oldest pending event
    pub fn pop(&mut self) -> Option<HostEvent> {
        self.queue.pop_front()
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> Vec<HostEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use froth_core::PixelSize;

    #[test]
    fn drains_in_arrival_order() {
        let mut bus = EventBus::new();
        bus.push(HostEvent::VisibilityChanged(false));
        bus.push(HostEvent::DeviceLost);
        bus.push(HostEvent::VisibilityChanged(true));

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                HostEvent::VisibilityChanged(false),
                HostEvent::DeviceLost,
                HostEvent::VisibilityChanged(true),
            ]
        );
        assert!(bus.is_empty());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn consecutive_resizes_collapse() {
        let mut bus = EventBus::new();
        bus.push(HostEvent::Resized(PixelSize::new(640.0, 480.0)));
        bus.push(HostEvent::Resized(PixelSize::new(800.0, 600.0)));
        assert_eq!(bus.len(), 1);

        // A different event in between keeps both
        bus.push(HostEvent::OrientationChanged);
        bus.push(HostEvent::Resized(PixelSize::new(600.0, 800.0)));
        assert_eq!(bus.len(), 3);

        assert_eq!(
            bus.pop(),
            Some(HostEvent::Resized(PixelSize::new(800.0, 600.0)))
        );
    }

    #[test]
    fn pop_takes_oldest_first() {
        let mut bus = EventBus::new();
        bus.push(HostEvent::Pointer { x: 1.0, y: 2.0 });
        bus.push(HostEvent::DeviceLost);
        assert_eq!(bus.pop(), Some(HostEvent::Pointer { x: 1.0, y: 2.0 }));
        assert_eq!(bus.pop(), Some(HostEvent::DeviceLost));
        assert_eq!(bus.pop(), None);
    }
}
