//! Frame and resize timers driven by the host's clock.
//!
//! Neither timer looks at a real clock. The host passes `now` (ms) and
//! asks whether the deadline has passed.

use crate::core::constants::RESIZE_DEBOUNCE_MS;

/// At most one pending frame tick.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    due: Option<f64>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a tick at `due`. Ignored while one is already pending.
    pub fn schedule(&mut self, due: f64) {
        if self.due.is_none() {
            self.due = Some(due);
        }
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<f64> {
        self.due
    }

    /// Consume the pending tick if its deadline has passed.
    pub fn take_due(&mut self, now: f64) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Collapses bursts of resize notifications into one adjustment.
#[derive(Debug, Clone, Default)]
pub struct ResizeDebouncer {
    due: Option<f64>,
    size: (f64, f64),
}

impl ResizeDebouncer {
    /// Record a new size. The first request in a burst arms the timer;
    /// later ones only update the size.
    pub fn request(&mut self, width: f64, height: f64, now: f64) {
        self.size = (width, height);
        if self.due.is_none() {
            self.due = Some(now + RESIZE_DEBOUNCE_MS);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// The latest requested size once the debounce interval has elapsed.
    pub fn take_due(&mut self, now: f64) -> Option<(f64, f64)> {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                Some(self.size)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_is_idempotent() {
        let mut s = FrameScheduler::new();
        s.schedule(16.0);
        s.schedule(32.0);
        assert_eq!(s.due(), Some(16.0));
        assert!(!s.take_due(10.0));
        assert!(s.take_due(16.0));
        assert!(!s.is_pending());
    }

    #[test]
    fn test_cancel_drops_tick() {
        let mut s = FrameScheduler::new();
        s.schedule(16.0);
        s.cancel();
        assert!(!s.take_due(100.0));
    }

    #[test]
    fn test_resize_debounce_keeps_latest() {
        let mut r = ResizeDebouncer::default();
        r.request(500.0, 150.0, 0.0);
        r.request(400.0, 150.0, 100.0);
        assert_eq!(r.take_due(200.0), None);
        assert_eq!(r.take_due(250.0), Some((400.0, 150.0)));
        assert!(!r.is_pending());
    }
}
