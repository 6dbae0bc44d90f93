//! Call coalescing.

use std::time::{Duration, Instant};

/// Leading-edge call gate: the first call in a window passes, the rest are
/// swallowed until the window elapses.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Returns true when the caller should run its action now.
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forgets the last accepted call, so the next one passes immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_passes_rest_swallowed() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert!(debouncer.ready_at(start));
        assert!(!debouncer.ready_at(start + Duration::from_millis(100)));
        assert!(!debouncer.ready_at(start + Duration::from_millis(499)));
        assert!(debouncer.ready_at(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_reset_reopens_the_gate() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        assert!(debouncer.ready_at(start));
        debouncer.reset();
        assert!(debouncer.ready_at(start + Duration::from_millis(1)));
    }
}
