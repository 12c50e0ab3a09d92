use std::time::Duration;

use crate::Pacer;

/// Pacer that blocks the calling thread for the requested duration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl ThreadPacer {
    pub fn new() -> Self {
        Self
    }
}

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Pacer that never sleeps and only keeps track of how long the run would
/// have taken in real time.
#[derive(Debug, Default, Clone)]
pub struct VirtualClock {
    elapsed: Duration,
    pauses: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.pauses = 0;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Total virtual time spent paused.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pauses(&self) -> u64 {
        self.pauses
    }
}

impl Pacer for VirtualClock {
    fn pause(&mut self, duration: Duration) {
        self.pauses += 1;
        self.advance(duration);
    }
}
