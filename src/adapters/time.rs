//! Monotonic time adapter.
//!
//! Every timestamp in the firmware is a wrapping `u32` of milliseconds
//! since boot.  On the host the origin is the moment the clock is created.

use std::time::Instant;

/// Millisecond clock shared by the control loop and the button thread.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since creation, wrapping after ~49.7 days.
    pub fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}
