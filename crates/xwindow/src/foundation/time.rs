//! Frame pacing

use std::time::{Duration, Instant};

/// Keeps a loop from running faster than a fixed frame interval
pub struct FramePacer {
    interval: Duration,
    frame_start: Instant,
    frame_count: u64,
}

impl FramePacer {
    /// Create a pacer; a zero interval never sleeps
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_start: Instant::now(),
            frame_count: 0,
        }
    }

    /// Create a pacer from milliseconds
    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
        self.frame_count += 1;
    }

    /// Time left in the current frame, zero once the interval has passed
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.frame_start.elapsed())
    }

    /// Sleep away whatever is left of the current frame
    pub fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Frames begun so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Configured interval
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
