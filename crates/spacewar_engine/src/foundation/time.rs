//! Time management utilities

use std::time::{Duration, Instant};

/// Frame timer measuring the delta between ticks
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl Timer {
    /// Create a new timer; deltas larger than `max_delta` are clamped
    pub fn new(max_delta: Duration) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: max_delta.as_secs_f32(),
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.advance_by(now.duration_since(self.last_frame));
        self.last_frame = now;
    }

    /// Advance by an explicit elapsed duration, clamped to the maximum delta
    pub fn advance_by(&mut self, elapsed: Duration) {
        self.delta_time = elapsed.as_secs_f32().min(self.max_delta);
        self.total_time += self.delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
