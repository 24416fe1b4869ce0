//! Frame timing for the script host

use std::time::Instant;

/// Frame timer producing the elapsed seconds handed to script update hooks
///
/// Runs either from the wall clock ([`Timer::update`]) or with a fixed step
/// ([`Timer::advance`]) for headless runs and tests.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer from the wall clock (should be called once per frame)
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance the timer by a fixed step, ignoring the wall clock
    pub fn advance(&mut self, delta_time: f32) -> f32 {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
        delta_time
    }

    /// Get the time since the last frame in seconds
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    #[must_use]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
