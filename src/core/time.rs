//! Monotonic scene clock

use std::time::{Duration, Instant};

/// Time tracking for the tick loop.
///
/// `elapsed()` is the monotonic "now" handed to the navigation core. It can
/// follow the wall clock via [`Time::update`] or be stepped by hand with
/// [`Time::advance`] for headless replays and tests.
#[derive(Debug, Clone)]
pub struct Time {
    last_update: Instant,
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl Time {
    /// Start a clock at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance by the wall-clock time since the previous update
    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(delta);
    }

    /// Advance by a fixed amount
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Duration of the last tick
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Duration of the last tick in seconds
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time since the clock started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of ticks so far
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
