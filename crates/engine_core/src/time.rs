//! Frame clock for the animation loop.

use std::time::{Duration, Instant};

/// Frame clock. Animation reads `elapsed_seconds`, which only moves when
/// `update`/`advance_to` is called, so every system sees the same time within a frame.
#[derive(Debug, Clone)]
pub struct Time {
    start: Instant,
    frame_start: Instant,
    frame_duration: Duration,
    frames: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_start: now,
            frame_duration: Duration::ZERO,
            frames: 0,
        }
    }

    /// Start a new frame now.
    pub fn update(&mut self) {
        self.advance_to(Instant::now());
    }

    /// Start a new frame at `now`. Instants before the current frame are ignored.
    pub fn advance_to(&mut self, now: Instant) {
        if let Some(duration) = now.checked_duration_since(self.frame_start) {
            self.frame_duration = duration;
            self.frame_start = now;
            self.frames += 1;
        }
    }

    /// Length of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.frame_duration.as_secs_f32()
    }

    /// Seconds from creation to the start of the current frame.
    pub fn elapsed_seconds(&self) -> f32 {
        (self.frame_start - self.start).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frames per second, from the last frame's length.
    pub fn fps(&self) -> f32 {
        let delta = self.delta_seconds();
        if delta > 0.0 {
            delta.recip()
        } else {
            0.0
        }
    }

    pub fn start_time(&self) -> Instant {
        self.start
    }
}
