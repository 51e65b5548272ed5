//! Fixed-rate frame pacing
//!
//! Real time is accumulated against a monotonic clock and paid out in whole
//! simulation ticks; the loop then sleeps until the next frame boundary.

use std::time::{Duration, Instant};

use crate::consts::MAX_SUBSTEPS;

/// Longest gap credited in one frame (debugger pauses, suspended terminal)
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
    accumulator: Duration,
    // FPS tracking
    frame_times: [Instant; 60],
    frame_index: usize,
    frames_seen: usize,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    /// Clock whose first frame begins at `now`
    pub fn starting_at(fps: u32, now: Instant) -> Self {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            frame,
            // Owe one tick up front so the first frame simulates
            last: now,
            accumulator: frame,
            frame_times: [now; 60],
            frame_index: 0,
            frames_seen: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Ticks to simulate this frame
    pub fn advance(&mut self) -> u32 {
        self.advance_to(Instant::now())
    }

    pub fn advance_to(&mut self, now: Instant) -> u32 {
        let dt = now.saturating_duration_since(self.last).min(MAX_FRAME_GAP);
        self.last = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.frame && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.frame;
            substeps += 1;
        }
        // Drop whatever backlog is left rather than spiral
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.frame);
        }

        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        self.frames_seen += 1;

        substeps
    }

    /// Time left until the next frame boundary
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.last + self.frame).saturating_duration_since(now)
    }

    /// Block until the next frame boundary
    pub fn wait(&self) {
        let left = self.remaining(Instant::now());
        if !left.is_zero() {
            std::thread::sleep(left);
        }
    }

    /// Frames per second over the last 60 frames
    pub fn fps(&self) -> Option<u32> {
        let len = self.frame_times.len();
        if self.frames_seen < len {
            return None;
        }
        let newest = self.frame_times[(self.frame_index + len - 1) % len];
        let oldest = self.frame_times[self.frame_index];
        let span = newest.saturating_duration_since(oldest).as_secs_f64();
        if span <= 0.0 {
            return None;
        }
        Some(((len - 1) as f64 / span).round() as u32)
    }
}
