//! Frame clock driven by display-refresh callbacks

use std::time::Instant;

/// Tracks per-frame delta time and total elapsed time since the first tick
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Upper bound on a single frame's delta (e.g. after the surface was hidden)
    pub max_delta: f64,
    /// Number of ticks taken so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            frame: 0,
            last_instant: None,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance the clock to `now`. The first tick yields a zero delta.
    pub fn tick_at(&mut self, now: Instant) {
        let elapsed = match self.last_instant {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_instant = Some(now);
        self.advance(elapsed);
    }

    /// Advance the clock by an explicit delta (headless and test driving).
    pub fn advance(&mut self, dt: f64) {
        self.delta_time = dt.clamp(0.0, self.max_delta);
        self.total_time += self.delta_time;
        self.frame += 1;
    }

    /// Total elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.total_time * 1000.0
    }
}
