//! Exponential smoothing toward a target
//!
//! Every animated value in the overlay chases its target with a fixed blend
//! fraction. In `PerFrame` mode that fraction is applied once per tick, so the
//! motion speeds up on faster displays. `TimeScaled` mode converts the fraction
//! into an equivalent per-tick value for the actual frame time:
//! `1 - (1 - factor)^(dt * reference_hz)`.

use serde::{Deserialize, Serialize};

/// How blend factors relate to frame time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Apply the raw factor once per tick, regardless of frame time.
    PerFrame,
    /// Scale the factor so the decay rate matches `reference_hz` at any frame rate.
    #[default]
    TimeScaled,
}

/// Smoothing settings shared by every blended value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Smoothing {
    pub mode: SmoothingMode,
    /// Refresh rate at which the raw blend factors were tuned
    pub reference_hz: f32,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            mode: SmoothingMode::TimeScaled,
            reference_hz: 60.0,
        }
    }
}

impl Smoothing {
    pub fn per_frame() -> Self {
        Self {
            mode: SmoothingMode::PerFrame,
            ..Self::default()
        }
    }

    /// Effective blend fraction for a tick of `dt` seconds, always in [0, 1].
    pub fn blend(&self, factor: f32, dt: f32) -> f32 {
        let factor = factor.clamp(0.0, 1.0);
        match self.mode {
            SmoothingMode::PerFrame => factor,
            SmoothingMode::TimeScaled => {
                let frames = dt.max(0.0) * self.reference_hz.max(0.0);
                1.0 - (1.0 - factor).powf(frames)
            }
        }
    }
}

/// Move `current` a fraction `t` of the way toward `target`.
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}
