//! Overlay configuration (parsed from TOML) and the edits a control panel can make

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::smoothing::Smoothing;
use crate::types::Color;

/// Every tunable parameter of the overlay.
///
/// A value of this type is treated as an immutable snapshot once published;
/// edits produce a new snapshot via [`OverlayConfig::applied`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub fog_color: Color,
    pub fog_near: f32,
    pub fog_far: f32,

    pub particle_count: usize,
    /// Reserved: carried to the panel but not consumed by the smoke motion
    pub particle_speed: f32,
    pub particle_size: f32,
    pub particle_opacity: f32,
    /// Vertical offset added to every smoke particle
    pub particle_y: f32,
    pub smoke_spread: f32,
    /// Radians per second of bulk rotation around +Y
    pub smoke_rot_speed: f32,

    pub parallax_amount: f32,

    pub orb_count: usize,
    pub orb_speed: f32,
    pub orb_scale: f32,
    /// Altitude every orb converges to
    pub orbs_y: f32,
    pub orb_colors: Vec<Color>,

    /// Points allocated per trail
    pub trail_capacity: usize,
    /// Requested visible trail length; clamped to `[0, trail_capacity]` at use
    pub trail_length: i64,

    /// Fixed RNG seed for reproducible layouts; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub smoothing: Smoothing,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fog_color: Color::BLACK,
            fog_near: 0.0,
            fog_far: 16.0,
            particle_count: 700,
            particle_speed: 0.02,
            particle_size: 60.0,
            particle_opacity: 0.19,
            particle_y: -1.8,
            smoke_spread: 3.0,
            smoke_rot_speed: 0.18,
            parallax_amount: 2.5,
            orb_count: 4,
            orb_speed: 0.2,
            orb_scale: 0.05,
            orbs_y: 5.0,
            orb_colors: vec![
                Color::from_hex(0xff3aff),
                Color::from_hex(0x47d1ff),
                Color::from_hex(0x9cff4a),
                Color::from_hex(0xff4848),
            ],
            trail_capacity: 120,
            trail_length: 50,
            seed: None,
            smoothing: Smoothing::default(),
        }
    }
}

impl OverlayConfig {
    /// Parse a (possibly partial) TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(s)?;
        config.replace_non_finite();
        config.warn_if_clamped();
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Visible trail length for a buffer of `capacity` points.
    pub fn trail_len(&self, capacity: usize) -> usize {
        self.trail_length.clamp(0, capacity as i64) as usize
    }

    /// Color for orb `index`; the list repeats when there are more orbs than colors.
    pub fn orb_color(&self, index: usize) -> Color {
        if self.orb_colors.is_empty() {
            return Color::WHITE;
        }
        self.orb_colors[index % self.orb_colors.len()]
    }

    /// Return a new snapshot with `change` applied.
    pub fn applied(&self, change: &ConfigChange) -> Self {
        let mut next = self.clone();
        next.apply(change);
        next
    }

    fn apply(&mut self, change: &ConfigChange) {
        match *change {
            ConfigChange::FogColor(c) => self.fog_color = c,
            ConfigChange::FogNear(v) => self.fog_near = v,
            ConfigChange::FogFar(v) => self.fog_far = v,
            ConfigChange::ParticleSize(v) => self.particle_size = v,
            ConfigChange::ParticleSpeed(v) => self.particle_speed = v,
            ConfigChange::ParticleOpacity(v) => self.particle_opacity = v,
            ConfigChange::ParticleY(v) => self.particle_y = v,
            ConfigChange::SmokeSpread(v) => self.smoke_spread = v,
            ConfigChange::SmokeRotSpeed(v) => self.smoke_rot_speed = v,
            ConfigChange::ParallaxAmount(v) => self.parallax_amount = v,
            ConfigChange::OrbSpeed(v) => self.orb_speed = v,
            ConfigChange::OrbScale(v) => self.orb_scale = v,
            ConfigChange::OrbsY(v) => self.orbs_y = v,
            ConfigChange::TrailLength(v) => self.trail_length = v,
            ConfigChange::OrbColor { index, color } => {
                if index >= self.orb_count.max(self.orb_colors.len()) {
                    tracing::warn!(
                        orb = index,
                        orb_count = self.orb_count,
                        "color for nonexistent orb ignored"
                    );
                    return;
                }
                // Materialize the repeating palette up to `index` so other orbs keep their colors
                if index >= self.orb_colors.len() {
                    let filled: Vec<Color> = (0..=index).map(|i| self.orb_color(i)).collect();
                    self.orb_colors = filled;
                }
                self.orb_colors[index] = color;
            }
        }
    }

    /// Reset NaN and infinite values to their defaults.
    fn replace_non_finite(&mut self) {
        let defaults = Self::default();
        let fields = [
            ("fog_near", &mut self.fog_near, defaults.fog_near),
            ("fog_far", &mut self.fog_far, defaults.fog_far),
            ("particle_speed", &mut self.particle_speed, defaults.particle_speed),
            ("particle_size", &mut self.particle_size, defaults.particle_size),
            ("particle_opacity", &mut self.particle_opacity, defaults.particle_opacity),
            ("particle_y", &mut self.particle_y, defaults.particle_y),
            ("smoke_spread", &mut self.smoke_spread, defaults.smoke_spread),
            ("smoke_rot_speed", &mut self.smoke_rot_speed, defaults.smoke_rot_speed),
            ("parallax_amount", &mut self.parallax_amount, defaults.parallax_amount),
            ("orb_speed", &mut self.orb_speed, defaults.orb_speed),
            ("orb_scale", &mut self.orb_scale, defaults.orb_scale),
            ("orbs_y", &mut self.orbs_y, defaults.orbs_y),
            (
                "smoothing.reference_hz",
                &mut self.smoothing.reference_hz,
                defaults.smoothing.reference_hz,
            ),
        ];
        for (name, value, default) in fields {
            if !value.is_finite() {
                tracing::warn!(field = name, value = %value, "non-finite value replaced by default");
                *value = default;
            }
        }
    }

    fn warn_if_clamped(&self) {
        if self.trail_length < 0 || self.trail_length as usize > self.trail_capacity {
            tracing::warn!(
                trail_length = self.trail_length,
                trail_capacity = self.trail_capacity,
                "trail_length outside [0, trail_capacity], will be clamped"
            );
        }
    }
}

/// A single-field edit published by the control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigChange {
    FogColor(Color),
    FogNear(f32),
    FogFar(f32),
    ParticleSize(f32),
    ParticleSpeed(f32),
    ParticleOpacity(f32),
    ParticleY(f32),
    SmokeSpread(f32),
    SmokeRotSpeed(f32),
    ParallaxAmount(f32),
    OrbSpeed(f32),
    OrbScale(f32),
    OrbsY(f32),
    TrailLength(i64),
    OrbColor { index: usize, color: Color },
}

impl ConfigChange {
    /// Whether both edits write the same field (and, for orb colors, the same orb).
    pub fn same_field(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::OrbColor { index: a, .. }, Self::OrbColor { index: b, .. }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
