//! Control panel model
//!
//! The panel itself lives in the host UI. This module describes its controls,
//! converts raw input strings into [`ConfigChange`]s and reports the values
//! to display.

use veil_core::{Color, ConfigChange, OverlayConfig, Result, VeilError};
use veil_runtime::ConfigStore;

const ORB_COLOR_PREFIX: &str = "orbColor";

/// Input widget behind a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Range { min: f32, max: f32, step: f32 },
    Color,
}

/// One panel control
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub id: String,
    pub label: String,
    pub kind: ControlKind,
}

impl ControlSpec {
    fn range(id: &str, label: &str, min: f32, max: f32, step: f32) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ControlKind::Range { min, max, step },
        }
    }

    fn color(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ControlKind::Color,
        }
    }
}

/// The overlay's tuning panel
pub struct ControlPanel {
    controls: Vec<ControlSpec>,
}

impl ControlPanel {
    /// Build the control list, with one color input per orb.
    pub fn new(orb_count: usize) -> Self {
        let mut controls = vec![
            ControlSpec::color("fogColor", "Fog color"),
            ControlSpec::range("fogNear", "Fog start", 0.0, 50.0, 0.1),
            ControlSpec::range("fogFar", "Fog end", 1.0, 200.0, 0.1),
            ControlSpec::range("pSize", "Particle size", 1.0, 150.0, 1.0),
            ControlSpec::range("pSpeed", "Particle speed", 0.0, 0.5, 0.01),
            ControlSpec::range("pOpacity", "Particle opacity", 0.0, 1.0, 0.01),
            ControlSpec::range("pY", "Particle Y", -6.0, 6.0, 0.1),
            ControlSpec::range("smokeSpread", "Smoke spread", 0.0, 10.0, 0.1),
            ControlSpec::range("smokeRot", "Smoke rotation", 0.0, 2.0, 0.01),
            ControlSpec::range("parallax", "Parallax amount", 0.0, 12.0, 0.1),
            ControlSpec::range("orbSpeed", "Orb speed", 0.0, 3.0, 0.05),
            ControlSpec::range("orbScale", "Orb scale", 0.2, 4.0, 0.05),
            ControlSpec::range("orbsY", "Orb altitude", -5.0, 15.0, 0.1),
            ControlSpec::range("trailLen", "Trail length", 2.0, 120.0, 1.0),
        ];
        for i in 0..orb_count {
            controls.push(ControlSpec::color(
                &format!("{ORB_COLOR_PREFIX}{i}"),
                &format!("Orb {} color", i + 1),
            ));
        }
        Self { controls }
    }

    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    pub fn control(&self, id: &str) -> Option<&ControlSpec> {
        self.controls.iter().find(|c| c.id == id)
    }

    /// Turn a raw input value into a configuration edit.
    ///
    /// Range values are clamped to the slider's bounds and snapped to its step.
    pub fn apply(&self, id: &str, raw: &str) -> Result<ConfigChange> {
        let spec = self
            .control(id)
            .ok_or_else(|| VeilError::UnknownControl(id.to_string()))?;
        let invalid = || VeilError::InvalidControlValue {
            control: id.to_string(),
            value: raw.to_string(),
        };

        match spec.kind {
            ControlKind::Color => {
                let color = Color::parse(raw).map_err(|_| invalid())?;
                color_change(id, color).ok_or_else(invalid)
            }
            ControlKind::Range { min, max, step } => {
                let value: f32 = raw.trim().parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                let value = snap(value.clamp(min, max), min, step).clamp(min, max);
                range_change(id, value).ok_or_else(invalid)
            }
        }
    }

    /// Parse and publish in one go.
    pub fn submit(&self, store: &ConfigStore, id: &str, raw: &str) -> Result<ConfigChange> {
        let change = self.apply(id, raw)?;
        store.apply(change);
        Ok(change)
    }

    /// Current value of every control, formatted for display.
    pub fn display_values(&self, config: &OverlayConfig) -> Vec<(String, String)> {
        self.controls
            .iter()
            .map(|c| (c.id.clone(), display_value(&c.id, config)))
            .collect()
    }
}

fn snap(value: f32, min: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    min + ((value - min) / step).round() * step
}

fn color_change(id: &str, color: Color) -> Option<ConfigChange> {
    if id == "fogColor" {
        return Some(ConfigChange::FogColor(color));
    }
    let index = id.strip_prefix(ORB_COLOR_PREFIX)?.parse().ok()?;
    Some(ConfigChange::OrbColor { index, color })
}

fn range_change(id: &str, v: f32) -> Option<ConfigChange> {
    Some(match id {
        "fogNear" => ConfigChange::FogNear(v),
        "fogFar" => ConfigChange::FogFar(v),
        "pSize" => ConfigChange::ParticleSize(v),
        "pSpeed" => ConfigChange::ParticleSpeed(v),
        "pOpacity" => ConfigChange::ParticleOpacity(v),
        "pY" => ConfigChange::ParticleY(v),
        "smokeSpread" => ConfigChange::SmokeSpread(v),
        "smokeRot" => ConfigChange::SmokeRotSpeed(v),
        "parallax" => ConfigChange::ParallaxAmount(v),
        "orbSpeed" => ConfigChange::OrbSpeed(v),
        "orbScale" => ConfigChange::OrbScale(v),
        "orbsY" => ConfigChange::OrbsY(v),
        "trailLen" => ConfigChange::TrailLength(v.round() as i64),
        _ => return None,
    })
}

fn display_value(id: &str, config: &OverlayConfig) -> String {
    match id {
        "fogColor" => config.fog_color.to_hex_string(),
        "fogNear" => config.fog_near.to_string(),
        "fogFar" => config.fog_far.to_string(),
        "pSize" => config.particle_size.to_string(),
        "pSpeed" => config.particle_speed.to_string(),
        "pOpacity" => config.particle_opacity.to_string(),
        "pY" => config.particle_y.to_string(),
        "smokeSpread" => config.smoke_spread.to_string(),
        "smokeRot" => config.smoke_rot_speed.to_string(),
        "parallax" => config.parallax_amount.to_string(),
        "orbSpeed" => config.orb_speed.to_string(),
        "orbScale" => config.orb_scale.to_string(),
        "orbsY" => config.orbs_y.to_string(),
        "trailLen" => config.trail_length.to_string(),
        other => other
            .strip_prefix(ORB_COLOR_PREFIX)
            .and_then(|i| i.parse::<usize>().ok())
            .map(|i| config.orb_color(i).to_hex_string())
            .unwrap_or_default(),
    }
}
