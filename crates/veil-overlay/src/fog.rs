//! Scene fog settings

use veil_core::{Color, OverlayConfig};

/// Linear fog: fully clear before `near`, fully fogged past `far`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogParams {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl FogParams {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            color: config.fog_color,
            near: config.fog_near,
            far: config.fog_far,
        }
    }
}

impl Default for FogParams {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config() {
        let fog = FogParams::default();
        assert_eq!(fog.color, Color::BLACK);
        assert_eq!(fog.near, 0.0);
        assert_eq!(fog.far, 16.0);
    }
}
