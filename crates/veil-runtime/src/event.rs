//! Requests the simulation raises for its rendering collaborator

use veil_core::Color;

/// Something the renderer must react to outside the per-frame array updates
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Fog range or color changed
    FogChanged { color: Color, near: f32, far: f32 },
    /// Point sprite size or opacity of the smoke material changed
    SmokeMaterialChanged { size: f32, opacity: f32 },
    /// Smoke base positions were re-sampled
    SmokeRefilled { count: usize },
    /// Orb mesh and halo sprites need rescaling
    OrbScaleChanged { scale: f32 },
    /// The glow texture of one orb must be regenerated for a new color
    RegenerateGlow { orb: usize, color: Color },
}

impl OverlayEvent {
    /// Whether `other` targets the same renderer state, so only the later one matters.
    pub fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::RegenerateGlow { orb: a, .. }, Self::RegenerateGlow { orb: b, .. }) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
