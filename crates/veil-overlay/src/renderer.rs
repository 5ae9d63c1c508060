//! The drawing seam between the simulation and the host's scene graph

use veil_camera::CameraPose;
use veil_core::Color;
use veil_orbs::{OrbDrawData, OrbHalo};
use veil_particles::SmokeMaterial;

use crate::fog::FogParams;

/// Smoke arrays for one frame
#[derive(Debug)]
pub struct SmokeDrawData<'a> {
    /// Flat `x, y, z, ...` positions in field-local space
    pub positions: &'a [f32],
    /// Rotation of the whole field around +Y, in radians
    pub rotation_y: f32,
}

/// Receives everything the overlay produces.
///
/// Per-frame methods are called once per frame, in the order camera, smoke,
/// orbs. The remaining hooks fire only when the corresponding setting
/// changes (and once at startup).
pub trait OverlayRenderer {
    fn set_camera(&mut self, pose: CameraPose);

    fn update_smoke(&mut self, smoke: &SmokeDrawData<'_>);

    /// One orb's position and trail; must not read past `orb.trail.len()`
    fn update_orb(&mut self, orb: &OrbDrawData<'_>);

    /// Build a fresh glow texture for orb `orb` in `color`
    fn regenerate_glow(&mut self, orb: usize, color: Color);

    fn set_fog(&mut self, _fog: &FogParams) {}

    fn set_smoke_material(&mut self, _material: &SmokeMaterial) {}

    /// Smoke base positions were re-sampled; the next `update_smoke` carries them
    fn smoke_refilled(&mut self, _count: usize) {}

    fn set_orb_scale(&mut self, _halo: OrbHalo) {}
}
