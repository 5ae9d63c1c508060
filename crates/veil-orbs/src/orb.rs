//! A single orb: smoothed position, orbit, color and trail

use rand::Rng;
use veil_core::{Color, OverlayConfig, Vec3};

use crate::orbit::OrbitMotion;
use crate::trail::TrailBuffer;

/// Per-frame blend toward the orbit target, tuned at the reference refresh rate
pub const ORB_BLEND: f32 = 0.12;

/// Scales of the orb core and its three additive halo sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbHalo {
    pub core: f32,
    pub inner: f32,
    pub outer: f32,
    pub glow: f32,
}

impl OrbHalo {
    pub fn for_scale(scale: f32) -> Self {
        Self {
            core: scale,
            inner: 0.6 * scale,
            outer: 1.8 * scale,
            glow: 3.6 * scale,
        }
    }
}

/// Render-ready view of one orb
#[derive(Debug)]
pub struct OrbDrawData<'a> {
    pub index: usize,
    pub position: [f32; 3],
    pub color: Color,
    pub halo: OrbHalo,
    /// Trail points, most recent first; the length is the draw range
    pub trail: &'a [[f32; 3]],
}

impl OrbDrawData<'_> {
    /// Trail as a flat `x, y, z, ...` array
    pub fn trail_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.trail)
    }
}

pub struct Orb {
    index: usize,
    pub color: Color,
    pub motion: OrbitMotion,
    pub position: Vec3,
    trail: TrailBuffer,
}

impl Orb {
    pub fn new(
        index: usize,
        color: Color,
        motion: OrbitMotion,
        position: Vec3,
        trail_capacity: usize,
    ) -> Self {
        Self {
            index,
            color,
            motion,
            position,
            trail: TrailBuffer::new(trail_capacity),
        }
    }

    /// Random orbit and a random start point above the smoke, x/z in [-3, 3), y in [1.5, 3.5)
    pub fn spawn(index: usize, config: &OverlayConfig, rng: &mut impl Rng) -> Self {
        let motion = OrbitMotion::random(index, rng);
        let position = Vec3::new(
            (rng.gen::<f32>() - 0.5) * 6.0,
            1.5 + rng.gen::<f32>() * 2.0,
            (rng.gen::<f32>() - 0.5) * 6.0,
        );
        Self::new(
            index,
            config.orb_color(index),
            motion,
            position,
            config.trail_capacity,
        )
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Apply a new requested trail length right away, clamped to capacity.
    pub fn set_trail_len(&mut self, config: &OverlayConfig) {
        let active = config.trail_len(self.trail.capacity());
        self.trail.set_active_len(active);
    }

    /// Advance the orbit, chase the new target by `blend`, and record the trail.
    pub fn step(&mut self, dt: f32, config: &OverlayConfig, blend: f32) {
        self.motion.advance(dt, config.orb_speed);
        let target = self.motion.target(config.orbs_y);
        self.position = self.position.approach(target, blend);
        let active = config.trail_len(self.trail.capacity());
        self.trail.push(self.position.to_array(), active);
    }

    pub fn draw_data(&mut self, scale: f32) -> OrbDrawData<'_> {
        OrbDrawData {
            index: self.index,
            position: self.position.to_array(),
            color: self.color,
            halo: OrbHalo::for_scale(scale),
            trail: self.trail.ordered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_orb() -> Orb {
        let motion = OrbitMotion {
            angle: 0.0,
            radius: 5.0,
            speed_factor: 1.0,
            index_bias: 0.0,
        };
        Orb::new(0, Color::WHITE, motion, Vec3::ZERO, 120)
    }

    #[test]
    fn spawn_places_orb_above_smoke() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = OverlayConfig::default();
        for i in 0..config.orb_count {
            let orb = Orb::spawn(i, &config, &mut rng);
            assert!(orb.position.x >= -3.0 && orb.position.x < 3.0);
            assert!(orb.position.y >= 1.5 && orb.position.y < 3.5);
            assert_eq!(orb.color, config.orb_colors[i]);
            assert_eq!(orb.trail().capacity(), 120);
        }
    }

    #[test]
    fn step_blends_toward_target_per_axis() {
        let mut orb = still_orb();
        let mut config = OverlayConfig::default();
        config.orb_speed = 0.0;
        config.orbs_y = 5.0;
        orb.step(0.016, &config, ORB_BLEND);
        // Target is (5, 5, 0) with a frozen angle of zero
        assert!((orb.position.x - 0.6).abs() < 1e-6);
        assert!((orb.position.y - 0.6).abs() < 1e-6);
        assert!(orb.position.z.abs() < 1e-6);
    }

    #[test]
    fn smoothing_never_overshoots() {
        let mut orb = still_orb();
        let mut config = OverlayConfig::default();
        config.orb_speed = 0.0;
        for _ in 0..500 {
            orb.step(0.016, &config, ORB_BLEND);
            assert!(orb.position.x <= 5.0 + 1e-5);
        }
        assert!((orb.position.x - 5.0).abs() < 1e-3);
    }

    #[test]
    fn step_records_trail_head() {
        let mut orb = still_orb();
        let mut config = OverlayConfig::default();
        config.trail_length = 3;
        for _ in 0..5 {
            orb.step(0.016, &config, ORB_BLEND);
        }
        assert_eq!(orb.trail().len(), 3);
        assert_eq!(orb.trail().get(0), Some(orb.position.to_array()));
    }

    #[test]
    fn negative_trail_length_hides_trail() {
        let mut orb = still_orb();
        let mut config = OverlayConfig::default();
        config.trail_length = -10;
        orb.step(0.016, &config, ORB_BLEND);
        assert!(orb.trail().is_empty());
    }

    #[test]
    fn draw_data_carries_halo_and_trail() {
        let mut orb = still_orb();
        let config = OverlayConfig::default();
        orb.step(0.016, &config, ORB_BLEND);
        orb.step(0.016, &config, ORB_BLEND);
        let data = orb.draw_data(2.0);
        assert_eq!(data.trail.len(), 2);
        assert_eq!(data.halo, OrbHalo::for_scale(2.0));
        assert!((data.halo.glow - 7.2).abs() < 1e-6);
        assert_eq!(data.trail_flat().len(), 6);
    }
}
