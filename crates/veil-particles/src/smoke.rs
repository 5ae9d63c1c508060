//! Smoke point cloud: immutable base layout, per-frame vertical bob and bulk rotation

use rand::rngs::StdRng;
use rand::Rng;
use veil_core::{ConfigChange, OverlayConfig, Result, Vec3};
use veil_runtime::{EventBus, FrameContext, OverlayEvent, OverlaySystem};

/// Amplitude of the per-particle vertical bob
const BOB_AMPLITUDE: f64 = 0.02;
/// Phase advance per elapsed millisecond
const BOB_TIME_SCALE: f64 = 0.0004;
/// Angular frequency applied to the combined phase
const BOB_FREQUENCY: f64 = 0.5;

/// Point sprite material forwarded to the renderer, drawn with additive blending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmokeMaterial {
    pub size: f32,
    pub opacity: f32,
}

impl SmokeMaterial {
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self {
            size: config.particle_size,
            opacity: config.particle_opacity,
        }
    }
}

/// One smoke particle's sampled state
#[derive(Debug, Clone, Copy)]
pub struct SmokeParticle {
    /// Position relative to the field center; never changes after sampling
    pub base: Vec3,
    /// Random factor in [0.1, 0.7). Sampled but not consumed by the current motion.
    pub speed: f32,
}

/// Fixed-count smoke point cloud
pub struct SmokeField {
    particles: Vec<SmokeParticle>,
    /// Render positions, rewritten every frame from `particles`
    positions: Vec<[f32; 3]>,
    /// Bulk rotation around +Y in radians
    rotation_y: f32,
    spread: f32,
    material: SmokeMaterial,
    rng: StdRng,
}

impl SmokeField {
    /// Sample `count` particles inside a box of full extents `(2, 1, 2) * spread`.
    pub fn initialize(count: usize, spread: f32, material: SmokeMaterial, rng: StdRng) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(count),
            positions: vec![[0.0; 3]; count],
            rotation_y: 0.0,
            spread,
            material,
            rng,
        };
        field.fill(count);
        field.write_positions(0.0, 0.0);
        field
    }

    pub fn from_config(config: &OverlayConfig, rng: StdRng) -> Self {
        Self::initialize(
            config.particle_count,
            config.smoke_spread,
            SmokeMaterial::from_config(config),
            rng,
        )
    }

    /// Re-sample every base position for a new spread. Count is unchanged.
    pub fn refill(&mut self, spread: f32) {
        self.spread = spread;
        let count = self.particles.len();
        self.fill(count);
    }

    fn fill(&mut self, count: usize) {
        let extents = Vec3::new(self.spread * 2.0, self.spread, self.spread * 2.0);
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend((0..count).map(|_| SmokeParticle {
            base: Vec3::new(
                (rng.gen::<f32>() - 0.5) * extents.x,
                (rng.gen::<f32>() - 0.5) * extents.y,
                (rng.gen::<f32>() - 0.5) * extents.z,
            ),
            speed: rng.gen_range(0.1..0.7),
        }));
    }

    /// Advance the bulk rotation by `dt` and rewrite every render position.
    pub fn advance(&mut self, dt: f32, elapsed_ms: f64, config: &OverlayConfig) {
        self.rotation_y += dt * config.smoke_rot_speed;
        self.write_positions(elapsed_ms, config.particle_y);
    }

    fn write_positions(&mut self, elapsed_ms: f64, particle_y: f32) {
        let phase = elapsed_ms * BOB_TIME_SCALE;
        for (i, (out, p)) in self.positions.iter_mut().zip(&self.particles).enumerate() {
            let bob = ((phase + i as f64) * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
            *out = [p.base.x, p.base.y + bob as f32 + particle_y, p.base.z];
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[SmokeParticle] {
        &self.particles
    }

    /// Render positions in field-local space
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Render positions as a flat `x, y, z, x, y, z, ...` array
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the position array for direct buffer upload
    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Position of particle `i` with the bulk rotation applied
    pub fn world_position(&self, i: usize) -> Option<Vec3> {
        self.positions
            .get(i)
            .map(|p| Vec3::from_array(*p).rotated_y(self.rotation_y))
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn spread(&self) -> f32 {
        self.spread
    }

    pub fn material(&self) -> SmokeMaterial {
        self.material
    }
}

impl OverlaySystem for SmokeField {
    fn initialize(&mut self, config: &OverlayConfig, events: &mut EventBus) -> Result<()> {
        tracing::info!(
            count = self.len(),
            spread = self.spread,
            "smoke field sampled"
        );
        self.material = SmokeMaterial::from_config(config);
        events.push(OverlayEvent::SmokeMaterialChanged {
            size: self.material.size,
            opacity: self.material.opacity,
        });
        Ok(())
    }

    fn on_config_change(
        &mut self,
        change: &ConfigChange,
        config: &OverlayConfig,
        events: &mut EventBus,
    ) {
        match change {
            ConfigChange::SmokeSpread(spread) => {
                self.refill(*spread);
                events.push(OverlayEvent::SmokeRefilled { count: self.len() });
            }
            ConfigChange::ParticleSize(_) | ConfigChange::ParticleOpacity(_) => {
                self.material = SmokeMaterial::from_config(config);
                events.push(OverlayEvent::SmokeMaterialChanged {
                    size: self.material.size,
                    opacity: self.material.opacity,
                });
            }
            _ => {}
        }
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        self.advance(frame.dt, frame.elapsed_ms, frame.config);
    }

    fn name(&self) -> &str {
        "smoke"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn field(count: usize, spread: f32) -> SmokeField {
        let config = OverlayConfig::default();
        SmokeField::initialize(
            count,
            spread,
            SmokeMaterial::from_config(&config),
            StdRng::seed_from_u64(7),
        )
    }

    #[test]
    fn samples_inside_box() {
        let f = field(500, 3.0);
        assert_eq!(f.len(), 500);
        for p in f.particles() {
            assert!(p.base.x >= -3.0 && p.base.x < 3.0);
            assert!(p.base.y >= -1.5 && p.base.y < 1.5);
            assert!(p.base.z >= -3.0 && p.base.z < 3.0);
            assert!(p.speed >= 0.1 && p.speed < 0.7);
        }
    }

    #[test]
    fn xz_never_drift() {
        let mut f = field(200, 3.0);
        let config = OverlayConfig::default();
        let mut elapsed = 0.0;
        for _ in 0..500 {
            elapsed += 16.7;
            f.advance(1.0 / 60.0, elapsed, &config);
        }
        for (pos, p) in f.positions().iter().zip(f.particles()) {
            assert_eq!(pos[0], p.base.x);
            assert_eq!(pos[2], p.base.z);
        }
    }

    #[test]
    fn y_stays_within_bob_band() {
        let mut f = field(100, 2.0);
        let mut config = OverlayConfig::default();
        config.particle_y = 1.25;
        for step in 0..300 {
            f.advance(0.016, step as f64 * 37.0, &config);
            for (pos, p) in f.positions().iter().zip(f.particles()) {
                let lo = p.base.y - 0.02 + config.particle_y;
                let hi = p.base.y + 0.02 + config.particle_y;
                assert!(pos[1] >= lo - 1e-5 && pos[1] <= hi + 1e-5);
            }
        }
    }

    #[test]
    fn bob_follows_sine_of_time_and_index() {
        let mut f = field(4, 0.0);
        let mut config = OverlayConfig::default();
        config.particle_y = 0.0;
        f.advance(0.0, 2500.0, &config);
        for (i, pos) in f.positions().iter().enumerate() {
            let expected = ((2500.0 * 0.0004 + i as f64) * 0.5).sin() * 0.02;
            assert!((pos[1] as f64 - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_spread_collapses_to_axis() {
        let mut f = field(50, 0.0);
        f.advance(0.016, 1000.0, &OverlayConfig::default());
        for pos in f.positions() {
            assert_eq!(pos[0], 0.0);
            assert_eq!(pos[2], 0.0);
        }
    }

    #[test]
    fn rotation_accumulates_with_dt() {
        let mut f = field(1, 1.0);
        let mut config = OverlayConfig::default();
        config.smoke_rot_speed = 0.5;
        for _ in 0..10 {
            f.advance(0.1, 0.0, &config);
        }
        assert!((f.rotation_y() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn world_position_applies_rotation_only() {
        let mut f = field(8, 2.0);
        let mut config = OverlayConfig::default();
        config.smoke_rot_speed = 1.0;
        f.advance(0.75, 0.0, &config);
        for i in 0..f.len() {
            let local = Vec3::from_array(f.positions()[i]);
            let world = f.world_position(i).unwrap();
            assert_eq!(world.y, local.y);
            let radial = |v: Vec3| (v.x * v.x + v.z * v.z).sqrt();
            assert!((radial(world) - radial(local)).abs() < 1e-5);
        }
        assert!(f.world_position(8).is_none());
    }

    #[test]
    fn refill_keeps_count_and_resamples() {
        let mut f = field(64, 1.0);
        let before: Vec<f32> = f.particles().iter().map(|p| p.base.x).collect();
        f.refill(4.0);
        assert_eq!(f.len(), 64);
        assert!((f.spread() - 4.0).abs() < 1e-6);
        let after: Vec<f32> = f.particles().iter().map(|p| p.base.x).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn flat_view_matches_positions() {
        let f = field(3, 1.0);
        let flat = f.positions_flat();
        assert_eq!(flat.len(), 9);
        assert_eq!(flat[3], f.positions()[1][0]);
        assert_eq!(f.positions_bytes().len(), 36);
    }

    #[test]
    fn spread_change_raises_refill_event() {
        let mut f = field(10, 1.0);
        let config = OverlayConfig::default();
        let mut events = EventBus::new();
        f.on_config_change(&ConfigChange::SmokeSpread(2.0), &config, &mut events);
        assert_eq!(
            events.drain(),
            vec![OverlayEvent::SmokeRefilled { count: 10 }]
        );
    }

    #[test]
    fn material_change_raises_event() {
        let mut f = field(10, 1.0);
        let config = OverlayConfig::default().applied(&ConfigChange::ParticleSize(90.0));
        let mut events = EventBus::new();
        f.on_config_change(&ConfigChange::ParticleSize(90.0), &config, &mut events);
        assert!((f.material().size - 90.0).abs() < 1e-6);
        assert_eq!(events.len(), 1);
    }
}
