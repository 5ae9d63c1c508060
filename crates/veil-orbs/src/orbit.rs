//! Periodic orbit target generator

use rand::Rng;
use std::f32::consts::TAU;
use veil_core::Vec3;

/// Orbit parameters for one orb.
///
/// The target traces a Lissajous-like ellipse: slightly different angular
/// rates on X (0.9) and Z (1.05), flattened to 70% depth, phase-shifted by
/// the orb's index so orbs sharing parameters still separate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitMotion {
    pub angle: f32,
    pub radius: f32,
    pub speed_factor: f32,
    pub index_bias: f32,
}

impl OrbitMotion {
    pub const X_RATE: f32 = 0.9;
    pub const Z_RATE: f32 = 1.05;
    pub const DEPTH_SCALE: f32 = 0.7;

    /// Random orbit: angle in [0, 2π), radius in [4, 9), speed in [0.2, 1.0)
    pub fn random(index: usize, rng: &mut impl Rng) -> Self {
        Self {
            angle: rng.gen::<f32>() * TAU,
            radius: rng.gen_range(4.0..9.0),
            speed_factor: rng.gen_range(0.2..1.0),
            index_bias: index as f32,
        }
    }

    pub fn advance(&mut self, dt: f32, global_speed: f32) {
        self.angle += dt * self.speed_factor * global_speed;
    }

    /// Where the orb is heading this frame
    pub fn target(&self, altitude: f32) -> Vec3 {
        Vec3::new(
            (self.angle * Self::X_RATE + self.index_bias).cos() * self.radius,
            altitude,
            (self.angle * Self::Z_RATE - self.index_bias).sin() * self.radius * Self::DEPTH_SCALE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn random_parameters_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..200 {
            let m = OrbitMotion::random(i, &mut rng);
            assert!(m.angle >= 0.0 && m.angle < TAU);
            assert!(m.radius >= 4.0 && m.radius < 9.0);
            assert!(m.speed_factor >= 0.2 && m.speed_factor < 1.0);
            assert_eq!(m.index_bias, i as f32);
        }
    }

    #[test]
    fn advance_scales_by_speed_factor_and_global_speed() {
        let mut m = OrbitMotion {
            angle: 1.0,
            radius: 5.0,
            speed_factor: 0.5,
            index_bias: 0.0,
        };
        m.advance(2.0, 3.0);
        assert!((m.angle - 4.0).abs() < 1e-6);
    }

    #[test]
    fn target_x_follows_cosine_over_quarter_turn() {
        let mut m = OrbitMotion {
            angle: 0.0,
            radius: 5.0,
            speed_factor: 1.0,
            index_bias: 0.0,
        };
        let steps = 90;
        let dt = FRAC_PI_2 / steps as f32;
        for _ in 0..steps {
            m.advance(dt, 1.0);
            let t = m.target(0.0);
            assert!((t.x - (0.9 * m.angle).cos() * 5.0).abs() < 1e-4);
        }
        assert!((m.angle - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn target_uses_altitude_and_depth_scale() {
        let m = OrbitMotion {
            angle: 0.0,
            radius: 4.0,
            speed_factor: 1.0,
            index_bias: -FRAC_PI_2,
        };
        let t = m.target(5.0);
        assert_eq!(t.y, 5.0);
        // sin(0 - (-π/2)) = 1 → z = radius * 0.7
        assert!((t.z - 2.8).abs() < 1e-5);
    }
}
