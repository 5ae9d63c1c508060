//! Camera parallax rig

use glam::Quat;
use veil_core::{approach, OverlayConfig, Result, Smoothing, Spherical, Vec3};
use veil_runtime::{EventBus, FrameContext, OverlaySystem, PointerSample};

/// Fraction of the parallax amount one unit of pointer travel moves the target
const POINTER_GAIN: f32 = 0.25;
/// Maximum Z excursion from the base, as a fraction of the parallax amount
const Z_LIMIT: f32 = 0.6;
/// Per-frame blend of X/Z toward the target
const POSITION_BLEND: f32 = 0.04;
/// Per-frame spherical blend of orientation back to the base
const ORIENTATION_BLEND: f32 = 0.08;

/// A camera position and orientation as exchanged with the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Quaternion rotation [x, y, z, w]
    pub orientation: [f32; 4],
}

impl CameraPose {
    /// Pose used when the host supplies no camera
    pub const FALLBACK: Self = Self {
        position: Vec3::new(0.0, 0.0, 10.0),
        orientation: [0.0, 0.0, 0.0, 1.0],
    };
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Smoothed camera offset around a fixed base pose
pub struct ParallaxRig {
    base_position: Vec3,
    base_orientation: Quat,
    /// Base position relative to `look_target`, kept for orbit-preserving motion
    base_orbit: Spherical,
    look_target: Vec3,
    position: Vec3,
    orientation: Quat,
}

impl ParallaxRig {
    /// Capture the base pose. `None` falls back to [`CameraPose::FALLBACK`].
    pub fn capture(pose: Option<CameraPose>, look_target: Vec3) -> Self {
        let pose = pose.unwrap_or(CameraPose::FALLBACK);
        let base_orientation = to_glam_quat(pose.orientation);
        let base_orbit = Spherical::from_vec3(pose.position - look_target);
        Self {
            base_position: pose.position,
            base_orientation,
            base_orbit,
            look_target,
            position: pose.position,
            orientation: base_orientation,
        }
    }

    /// Advance one frame toward the pointer-driven target.
    pub fn advance(
        &mut self,
        pointer: PointerSample,
        parallax: f32,
        smoothing: &Smoothing,
        dt: f32,
    ) {
        let parallax = if parallax.is_finite() { parallax } else { 0.0 };
        let target_x = self.base_position.x + pointer.x * parallax * POINTER_GAIN;
        let limit = Z_LIMIT * parallax.abs();
        let target_z = (self.base_position.z + pointer.y * parallax * POINTER_GAIN).clamp(
            self.base_position.z - limit,
            self.base_position.z + limit,
        );

        let t = smoothing.blend(POSITION_BLEND, dt);
        self.position.x = approach(self.position.x, target_x, t);
        self.position.z = approach(self.position.z, target_z, t);

        let r = smoothing.blend(ORIENTATION_BLEND, dt);
        self.orientation = self.orientation.slerp(self.base_orientation, r).normalize();
    }

    /// Accept a pose the host changed behind the rig's back (e.g. a scripted nudge).
    /// The base pose is never touched.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.orientation = to_glam_quat(pose.orientation);
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            orientation: self.orientation.to_array(),
        }
    }

    pub fn base_pose(&self) -> CameraPose {
        CameraPose {
            position: self.base_position,
            orientation: self.base_orientation.to_array(),
        }
    }

    pub fn base_orbit(&self) -> Spherical {
        self.base_orbit
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Angle in radians between the live and base orientation
    pub fn orientation_error(&self) -> f32 {
        self.orientation.angle_between(self.base_orientation)
    }
}

impl OverlaySystem for ParallaxRig {
    fn initialize(&mut self, _config: &OverlayConfig, _events: &mut EventBus) -> Result<()> {
        tracing::info!(
            x = self.base_position.x,
            y = self.base_position.y,
            z = self.base_position.z,
            radius = self.base_orbit.radius,
            phi = self.base_orbit.phi,
            theta = self.base_orbit.theta,
            "camera base pose captured"
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        self.advance(
            frame.pointer,
            frame.config.parallax_amount,
            &frame.config.smoothing,
            frame.dt,
        );
    }

    fn name(&self) -> &str {
        "camera"
    }
}

/// Convert an [x, y, z, w] array to a normalized glam quaternion
fn to_glam_quat(q: [f32; 4]) -> Quat {
    let quat = Quat::from_array(q);
    if quat.length_squared() > 0.0 {
        quat.normalize()
    } else {
        Quat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn rig() -> ParallaxRig {
        ParallaxRig::capture(
            Some(CameraPose {
                position: Vec3::new(1.0, 2.0, 8.0),
                orientation: [0.0, 0.0, 0.0, 1.0],
            }),
            Vec3::ZERO,
        )
    }

    #[test]
    fn missing_camera_uses_fallback() {
        let r = ParallaxRig::capture(None, Vec3::ZERO);
        assert_eq!(r.base_pose(), CameraPose::FALLBACK);
        assert!((r.base_orbit().radius - 10.0).abs() < 1e-6);
    }

    #[test]
    fn base_orbit_is_relative_to_look_target() {
        let r = ParallaxRig::capture(
            Some(CameraPose {
                position: Vec3::new(0.0, 3.0, 4.0),
                orientation: [0.0, 0.0, 0.0, 1.0],
            }),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert!((r.base_orbit().radius - 4.0).abs() < 1e-6);
        assert!((r.base_orbit().phi - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn z_offset_stays_within_limit() {
        let mut r = rig();
        let smoothing = Smoothing::default();
        let parallax = 2.5;
        for i in 0..2000 {
            let sign = if (i / 100) % 2 == 0 { 1.0 } else { -1.0 };
            r.advance(PointerSample::new(sign, sign), parallax, &smoothing, DT);
            assert!((r.pose().position.z - 8.0).abs() <= Z_LIMIT * parallax + 1e-5);
        }
    }

    #[test]
    fn y_is_never_touched() {
        let mut r = rig();
        for _ in 0..100 {
            r.advance(PointerSample::new(1.0, -1.0), 5.0, &Smoothing::default(), DT);
        }
        assert_eq!(r.pose().position.y, 2.0);
    }

    #[test]
    fn converges_to_pointer_target() {
        let mut r = rig();
        for _ in 0..1000 {
            r.advance(PointerSample::new(1.0, 0.5), 4.0, &Smoothing::default(), DT);
        }
        let p = r.pose().position;
        assert!((p.x - (1.0 + 1.0 * 4.0 * 0.25)).abs() < 1e-3);
        assert!((p.z - (8.0 + 0.5 * 4.0 * 0.25)).abs() < 1e-3);
    }

    #[test]
    fn zero_parallax_holds_base_position() {
        let mut r = rig();
        for i in 0..300 {
            let x = ((i as f32) * 0.1).sin();
            r.advance(PointerSample::new(x, -x), 0.0, &Smoothing::default(), DT);
        }
        assert!(r.pose().position.distance(&Vec3::new(1.0, 2.0, 8.0)) < 1e-6);
    }

    #[test]
    fn negative_parallax_does_not_panic() {
        let mut r = rig();
        r.advance(PointerSample::new(1.0, 1.0), -3.0, &Smoothing::default(), DT);
        assert!((r.pose().position.z - 8.0).abs() <= 1.8 + 1e-5);
    }

    #[test]
    fn non_finite_parallax_holds_position() {
        let mut r = rig();
        for parallax in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            r.advance(PointerSample::new(1.0, 1.0), parallax, &Smoothing::default(), DT);
        }
        assert!(r.pose().position.distance(&Vec3::new(1.0, 2.0, 8.0)) < 1e-6);
    }

    #[test]
    fn orientation_error_strictly_decreases() {
        let mut r = rig();
        let tilted = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(0.3);
        r.set_pose(CameraPose {
            position: r.pose().position,
            orientation: tilted.to_array(),
        });
        let mut last = r.orientation_error();
        assert!(last > 0.5);
        for _ in 0..40 {
            r.advance(PointerSample::new(0.8, 0.2), 2.5, &Smoothing::default(), DT);
            let err = r.orientation_error();
            assert!(err < last);
            last = err;
        }
    }

    #[test]
    fn pointer_never_rotates_camera() {
        let mut r = rig();
        for _ in 0..200 {
            r.advance(PointerSample::new(-1.0, 1.0), 12.0, &Smoothing::per_frame(), DT);
        }
        assert!(r.orientation_error() < 1e-4);
    }

    #[test]
    fn set_pose_keeps_base() {
        let mut r = rig();
        r.set_pose(CameraPose {
            position: Vec3::new(9.0, 9.0, 9.0),
            orientation: [0.0, 0.0, 0.0, 1.0],
        });
        assert_eq!(r.base_pose().position, Vec3::new(1.0, 2.0, 8.0));
    }
}
