//! Spatial and common types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::error::VeilError;
use crate::smoothing::approach;

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Move each axis a fraction `t` of the way toward `target`.
    pub fn approach(&self, target: Self, t: f32) -> Self {
        Self {
            x: approach(self.x, target.x, t),
            y: approach(self.y, target.y, t),
            z: approach(self.z, target.z, t),
        }
    }

    /// Rotate around the vertical axis by `angle` radians (right-handed, +Y up).
    pub fn rotated_y(&self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: self.x * c + self.z * s,
            y: self.y,
            z: -self.x * s + self.z * c,
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Polar decomposition of a point relative to an origin.
///
/// `phi` is the polar angle from +Y, `theta` the azimuth around +Y measured
/// from +Z toward +X.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// RGBA color. Serialized as a `#rrggbb` string.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn parse(s: &str) -> Result<Self, VeilError> {
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VeilError::InvalidColor(s.to_string()));
        }
        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(VeilError::InvalidColor(s.to_string())),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Self::from_hex)
            .map_err(|_| VeilError::InvalidColor(s.to_string()))
    }

    pub fn to_hex_string(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = VeilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_approach_is_per_axis() {
        let v = Vec3::ZERO.approach(Vec3::new(10.0, -10.0, 4.0), 0.5);
        assert_eq!(v, Vec3::new(5.0, -5.0, 2.0));
    }

    #[test]
    fn test_rotated_y_quarter_turn() {
        let v = Vec3::new(0.0, 1.0, 1.0).rotated_y(FRAC_PI_2);
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!(v.z.abs() < 1e-6);
    }

    #[test]
    fn test_spherical_of_camera_on_z_axis() {
        let s = Spherical::from_vec3(Vec3::new(0.0, 0.0, 10.0));
        assert!((s.radius - 10.0).abs() < 1e-6);
        assert!((s.phi - FRAC_PI_2).abs() < 1e-6);
        assert!(s.theta.abs() < 1e-6);
    }

    #[test]
    fn test_spherical_reconstructs_point() {
        let p = Vec3::new(-3.0, 2.0, 4.5);
        let back = Spherical::from_vec3(p).to_vec3();
        assert!(back.distance(&p) < 1e-4);
    }

    #[test]
    fn test_spherical_origin_is_degenerate() {
        assert_eq!(Spherical::from_vec3(Vec3::ZERO), Spherical::default());
        let below = Spherical::from_vec3(Vec3::new(0.0, -2.0, 0.0));
        assert!((below.phi - PI).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xFF8844);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);
    }

    #[test]
    fn test_color_parse_forms() {
        assert_eq!(Color::parse("#ff3aff").unwrap(), Color::from_hex(0xff3aff));
        assert_eq!(Color::parse("47d1ff").unwrap(), Color::from_hex(0x47d1ff));
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("+fffff").is_err());
        assert!(Color::parse("#+ff").is_err());
        assert!(Color::parse("-1").is_err());
    }

    #[test]
    fn test_color_hex_string() {
        assert_eq!(Color::from_hex(0x9cff4a).to_hex_string(), "#9cff4a");
        assert_eq!(Color::BLACK.to_hex_string(), "#000000");
    }
}
