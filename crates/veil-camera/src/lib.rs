//! Veil Camera - Pointer parallax rig
//!
//! Translates the camera in X/Z toward a pointer-driven target while pulling
//! its orientation back to the pose captured at startup, so the view shifts
//! with the pointer but never turns to follow it.

mod rig;

pub use rig::{CameraPose, ParallaxRig};
