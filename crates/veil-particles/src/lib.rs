//! Veil Particles - Ambient smoke field
//!
//! A fixed-count point cloud with:
//! - Base positions sampled once from a box sized by the smoke spread
//! - Per-particle vertical bob layered on the immutable base
//! - Bulk rotation around +Y exposed as a transform, never baked into positions
//! - A flat position array ready for upload

pub mod smoke;

pub use smoke::{SmokeField, SmokeMaterial, SmokeParticle};
