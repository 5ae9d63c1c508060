//! Veil Core - Foundational types for the Veil overlay engine
//!
//! This crate provides the types every other Veil crate depends on:
//! - `Vec3`, `Color`, `Spherical` - Spatial and color types
//! - `OverlayConfig` / `ConfigChange` - The tunable parameter snapshot and its edits
//! - `Smoothing` - Exponential blend factors, optionally decoupled from frame rate
//! - Error types and Result alias

mod config;
mod error;
mod smoothing;
mod types;

pub use config::{ConfigChange, OverlayConfig};
pub use error::{Result, VeilError};
pub use smoothing::{approach, Smoothing, SmoothingMode};
pub use types::{Color, Spherical, Vec3};
