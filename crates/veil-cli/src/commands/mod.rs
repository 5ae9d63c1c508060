//! CLI command implementations

pub mod controls;
pub mod defaults;
pub mod run;

use anyhow::{Context, Result};
use std::path::Path;
use veil_core::OverlayConfig;

/// Load `path` if given, otherwise the defaults.
pub fn load_config(path: Option<&str>) -> Result<OverlayConfig> {
    match path {
        Some(path) => OverlayConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(OverlayConfig::default()),
    }
}
