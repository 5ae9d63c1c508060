//! Default config command

use anyhow::{Context, Result};
use veil_core::OverlayConfig;

pub fn run() -> Result<()> {
    let text = OverlayConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    print!("{}", text);
    Ok(())
}
