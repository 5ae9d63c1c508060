//! Veil Overlay - Per-frame animation driver
//!
//! Wires the overlay together:
//! - `Overlay` - initializes every system and advances them in a fixed order
//! - `HostContext` - collaborators supplied by the embedding application
//! - `OverlayRenderer` - the drawing seam; receives arrays, poses and asset requests
//! - `FrameSource` - display-refresh timestamps; the loop runs until it ends
//! - `ControlPanel` - slider/color controls that turn raw input into config edits
//! - `FogParams` - scene fog settings

mod driver;
mod fog;
mod host;
mod panel;
mod renderer;

pub use driver::Overlay;
pub use fog::FogParams;
pub use host::{FrameSource, HostContext};
pub use panel::{ControlKind, ControlPanel, ControlSpec};
pub use renderer::{OverlayRenderer, SmokeDrawData};

pub use veil_camera::CameraPose;
pub use veil_core::{Color, ConfigChange, OverlayConfig, Result, VeilError};
pub use veil_orbs::{OrbDrawData, OrbHalo};
pub use veil_runtime::{ConfigStore, PointerInput, PointerSample};
