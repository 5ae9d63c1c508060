//! Overlay system trait

use veil_core::{ConfigChange, OverlayConfig, Result};

use crate::event_bus::EventBus;
use crate::pointer::PointerSample;

/// Everything a system may read during one frame.
///
/// `config` and `pointer` are snapshots taken once at the top of the frame.
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Milliseconds since the first frame
    pub elapsed_ms: f64,
    pub frame: u64,
    pub config: &'a OverlayConfig,
    pub pointer: PointerSample,
}

/// A component advanced by the animation driver.
///
/// Systems are updated in a fixed registration order. Configuration edits are
/// delivered through `on_config_change` before the frame that first sees them.
pub trait OverlaySystem {
    /// Called once, before the first frame
    fn initialize(&mut self, config: &OverlayConfig, events: &mut EventBus) -> Result<()>;

    /// Called for each configuration edit, with the snapshot that includes it
    fn on_config_change(
        &mut self,
        _change: &ConfigChange,
        _config: &OverlayConfig,
        _events: &mut EventBus,
    ) {
    }

    /// Called once per frame
    fn update(&mut self, frame: &FrameContext<'_>);

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
