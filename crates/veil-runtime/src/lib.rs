//! Veil Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the animation driver ticks with:
//! - `FrameClock` - per-frame delta and elapsed time
//! - `PointerInput` - latest-wins normalized pointer sample
//! - `ConfigStore` - publishes immutable configuration snapshots
//! - `OverlayEvent` / `EventBus` - requests flowing out to the renderer
//! - `OverlaySystem` - trait for components advanced once per frame
//! - `seeded_rng` - reproducible or entropy-seeded random streams

mod clock;
mod config_store;
mod event;
mod event_bus;
mod pointer;
mod rng;
mod system;

pub use clock::FrameClock;
pub use config_store::ConfigStore;
pub use event::OverlayEvent;
pub use event_bus::EventBus;
pub use pointer::{PointerInput, PointerSample};
pub use rng::seeded_rng;
pub use system::{FrameContext, OverlaySystem};
