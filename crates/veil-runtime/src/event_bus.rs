//! Renderer requests raised while a frame's config edits are applied

use crate::event::OverlayEvent;

/// Pending renderer requests, at most one per target.
///
/// Systems push while reacting to config edits; the driver drains once per
/// frame. A request for a target that is already queued overwrites it in
/// place, so a burst of slider edits reaches the renderer as a single update
/// carrying the final value.
#[derive(Default)]
pub struct EventBus {
    queued: Vec<OverlayEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: OverlayEvent) {
        match self.queued.iter_mut().find(|q| q.same_target(&event)) {
            Some(slot) => *slot = event,
            None => self.queued.push(event),
        }
    }

    /// Take every queued request in first-raised order.
    pub fn drain(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.queued)
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }
}
