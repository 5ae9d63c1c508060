//! Configuration snapshot publisher
//!
//! The control panel edits configuration one field at a time. Each edit
//! produces a fresh immutable [`OverlayConfig`]; the driver grabs the current
//! snapshot once at the top of a frame and uses it for the whole frame, so a
//! half-applied edit is never observed.

use std::cell::RefCell;
use std::rc::Rc;

use veil_core::{ConfigChange, OverlayConfig};

struct StoreInner {
    current: Rc<OverlayConfig>,
    /// Edits not yet seen by the driver, at most one per field
    pending: Vec<ConfigChange>,
}

/// Shared, cloneable handle to the current configuration snapshot
#[derive(Clone)]
pub struct ConfigStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl ConfigStore {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                current: Rc::new(config),
                pending: Vec::new(),
            })),
        }
    }

    /// The current snapshot. Later edits never mutate a returned snapshot.
    pub fn snapshot(&self) -> Rc<OverlayConfig> {
        Rc::clone(&self.inner.borrow().current)
    }

    /// Publish a new snapshot with `change` applied (last write wins).
    ///
    /// Edits that leave the configuration unchanged are not queued. A queued
    /// edit to the same field is superseded, so the queue stays bounded by the
    /// number of fields even when nobody drains it.
    pub fn apply(&self, change: ConfigChange) -> Rc<OverlayConfig> {
        let mut inner = self.inner.borrow_mut();
        let next = inner.current.applied(&change);
        if next == *inner.current {
            return Rc::clone(&inner.current);
        }
        tracing::debug!(?change, "config change published");
        let next = Rc::new(next);
        inner.current = Rc::clone(&next);
        inner.pending.retain(|queued| !queued.same_field(&change));
        inner.pending.push(change);
        next
    }

    /// Take the changes applied since the last drain, oldest first.
    pub fn drain_changes(&self) -> Vec<ConfigChange> {
        std::mem::take(&mut self.inner.borrow_mut().pending)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
