//! Pointer input: a single latest-wins sample shared with the host's event loop

use std::cell::Cell;
use std::rc::Rc;

/// Normalized pointer position, both axes in [-1, 1], origin at the window center
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Normalize a cursor position in window pixels. A zero-sized window maps to the center.
    pub fn from_window(px: f64, py: f64, width: f64, height: f64) -> Self {
        let axis = |p: f64, extent: f64| {
            if extent > 0.0 {
                ((p / extent - 0.5) * 2.0) as f32
            } else {
                0.0
            }
        };
        Self::new(axis(px, width), axis(py, height))
    }
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-1.0, 1.0)
    }
}

/// Shared handle to the most recent pointer sample.
///
/// The host's input callbacks call [`record`](Self::record); the driver reads
/// [`latest`](Self::latest) once per frame. Samples arriving between frames
/// overwrite each other.
#[derive(Clone, Default)]
pub struct PointerInput {
    latest: Rc<Cell<PointerSample>>,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: PointerSample) {
        self.latest.set(sample);
    }

    /// Record a cursor move in window pixels
    pub fn record_window(&self, px: f64, py: f64, width: f64, height: f64) {
        self.record(PointerSample::from_window(px, py, width, height));
    }

    pub fn latest(&self) -> PointerSample {
        self.latest.get()
    }
}
