//! Collaborators the embedding application provides

use std::time::Instant;

use veil_camera::CameraPose;
use veil_runtime::PointerInput;

/// What the host hands the overlay at startup.
///
/// `renderer` and `pointer` are required; without either the overlay refuses
/// to start. A missing camera falls back to a default pose.
pub struct HostContext<R> {
    /// The scene the overlay draws into
    pub renderer: Option<R>,
    pub camera: Option<CameraPose>,
    pub pointer: Option<PointerInput>,
}

impl<R> HostContext<R> {
    pub fn new(renderer: R, pointer: PointerInput) -> Self {
        Self {
            renderer: Some(renderer),
            camera: None,
            pointer: Some(pointer),
        }
    }

    pub fn with_camera(mut self, camera: CameraPose) -> Self {
        self.camera = Some(camera);
        self
    }
}

/// Display-refresh callbacks.
///
/// Each call blocks until the next refresh and returns its timestamp, or
/// `None` once the host tears the surface down.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Instant>;
}
