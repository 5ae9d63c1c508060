//! Per-frame animation driver

use std::rc::Rc;
use std::time::Instant;

use veil_camera::ParallaxRig;
use veil_core::{Color, ConfigChange, OverlayConfig, Result, VeilError, Vec3};
use veil_orbs::{OrbHalo, OrbSwarm};
use veil_particles::SmokeField;
use veil_runtime::{
    seeded_rng, ConfigStore, EventBus, FrameClock, FrameContext, OverlayEvent, OverlaySystem,
    PointerInput,
};

use crate::fog::FogParams;
use crate::host::{FrameSource, HostContext};
use crate::renderer::{OverlayRenderer, SmokeDrawData};

const SMOKE_STREAM: u64 = 0;
const ORB_STREAM: u64 = 1;

/// The running overlay.
///
/// Each frame reads the configuration and pointer once, then advances the
/// camera, the smoke field and the orbs in that order before handing the
/// results to the renderer.
pub struct Overlay<R: OverlayRenderer> {
    renderer: R,
    store: ConfigStore,
    pointer: PointerInput,
    clock: FrameClock,
    events: EventBus,
    camera: ParallaxRig,
    smoke: SmokeField,
    orbs: OrbSwarm,
    fog: FogParams,
}

impl<R: OverlayRenderer> Overlay<R> {
    /// Build every system from the current configuration.
    ///
    /// Fails with [`VeilError::InitializationSkipped`] when the host did not
    /// supply a renderer or a pointer source; nothing is drawn in that case.
    pub fn init(host: HostContext<R>, store: ConfigStore) -> Result<Self> {
        let Some(renderer) = host.renderer else {
            tracing::warn!("no renderer supplied, overlay not started");
            return Err(VeilError::InitializationSkipped("renderer missing".into()));
        };
        let Some(pointer) = host.pointer else {
            tracing::warn!("no pointer source supplied, overlay not started");
            return Err(VeilError::InitializationSkipped(
                "pointer source missing".into(),
            ));
        };

        // Edits made before startup are already part of the snapshot
        store.drain_changes();
        let config = store.snapshot();

        let mut overlay = Self {
            renderer,
            pointer,
            clock: FrameClock::new(),
            events: EventBus::new(),
            camera: ParallaxRig::capture(host.camera, Vec3::ZERO),
            smoke: SmokeField::from_config(&config, seeded_rng(config.seed, SMOKE_STREAM)),
            orbs: OrbSwarm::from_config(&config, &mut seeded_rng(config.seed, ORB_STREAM)),
            fog: FogParams::from_config(&config),
            store,
        };

        let systems: [&mut dyn OverlaySystem; 3] =
            [&mut overlay.camera, &mut overlay.smoke, &mut overlay.orbs];
        for system in systems {
            system.initialize(&config, &mut overlay.events)?;
            tracing::debug!(system = system.name(), "system initialized");
        }
        overlay.events.push(fog_event(&overlay.fog));
        overlay.dispatch_events();

        tracing::info!(
            particles = overlay.smoke.len(),
            orbs = overlay.orbs.len(),
            seed = ?config.seed,
            "overlay started"
        );
        Ok(overlay)
    }

    /// Run one frame timed by the wall clock.
    pub fn frame(&mut self) {
        self.clock.tick();
        self.run_frame();
    }

    /// Run one frame for a display-refresh timestamp.
    pub fn frame_at(&mut self, now: Instant) {
        self.clock.tick_at(now);
        self.run_frame();
    }

    /// Run one frame of `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        self.clock.advance(dt);
        self.run_frame();
    }

    /// Drive frames until the source stops producing refreshes. Returns the
    /// number of frames run.
    pub fn run(&mut self, source: &mut impl FrameSource) -> u64 {
        let mut frames = 0;
        while let Some(now) = source.next_frame() {
            self.frame_at(now);
            frames += 1;
        }
        tracing::info!(frames, "frame source ended");
        frames
    }

    /// Change the fog range, and optionally its color.
    pub fn set_fog(&mut self, near: f32, far: f32, color: Option<Color>) {
        if let Some(color) = color {
            self.store.apply(ConfigChange::FogColor(color));
        }
        self.store.apply(ConfigChange::FogNear(near));
        self.store.apply(ConfigChange::FogFar(far));
        let config = self.store.snapshot();
        self.apply_pending_changes(&config);
        self.dispatch_events();
    }

    /// Recolor one orb; its glow is regenerated before this returns.
    pub fn set_orb_color(&mut self, index: usize, color: Color) -> Result<()> {
        let count = self.orbs.len();
        if index >= count {
            return Err(VeilError::OrbIndexOutOfRange { index, count });
        }
        self.store.apply(ConfigChange::OrbColor { index, color });
        let config = self.store.snapshot();
        self.apply_pending_changes(&config);
        self.dispatch_events();
        Ok(())
    }

    fn run_frame(&mut self) {
        let config = self.store.snapshot();
        self.apply_pending_changes(&config);
        self.dispatch_events();

        let frame = FrameContext {
            dt: self.clock.delta_time as f32,
            elapsed_ms: self.clock.elapsed_ms(),
            frame: self.clock.frame,
            config: &config,
            pointer: self.pointer.latest(),
        };
        tracing::trace!(frame = frame.frame, dt = frame.dt, "frame");

        self.camera.update(&frame);
        self.smoke.update(&frame);
        self.orbs.update(&frame);

        self.publish();
    }

    fn apply_pending_changes(&mut self, config: &Rc<OverlayConfig>) {
        for change in self.store.drain_changes() {
            tracing::debug!(?change, "applying config change");
            if matches!(
                change,
                ConfigChange::FogColor(_) | ConfigChange::FogNear(_) | ConfigChange::FogFar(_)
            ) {
                let fog = FogParams::from_config(config);
                if fog != self.fog {
                    self.fog = fog;
                    self.events.push(fog_event(&fog));
                }
            }
            let systems: [&mut dyn OverlaySystem; 3] =
                [&mut self.camera, &mut self.smoke, &mut self.orbs];
            for system in systems {
                system.on_config_change(&change, config, &mut self.events);
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.events.drain() {
            match event {
                OverlayEvent::FogChanged { color, near, far } => {
                    self.renderer.set_fog(&FogParams { color, near, far });
                }
                OverlayEvent::SmokeMaterialChanged { .. } => {
                    self.renderer.set_smoke_material(&self.smoke.material());
                }
                OverlayEvent::SmokeRefilled { count } => self.renderer.smoke_refilled(count),
                OverlayEvent::OrbScaleChanged { scale } => {
                    self.renderer.set_orb_scale(OrbHalo::for_scale(scale));
                }
                OverlayEvent::RegenerateGlow { orb, color } => {
                    self.renderer.regenerate_glow(orb, color);
                }
            }
        }
    }

    fn publish(&mut self) {
        self.renderer.set_camera(self.camera.pose());
        self.renderer.update_smoke(&SmokeDrawData {
            positions: self.smoke.positions_flat(),
            rotation_y: self.smoke.rotation_y(),
        });
        for orb in self.orbs.draw_data() {
            self.renderer.update_orb(&orb);
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn camera(&self) -> &ParallaxRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut ParallaxRig {
        &mut self.camera
    }

    pub fn smoke(&self) -> &SmokeField {
        &self.smoke
    }

    pub fn orbs(&self) -> &OrbSwarm {
        &self.orbs
    }

    pub fn fog(&self) -> FogParams {
        self.fog
    }
}

fn fog_event(fog: &FogParams) -> OverlayEvent {
    OverlayEvent::FogChanged {
        color: fog.color,
        near: fog.near,
        far: fog.far,
    }
}
