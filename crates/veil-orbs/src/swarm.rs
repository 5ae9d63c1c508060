//! The fixed set of orbs, advanced together once per frame

use rand::Rng;
use veil_core::{ConfigChange, OverlayConfig, Result};
use veil_runtime::{EventBus, FrameContext, OverlayEvent, OverlaySystem};

use crate::orb::{Orb, OrbDrawData, ORB_BLEND};

pub struct OrbSwarm {
    orbs: Vec<Orb>,
    /// Scale applied to every orb's core and halo
    scale: f32,
}

impl OrbSwarm {
    pub fn new(orbs: Vec<Orb>, scale: f32) -> Self {
        Self { orbs, scale }
    }

    /// Spawn `config.orb_count` orbs with random orbits.
    pub fn from_config(config: &OverlayConfig, rng: &mut impl Rng) -> Self {
        let orbs = (0..config.orb_count)
            .map(|i| Orb::spawn(i, config, &mut *rng))
            .collect();
        Self::new(orbs, config.orb_scale)
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn get(&self, index: usize) -> Option<&Orb> {
        self.orbs.get(index)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Advance every orb by one frame in index order.
    pub fn step(&mut self, dt: f32, config: &OverlayConfig) {
        let blend = config.smoothing.blend(ORB_BLEND, dt);
        for orb in &mut self.orbs {
            orb.step(dt, config, blend);
        }
    }

    /// Render-ready views of every orb, in index order
    pub fn draw_data(&mut self) -> Vec<OrbDrawData<'_>> {
        let scale = self.scale;
        self.orbs.iter_mut().map(|orb| orb.draw_data(scale)).collect()
    }
}

impl OverlaySystem for OrbSwarm {
    fn initialize(&mut self, _config: &OverlayConfig, events: &mut EventBus) -> Result<()> {
        tracing::info!(count = self.len(), "orbs spawned");
        for orb in &self.orbs {
            events.push(OverlayEvent::RegenerateGlow {
                orb: orb.index(),
                color: orb.color,
            });
        }
        events.push(OverlayEvent::OrbScaleChanged { scale: self.scale });
        Ok(())
    }

    fn on_config_change(
        &mut self,
        change: &ConfigChange,
        config: &OverlayConfig,
        events: &mut EventBus,
    ) {
        let count = self.orbs.len();
        match *change {
            ConfigChange::OrbColor { index, color } => match self.orbs.get_mut(index) {
                Some(orb) => {
                    orb.color = color;
                    tracing::debug!(
                        orb = index,
                        color = %color.to_hex_string(),
                        "glow regeneration requested"
                    );
                    events.push(OverlayEvent::RegenerateGlow { orb: index, color });
                }
                None => {
                    tracing::warn!(
                        orb = index,
                        count,
                        "color change for unknown orb ignored"
                    );
                }
            },
            ConfigChange::TrailLength(_) => {
                for orb in &mut self.orbs {
                    orb.set_trail_len(config);
                }
            }
            ConfigChange::OrbScale(_) => {
                self.scale = config.orb_scale;
                events.push(OverlayEvent::OrbScaleChanged { scale: self.scale });
            }
            _ => {}
        }
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        self.step(frame.dt, frame.config);
    }

    fn name(&self) -> &str {
        "orbs"
    }
}
