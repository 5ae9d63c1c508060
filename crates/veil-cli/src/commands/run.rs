//! Headless run command

use anyhow::{Context, Result};
use serde::Serialize;
use std::f32::consts::TAU;
use std::time::{Duration, Instant};
use veil_core::Color;
use veil_overlay::{
    CameraPose, ConfigStore, ControlPanel, FogParams, FrameSource, HostContext, OrbDrawData,
    Overlay, OverlayRenderer, PointerInput, PointerSample, SmokeDrawData,
};

use super::load_config;

/// Seconds per revolution of the scripted pointer
const POINTER_PERIOD: f32 = 4.0;

pub struct RunArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub fps: f64,
    pub seed: Option<u64>,
    pub set: Vec<(String, String)>,
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct OrbSnapshot {
    index: usize,
    position: [f32; 3],
    color: String,
    trail_len: usize,
}

/// Renderer that keeps only the latest state it was handed
#[derive(Default)]
struct HeadlessRenderer {
    camera: Option<CameraPose>,
    smoke_points: usize,
    smoke_rotation: f32,
    orbs: Vec<OrbSnapshot>,
    glow_requests: usize,
    fog: Option<FogParams>,
}

impl OverlayRenderer for HeadlessRenderer {
    fn set_camera(&mut self, pose: CameraPose) {
        self.camera = Some(pose);
    }

    fn update_smoke(&mut self, smoke: &SmokeDrawData<'_>) {
        self.smoke_points = smoke.positions.len() / 3;
        self.smoke_rotation = smoke.rotation_y;
    }

    fn update_orb(&mut self, orb: &OrbDrawData<'_>) {
        if self.orbs.len() <= orb.index {
            self.orbs.resize(orb.index + 1, OrbSnapshot::default());
        }
        self.orbs[orb.index] = OrbSnapshot {
            index: orb.index,
            position: orb.position,
            color: orb.color.to_hex_string(),
            trail_len: orb.trail.len(),
        };
    }

    fn regenerate_glow(&mut self, orb: usize, color: Color) {
        tracing::debug!(orb, color = %color.to_hex_string(), "glow texture regenerated");
        self.glow_requests += 1;
    }

    fn set_fog(&mut self, fog: &FogParams) {
        self.fog = Some(*fog);
    }
}

/// Fixed-rate refreshes that also sweep the pointer around a circle
struct ScriptedFrames {
    pointer: PointerInput,
    start: Instant,
    interval: Duration,
    emitted: u64,
    total: u64,
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Option<Instant> {
        if self.emitted >= self.total {
            return None;
        }
        let offset = self.interval.mul_f64(self.emitted as f64);
        let angle = offset.as_secs_f32() / POINTER_PERIOD * TAU;
        self.pointer
            .record(PointerSample::new(angle.cos(), angle.sin() * 0.5));
        self.emitted += 1;
        Some(self.start + offset)
    }
}

#[derive(Serialize)]
struct RunSummary {
    frames: u64,
    elapsed_ms: f64,
    particles: usize,
    smoke_rotation: f32,
    camera_position: [f32; 3],
    camera_base: [f32; 3],
    fog: [f32; 2],
    fog_color: String,
    glow_requests: usize,
    orbs: Vec<OrbSnapshot>,
}

pub fn run(args: RunArgs) -> Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }

    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let store = ConfigStore::new(config.clone());
    let panel = ControlPanel::new(config.orb_count);
    for (id, value) in &args.set {
        panel
            .submit(&store, id, value)
            .with_context(|| format!("Invalid --set {}={}", id, value))?;
    }

    let pointer = PointerInput::new();
    let host = HostContext::new(HeadlessRenderer::default(), pointer.clone());
    let mut overlay = Overlay::init(host, store).context("Failed to start overlay")?;

    let mut source = ScriptedFrames {
        pointer,
        start: Instant::now(),
        interval: Duration::from_secs_f64(1.0 / args.fps),
        emitted: 0,
        total: args.frames,
    };
    let frames = overlay.run(&mut source);

    let renderer = overlay.renderer();
    let fog = renderer.fog.unwrap_or_else(|| overlay.fog());
    let summary = RunSummary {
        frames,
        elapsed_ms: overlay.clock().elapsed_ms(),
        particles: renderer.smoke_points,
        smoke_rotation: renderer.smoke_rotation,
        camera_position: renderer
            .camera
            .unwrap_or_else(|| overlay.camera().pose())
            .position
            .to_array(),
        camera_base: overlay.camera().base_pose().position.to_array(),
        fog: [fog.near, fog.far],
        fog_color: fog.color.to_hex_string(),
        glow_requests: renderer.glow_requests,
        orbs: renderer.orbs.clone(),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "text" => print_summary(&summary),
        other => anyhow::bail!("Unknown format: {}", other),
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "Simulated {} frames ({:.1} ms)",
        summary.frames, summary.elapsed_ms
    );
    println!(
        "Smoke: {} particles, rotation {:.3} rad",
        summary.particles, summary.smoke_rotation
    );
    let [x, y, z] = summary.camera_position;
    let [bx, by, bz] = summary.camera_base;
    println!(
        "Camera: ({:.3}, {:.3}, {:.3}), base ({:.3}, {:.3}, {:.3})",
        x, y, z, bx, by, bz
    );
    println!(
        "Fog: {} from {} to {}",
        summary.fog_color, summary.fog[0], summary.fog[1]
    );
    println!("Glow textures generated: {}", summary.glow_requests);
    for orb in &summary.orbs {
        let [x, y, z] = orb.position;
        println!(
            "  orb {} {} at ({:.3}, {:.3}, {:.3}), trail {}",
            orb.index, orb.color, x, y, z, orb.trail_len
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_frames_stop_after_total() {
        let mut source = ScriptedFrames {
            pointer: PointerInput::new(),
            start: Instant::now(),
            interval: Duration::from_millis(10),
            emitted: 0,
            total: 3,
        };
        let first = source.next_frame().unwrap();
        let second = source.next_frame().unwrap();
        assert_eq!(second - first, Duration::from_millis(10));
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn scripted_pointer_starts_on_positive_x() {
        let pointer = PointerInput::new();
        let mut source = ScriptedFrames {
            pointer: pointer.clone(),
            start: Instant::now(),
            interval: Duration::from_millis(16),
            emitted: 0,
            total: 1,
        };
        source.next_frame();
        let sample = pointer.latest();
        assert!((sample.x - 1.0).abs() < 1e-6);
        assert!(sample.y.abs() < 1e-6);
    }

    #[test]
    fn headless_run_tracks_every_orb() {
        let store = ConfigStore::new(veil_core::OverlayConfig {
            particle_count: 16,
            seed: Some(1),
            ..Default::default()
        });
        let pointer = PointerInput::new();
        let host = HostContext::new(HeadlessRenderer::default(), pointer.clone());
        let mut overlay = Overlay::init(host, store).unwrap();
        let mut source = ScriptedFrames {
            pointer,
            start: Instant::now(),
            interval: Duration::from_millis(16),
            emitted: 0,
            total: 100,
        };
        assert_eq!(overlay.run(&mut source), 100);
        let renderer = overlay.renderer();
        assert_eq!(renderer.smoke_points, 16);
        assert_eq!(renderer.orbs.len(), 4);
        assert_eq!(renderer.glow_requests, 4);
        assert!(renderer.orbs.iter().all(|o| o.trail_len == 50));
        assert!(renderer.fog.is_some());
    }
}
