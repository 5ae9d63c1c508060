//! Veil Orbs - Orbiting glow markers with trails
//!
//! Each orb chases a periodic orbit target with exponential smoothing and
//! records its path in a fixed-capacity ring buffer. `OrbSwarm` owns the
//! fixed set of orbs and plugs into the frame loop.

pub mod orb;
pub mod orbit;
pub mod swarm;
pub mod trail;

pub use orb::{Orb, OrbDrawData, OrbHalo};
pub use orbit::OrbitMotion;
pub use swarm::OrbSwarm;
pub use trail::TrailBuffer;
