//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Per-frame steps only (velocities are pixels per frame)
//! - Seeded RNG only
//! - Stable iteration order (particles never reorder or disappear)

pub mod finale;
pub mod state;
pub mod tick;

pub use finale::{Confetti, FinaleScene, Gear};
pub use state::{Particle, PlayArea, SimState};
pub use tick::{Progress, SurfaceEvent, SurfaceEvents, advance_particles, resolve_pointer};
