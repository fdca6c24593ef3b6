//! Munch - a particle-eating browser mini-game
//!
//! Core modules:
//! - `sim`: Simulation state, particle physics, collisions, finale scene
//! - `surface`: Game surface mode machine (gameplay loop / finale loop)
//! - `session`: Prompt -> playing -> finished state machine and event wiring
//! - `renderer`: Drawing seam plus the Canvas 2D implementation
//! - `audio`: Sound cues (Web Audio on wasm32, recorder elsewhere)
//! - `toast`: Transient on-screen messages
//! - `tuning`: Data-driven game constants

pub mod audio;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod surface;
pub mod toast;
pub mod tuning;

pub use session::{SessionController, SessionPhase};
pub use surface::{FrameOutcome, GameSurface, SurfaceMode};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Particles to collect per session
    pub const PARTICLE_COUNT: usize = 12;
    /// Particle radius (canvas pixels)
    pub const PARTICLE_RADIUS: f32 = 6.0;
    /// Pointer marker radius
    pub const POINTER_RADIUS: f32 = 6.0;
    /// Pointer-to-centre distance below which a particle is eaten
    pub const COLLECT_DISTANCE: f32 = 14.0;
    /// Initial velocity components are uniform in [-MAX_START_SPEED, MAX_START_SPEED]
    pub const MAX_START_SPEED: f32 = 0.5;

    /// Play-area margin = clamp(viewport_width * BORDER_RATIO, BORDER_MIN, BORDER_MAX)
    pub const BORDER_RATIO: f32 = 0.06;
    pub const BORDER_MIN: f32 = 30.0;
    pub const BORDER_MAX: f32 = 60.0;
    /// Play-area border stroke width
    pub const BORDER_WIDTH: f32 = 2.0;

    /// Fade overlay drawn every gameplay frame (motion trails)
    pub const TRAIL_FADE: &str = "rgba(255,255,255,0.3)";
    pub const INK: &str = "#000";

    /// Default particle / confetti palette
    pub const PALETTE: [&str; 5] = ["#ff595e", "#1982c4", "#6a4c93", "#8ac926", "#ffca3a"];

    /// Finale confetti
    pub const CONFETTI_COUNT: usize = 90;
    pub const CONFETTI_START_Y: f32 = -20.0;
    pub const CONFETTI_MIN_SPEED: f32 = 2.0;
    pub const CONFETTI_SPEED_RANGE: f32 = 3.0;
    pub const CONFETTI_WIDTH: f32 = 6.0;
    pub const CONFETTI_HEIGHT: f32 = 12.0;

    /// Finale gears: offsets from viewport centre, spin alternates per gear
    pub const GEAR_OFFSETS: [(f32, f32); 4] = [(-120.0, -90.0), (-40.0, -90.0), (40.0, -90.0), (120.0, -90.0)];
    pub const GEAR_SPIN: f32 = 0.03; // radians per frame
    pub const GEAR_SPOKES: usize = 8;
    pub const GEAR_SPOKE_LENGTH: f32 = 22.0;

    /// Finale text sizing (scales with viewport width, capped)
    pub const TITLE_FONT_MAX: f32 = 56.0;
    pub const TITLE_FONT_RATIO: f32 = 0.08;
    pub const SUBTITLE_FONT_MAX: f32 = 18.0;
    pub const SUBTITLE_FONT_RATIO: f32 = 0.035;
    /// Subtitle baseline sits title_font * SUBTITLE_GAP below the title
    pub const SUBTITLE_GAP: f32 = 0.9;
    pub const FONT_FAMILY: &str = "Poppins, sans-serif";

    /// Toast visibility
    pub const TOAST_MS: u32 = 1300;
}

/// Play-area margin for a viewport width
#[inline]
pub fn border_margin(viewport_width: f32) -> f32 {
    use consts::*;
    (viewport_width * BORDER_RATIO).clamp(BORDER_MIN, BORDER_MAX)
}
