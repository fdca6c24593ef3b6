//! Finale scene: falling confetti, spinning gears, title card
//!
//! Purely presentational. Built once when the surface enters the finale and
//! stepped once per frame forever; it never raises events.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// A falling confetti rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confetti {
    pub pos: Vec2,
    /// Fall speed, pixels per frame
    pub vy: f32,
    /// Palette index
    pub color: usize,
}

/// A spoked wheel rotating about its centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gear {
    pub center: Vec2,
    pub angle: f32,
    /// Radians per frame
    pub delta: f32,
}

impl Gear {
    /// Spoke end points for the current angle, 45 degrees apart
    ///
    /// Spoke `i` is the vector (0, GEAR_SPOKE_LENGTH) rotated by
    /// `angle + i * TAU / GEAR_SPOKES`, matching canvas rotate semantics.
    pub fn spokes(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let step = std::f32::consts::TAU / GEAR_SPOKES as f32;
        let arm = Vec2::new(0.0, GEAR_SPOKE_LENGTH);
        (0..GEAR_SPOKES).map(move |i| {
            let rot = Vec2::from_angle(self.angle + i as f32 * step);
            (self.center, self.center + rot.rotate(arm))
        })
    }

    #[inline]
    pub fn spin(&mut self) {
        self.angle += self.delta;
    }
}

/// Everything the finale loop draws
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinaleScene {
    /// Viewport captured when the finale started
    pub viewport: Vec2,
    pub confetti: Vec<Confetti>,
    pub gears: Vec<Gear>,
    pub frames: u64,
}

impl FinaleScene {
    pub fn new(viewport: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let palette_len = tuning.palette.len().max(1);
        let confetti = (0..tuning.confetti_count)
            .map(|_| Confetti {
                pos: Vec2::new(rng.random::<f32>() * viewport.x, CONFETTI_START_Y),
                vy: CONFETTI_MIN_SPEED + rng.random::<f32>() * CONFETTI_SPEED_RANGE,
                color: rng.random_range(0..palette_len),
            })
            .collect();

        let center = viewport / 2.0;
        let gears = GEAR_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, &(dx, dy))| Gear {
                center: center + Vec2::new(dx, dy),
                angle: 0.0,
                delta: if i % 2 == 0 { GEAR_SPIN } else { -GEAR_SPIN },
            })
            .collect();

        Self {
            viewport,
            confetti,
            gears,
            frames: 0,
        }
    }

    /// Advance one frame (call after drawing the current one)
    pub fn step(&mut self) {
        for c in &mut self.confetti {
            c.pos.y += c.vy;
        }
        for g in &mut self.gears {
            g.spin();
        }
        self.frames += 1;
    }

    pub fn title_font_size(&self) -> f32 {
        (self.viewport.x * TITLE_FONT_RATIO).min(TITLE_FONT_MAX)
    }

    pub fn subtitle_font_size(&self) -> f32 {
        (self.viewport.x * SUBTITLE_FONT_RATIO).min(SUBTITLE_FONT_MAX)
    }

    /// Title baseline (centred)
    pub fn title_anchor(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Subtitle baseline, title_font * SUBTITLE_GAP below the title
    pub fn subtitle_anchor(&self) -> Vec2 {
        self.title_anchor() + Vec2::new(0.0, self.title_font_size() * SUBTITLE_GAP)
    }
}
