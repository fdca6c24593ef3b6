//! Simulation state and core entity types
//!
//! Everything the gameplay loop mutates lives in [`SimState`], which is owned
//! by the surface and passed by `&mut` into the frame functions.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::border_margin;
use crate::tuning::Tuning;

/// Bordered rectangle the particles bounce inside
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayArea {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PlayArea {
    /// Inset a viewport by the responsive margin (width-derived, same on both axes)
    pub fn from_viewport(width: f32, height: f32) -> Self {
        let m = border_margin(width);
        Self {
            x: m,
            y: m,
            w: width - m * 2.0,
            h: height - m * 2.0,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// A collectible particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// Palette index
    pub color: usize,
    /// One-way: once eaten, never drawn, moved or collided again
    pub eaten: bool,
}

impl Particle {
    /// Spawn at a uniform position inside `area` with a random velocity and color
    pub fn random(rng: &mut Pcg32, area: &PlayArea, tuning: &Tuning) -> Self {
        let speed = tuning.max_start_speed;
        Self {
            pos: Vec2::new(
                area.x + rng.random::<f32>() * area.w,
                area.y + rng.random::<f32>() * area.h,
            ),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0 * speed,
                (rng.random::<f32>() - 0.5) * 2.0 * speed,
            ),
            radius: tuning.particle_radius,
            color: rng.random_range(0..tuning.palette.len().max(1)),
            eaten: false,
        }
    }

    /// Euler step, then flip any velocity component whose edge is past the area
    ///
    /// There is no positional correction: a particle outside the area (after the
    /// viewport shrank) keeps flipping in place rather than being pulled back.
    pub fn advance(&mut self, area: &PlayArea) {
        self.pos += self.vel;

        if self.pos.x - self.radius < area.x || self.pos.x + self.radius > area.right() {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - self.radius < area.y || self.pos.y + self.radius > area.bottom() {
            self.vel.y = -self.vel.y;
        }
    }

    /// True if `point` is strictly closer than `distance` to the centre
    #[inline]
    pub fn within(&self, point: Vec2, distance: f32) -> bool {
        self.pos.distance(point) < distance
    }
}

/// Complete gameplay simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Viewport size (canvas pixels)
    pub viewport: Vec2,
    pub area: PlayArea,
    /// Pointer position in canvas coordinates
    pub pointer: Vec2,
    /// Created on the first resize, never removed
    pub particles: Vec<Particle>,
    /// Number of eaten particles
    pub eaten: usize,
    /// Halfway milestone already emitted
    pub halfway_signaled: bool,
    /// Completion already emitted
    pub completed: bool,
    /// Simulated frame counter
    pub frames: u64,
    #[serde(skip, default = "unseeded_rng")]
    pub rng: Pcg32,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl SimState {
    /// Create an empty state; particles appear on the first [`SimState::resize`]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            viewport: Vec2::ZERO,
            area: PlayArea::default(),
            pointer: Vec2::ZERO,
            particles: Vec::new(),
            eaten: 0,
            halfway_signaled: false,
            completed: false,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a viewport size change
    ///
    /// Recomputes the play area and recentres the pointer. Existing particles
    /// keep their positions; only the first resize spawns them.
    pub fn resize(&mut self, width: f32, height: f32, tuning: &Tuning) {
        self.viewport = Vec2::new(width, height);
        self.area = PlayArea::from_viewport(width, height);
        self.pointer = self.viewport / 2.0;

        if self.particles.is_empty() {
            self.spawn_particles(tuning);
        }
    }

    fn spawn_particles(&mut self, tuning: &Tuning) {
        let area = self.area;
        self.particles = (0..tuning.particle_count)
            .map(|_| Particle::random(&mut self.rng, &area, tuning))
            .collect();
        log::debug!("Spawned {} particles in {:?}", self.particles.len(), area);
    }

    /// Record a pointer move
    #[inline]
    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Particles still in play
    pub fn remaining(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| !p.eaten)
    }

    /// Total particles in the session
    #[inline]
    pub fn total(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_area_from_viewport() {
        let area = PlayArea::from_viewport(400.0, 300.0);
        assert_eq!(area, PlayArea { x: 30.0, y: 30.0, w: 340.0, h: 240.0 });

        let wide = PlayArea::from_viewport(2000.0, 1000.0);
        assert_eq!(wide.x, 60.0);
        assert_eq!(wide.bottom(), 940.0);
    }

    #[test]
    fn test_first_resize_spawns_particles_inside_area() {
        let tuning = Tuning::default();
        let mut state = SimState::new(7);
        assert!(state.particles.is_empty());

        state.resize(800.0, 600.0, &tuning);
        assert_eq!(state.total(), 12);
        for p in &state.particles {
            assert!(p.pos.x >= state.area.x && p.pos.x <= state.area.right());
            assert!(p.pos.y >= state.area.y && p.pos.y <= state.area.bottom());
            assert!(p.vel.x.abs() <= 0.5 && p.vel.y.abs() <= 0.5);
            assert!(p.color < 5);
            assert_eq!(p.radius, 6.0);
            assert!(!p.eaten);
        }
    }

    #[test]
    fn test_resize_recentres_pointer_and_keeps_particles() {
        let tuning = Tuning::default();
        let mut state = SimState::new(42);
        state.resize(800.0, 600.0, &tuning);
        state.move_pointer(10.0, 10.0);
        let before: Vec<Vec2> = state.particles.iter().map(|p| p.pos).collect();

        state.resize(400.0, 300.0, &tuning);
        assert_eq!(state.pointer, Vec2::new(200.0, 150.0));
        assert_eq!(state.area, PlayArea { x: 30.0, y: 30.0, w: 340.0, h: 240.0 });
        let after: Vec<Vec2> = state.particles.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bounce_uses_resized_area() {
        let tuning = Tuning::default();
        let mut state = SimState::new(42);
        state.resize(800.0, 600.0, &tuning);
        state.particles[0].pos = Vec2::new(365.0, 100.0);
        state.particles[0].vel = Vec2::new(0.4, 0.0);

        // Inside the 800x600 area (right edge 752) this would not bounce
        state.resize(400.0, 300.0, &tuning);
        crate::sim::advance_particles(&mut state);

        let p = &state.particles[0];
        assert!((p.pos.x - 365.4).abs() < 1e-4);
        assert_eq!(p.vel, Vec2::new(-0.4, 0.0));
    }

    #[test]
    fn test_particle_bounces_off_right_edge() {
        let area = PlayArea { x: 0.0, y: 0.0, w: 100.0, h: 100.0 };
        let mut p = Particle {
            pos: Vec2::new(93.8, 50.0),
            vel: Vec2::new(0.4, 0.0),
            radius: 6.0,
            color: 0,
            eaten: false,
        };
        p.advance(&area);
        assert!((p.pos.x - 94.2).abs() < 1e-4);
        assert!(p.vel.x < 0.0);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let tuning = Tuning::default();
        let mut a = SimState::new(99);
        let mut b = SimState::new(99);
        a.resize(640.0, 480.0, &tuning);
        b.resize(640.0, 480.0, &tuning);
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.color, pb.color);
        }
    }
}
