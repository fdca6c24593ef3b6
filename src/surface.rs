//! Game surface: simulation state plus the two mutually exclusive loops
//!
//! ```text
//! Idle --start()--> Running --(all eaten)--> Finished --enter_finale()--> Finale
//!   \                  |                        |                           |
//!    +-----------------+------teardown()--------+---------------------------+--> TornDown
//! ```
//!
//! Exactly one loop is active at a time. The shell calls [`GameSurface::frame`]
//! once per display refresh and requests another refresh only while the
//! outcome is [`FrameOutcome::Continue`].

use crate::renderer::{Painter, draw_finale, draw_gameplay};
use crate::sim::{FinaleScene, Progress, SimState, SurfaceEvents, advance_particles, resolve_pointer};
use crate::tuning::Tuning;

/// Which loop (if any) the surface is running
#[derive(Debug, Clone)]
pub enum SurfaceMode {
    /// Session not started yet; particles exist after the first resize
    Idle,
    /// Gameplay loop
    Running,
    /// All particles eaten; gameplay loop stopped, finale not entered yet
    Finished,
    /// Finale loop (terminal screen)
    Finale(FinaleScene),
    /// Surface destroyed; frames are ignored
    TornDown,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Request another frame
    Continue,
    /// Gameplay just completed; do not reschedule the gameplay loop
    Completed,
    /// Nothing to run (idle, finished or torn down)
    Stopped,
}

/// Owns everything the render loops touch
pub struct GameSurface {
    pub state: SimState,
    pub tuning: Tuning,
    mode: SurfaceMode,
}

impl GameSurface {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: SimState::new(seed),
            tuning,
            mode: SurfaceMode::Idle,
        }
    }

    pub fn mode(&self) -> &SurfaceMode {
        &self.mode
    }

    pub fn is_running(&self) -> bool {
        matches!(self.mode, SurfaceMode::Running)
    }

    pub fn in_finale(&self) -> bool {
        matches!(self.mode, SurfaceMode::Finale(_))
    }

    /// Viewport resized (canvas pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height, &self.tuning);
    }

    /// Pointer moved (canvas pixels)
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.state.move_pointer(x, y);
    }

    /// Idle -> Running. Returns false if the surface was not idle.
    pub fn start(&mut self) -> bool {
        if !matches!(self.mode, SurfaceMode::Idle) {
            return false;
        }
        self.mode = SurfaceMode::Running;
        true
    }

    /// Finished -> Finale. Returns false unless gameplay has finished.
    pub fn enter_finale(&mut self) -> bool {
        if !matches!(self.mode, SurfaceMode::Finished) {
            return false;
        }
        let scene = FinaleScene::new(self.state.viewport, &mut self.state.rng, &self.tuning);
        log::info!(
            "Entering finale ({} confetti, {} gears)",
            scene.confetti.len(),
            scene.gears.len()
        );
        self.mode = SurfaceMode::Finale(scene);
        true
    }

    /// Destroy the surface; any frame already scheduled becomes a no-op
    pub fn teardown(&mut self) {
        if !matches!(self.mode, SurfaceMode::TornDown) {
            log::info!("Surface torn down");
        }
        self.mode = SurfaceMode::TornDown;
    }

    /// Run one frame of whichever loop is active
    pub fn frame(&mut self, painter: &mut impl Painter, events: &mut impl SurfaceEvents) -> FrameOutcome {
        if let SurfaceMode::Finale(scene) = &mut self.mode {
            draw_finale(painter, scene, &self.tuning);
            scene.step();
            return FrameOutcome::Continue;
        }
        if !self.is_running() {
            return FrameOutcome::Stopped;
        }

        advance_particles(&mut self.state);
        draw_gameplay(painter, &self.state, &self.tuning);
        match resolve_pointer(&mut self.state, &self.tuning, events) {
            Progress::Continue => FrameOutcome::Continue,
            Progress::Completed => {
                self.mode = SurfaceMode::Finished;
                FrameOutcome::Completed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Recorder;
    use crate::sim::SurfaceEvent;

    fn surface() -> GameSurface {
        let mut s = GameSurface::new(21, Tuning::default());
        s.resize(800.0, 600.0);
        s.pointer_moved(-500.0, -500.0);
        s
    }

    #[test]
    fn test_idle_surface_draws_nothing() {
        let mut s = surface();
        let mut rec = Recorder::new();
        let mut events: Vec<SurfaceEvent> = Vec::new();
        assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Stopped);
        assert!(rec.commands.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut s = surface();
        assert!(s.start());
        assert!(s.is_running());
        assert!(!s.start());
        assert!(!s.enter_finale());
    }

    #[test]
    fn test_completion_stops_gameplay_then_finale_runs() {
        let mut s = surface();
        s.start();
        let mut rec = Recorder::new();
        let mut events: Vec<SurfaceEvent> = Vec::new();

        assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Continue);

        // Eat everything in one frame
        for p in s.state.particles.iter_mut() {
            p.pos = glam::Vec2::new(300.0, 300.0);
            p.vel = glam::Vec2::ZERO;
        }
        s.pointer_moved(300.0, 300.0);
        assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Completed);
        assert!(matches!(s.mode(), SurfaceMode::Finished));
        assert_eq!(events.iter().filter(|e| **e == SurfaceEvent::Completed).count(), 1);

        // No gameplay frame after completion
        let frames = s.state.frames;
        assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Stopped);
        assert_eq!(s.state.frames, frames);

        assert!(!s.in_finale());
        assert!(s.enter_finale());
        assert!(s.in_finale());
        assert!(!s.is_running());
        assert!(!s.enter_finale());
        events.clear();
        rec.clear_log();
        for _ in 0..10 {
            assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Continue);
        }
        assert!(events.is_empty());
        match s.mode() {
            SurfaceMode::Finale(scene) => assert_eq!(scene.frames, 10),
            other => panic!("expected finale, got {:?}", other),
        }
    }

    #[test]
    fn test_teardown_ignores_pending_frames() {
        let mut s = surface();
        s.start();
        s.teardown();
        let mut rec = Recorder::new();
        let mut events: Vec<SurfaceEvent> = Vec::new();
        assert_eq!(s.frame(&mut rec, &mut events), FrameOutcome::Stopped);
        assert!(rec.commands.is_empty());
        assert!(!s.start());
    }
}
