//! Gameplay frame step
//!
//! One call of [`advance_particles`] followed by [`resolve_pointer`] is one
//! gameplay frame. Velocities are per frame, so there is no delta time.

use super::state::SimState;
use crate::tuning::Tuning;

/// Discrete events raised by the gameplay loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A particle was eaten (once per particle)
    Collected,
    /// Half of the particles are eaten (once per session)
    HalfwayReached,
    /// Every particle is eaten (once per session, terminal)
    Completed,
}

/// Observer for surface events
pub trait SurfaceEvents {
    fn emit(&mut self, event: SurfaceEvent);
}

impl SurfaceEvents for Vec<SurfaceEvent> {
    fn emit(&mut self, event: SurfaceEvent) {
        self.push(event);
    }
}

/// Whether the gameplay loop should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Completed,
}

/// Move every live particle one frame and bounce it off the play area
pub fn advance_particles(state: &mut SimState) {
    let area = state.area;
    for p in state.particles.iter_mut().filter(|p| !p.eaten) {
        p.advance(&area);
    }
    state.frames += 1;
}

/// Eat particles under the pointer, then run the milestone checks
pub fn resolve_pointer(
    state: &mut SimState,
    tuning: &Tuning,
    events: &mut impl SurfaceEvents,
) -> Progress {
    if state.completed {
        return Progress::Completed;
    }

    let pointer = state.pointer;
    for p in state.particles.iter_mut() {
        if !p.eaten && p.within(pointer, tuning.collect_distance) {
            p.eaten = true;
            state.eaten += 1;
            events.emit(SurfaceEvent::Collected);
        }
    }

    if !state.halfway_signaled && state.eaten >= tuning.halfway_threshold() {
        state.halfway_signaled = true;
        log::info!("Halfway: {}/{}", state.eaten, state.total());
        events.emit(SurfaceEvent::HalfwayReached);
    }

    if state.eaten == state.total() {
        state.completed = true;
        log::info!("All {} particles collected in {} frames", state.total(), state.frames);
        events.emit(SurfaceEvent::Completed);
        return Progress::Completed;
    }

    Progress::Continue
}
