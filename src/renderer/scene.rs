//! Scene drawing for the two surface loops

use super::Painter;
use crate::consts::*;
use crate::sim::{FinaleScene, SimState};
use crate::tuning::Tuning;

/// Fade overlay and play-area border
///
/// The overlay is translucent so last frame's particles leave a trail.
pub fn draw_backdrop(p: &mut impl Painter, state: &SimState) {
    p.fill_rect(0.0, 0.0, state.viewport.x, state.viewport.y, TRAIL_FADE);
    let a = state.area;
    p.stroke_rect(a.x, a.y, a.w, a.h, INK, BORDER_WIDTH);
}

/// Live particles, then the pointer marker
pub fn draw_gameplay(p: &mut impl Painter, state: &SimState, tuning: &Tuning) {
    draw_backdrop(p, state);
    for particle in state.remaining() {
        p.fill_circle(
            particle.pos.x,
            particle.pos.y,
            particle.radius,
            tuning.color(particle.color),
        );
    }
    p.fill_circle(state.pointer.x, state.pointer.y, tuning.pointer_radius, INK);
}

/// Confetti, gears and the title card
pub fn draw_finale(p: &mut impl Painter, scene: &FinaleScene, tuning: &Tuning) {
    let (w, h) = (scene.viewport.x, scene.viewport.y);
    p.clear(w, h);

    for c in &scene.confetti {
        p.fill_rect(c.pos.x, c.pos.y, CONFETTI_WIDTH, CONFETTI_HEIGHT, tuning.color(c.color));
    }

    for gear in &scene.gears {
        for (from, to) in gear.spokes() {
            p.line(from.x, from.y, to.x, to.y, INK);
        }
    }

    let title_font = format!("700 {}px {}", scene.title_font_size(), FONT_FAMILY);
    let title = scene.title_anchor();
    p.fill_text(&tuning.title_text, title.x, title.y, &title_font, INK);

    let subtitle_font = format!("{}px {}", scene.subtitle_font_size(), FONT_FAMILY);
    let subtitle = scene.subtitle_anchor();
    p.fill_text(&tuning.subtitle_text, subtitle.x, subtitle.y, &subtitle_font, INK);
}
