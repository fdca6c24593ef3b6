//! Rendering
//!
//! Scenes draw through the [`Painter`] trait. On wasm32 it is implemented for
//! the Canvas 2D context; [`Recorder`] captures draw calls for tests and the
//! native harness.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{draw_finale, draw_gameplay};

/// Immediate-mode 2D drawing surface (canvas pixel coordinates)
pub trait Painter {
    /// Erase the whole surface to transparent
    fn clear(&mut self, w: f32, h: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: &str);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str);
    /// Centre-aligned text at a baseline point; `font` is a CSS font shorthand
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

/// A captured draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { w: f32, h: f32 },
    FillRect { x: f32, y: f32, w: f32, h: f32, color: String },
    StrokeRect { x: f32, y: f32, w: f32, h: f32, color: String, line_width: f32 },
    FillCircle { cx: f32, cy: f32, r: f32, color: String },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, color: String },
    FillText { text: String, x: f32, y: f32, font: String, color: String },
}

/// Painter that records every call
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    /// Filled circles in draw order (particles and pointer)
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }
}

impl Painter for Recorder {
    fn clear(&mut self, w: f32, h: f32) {
        self.commands.push(DrawCommand::Clear { w, h });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color: color.to_string() });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
            line_width,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: &str) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, r, color: color.to_string() });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2, color: color.to_string() });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
        });
    }
}
