//! Canvas 2D painter

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::Painter;

/// [`Painter`] over a browser 2D context
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, w: f32, h: f32) {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: &str) {
        self.ctx.begin_path();
        // Only fails for a negative radius
        self.ctx.arc(cx as f64, cy as f64, r as f64, 0.0, TAU).ok();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(x1 as f64, y1 as f64);
        self.ctx.line_to(x2 as f64, y2 as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, x as f64, y as f64).ok();
    }
}
