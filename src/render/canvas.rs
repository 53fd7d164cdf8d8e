//! Canvas 2D surface for the Telegram WebView

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;

/// Draws through the browser's 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    /// Wrap a canvas element. `None` when the 2D context is unavailable;
    /// the celebration is skipped in that case rather than treated as fatal.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    /// rgba float color to a CSS color string
    fn css_color(color: [f32; 4]) -> String {
        format!(
            "rgba({},{},{},{})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            color[3].clamp(0.0, 1.0)
        )
    }

    fn trace_path(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        for point in &points[1..] {
            self.ctx.line_to(point.x as f64, point.y as f64);
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }
        self.ctx.set_fill_style_str(&Self::css_color(color));
        self.trace_path(points);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.ctx.set_fill_style_str(&Self::css_color(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        if points.len() < 2 {
            return;
        }
        self.ctx.set_stroke_style_str(&Self::css_color(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.trace_path(points);
        self.ctx.stroke();
    }
}
