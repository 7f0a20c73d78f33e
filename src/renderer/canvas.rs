//! `Surface` backed by a browser `CanvasRenderingContext2d`

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Surface, TextStyle};
use crate::sim::Rect;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`; the size is read once here
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        let size = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        Ok(Self { ctx, size })
    }

    fn set_line_dash(&self, dash: &[f32]) {
        let pattern = js_sys::Array::new();
        for d in dash {
            pattern.push(&JsValue::from_f64(*d as f64));
        }
        let _ = self.ctx.set_line_dash(&pattern);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.left() as f64,
            rect.top() as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: &str) {
        let (l, t, r, b) = (
            rect.left() as f64,
            rect.top() as f64,
            rect.right() as f64,
            rect.bottom() as f64,
        );
        let rad = radius as f64;
        let ctx = &self.ctx;

        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(l + rad, t);
        ctx.line_to(r - rad, t);
        ctx.quadratic_curve_to(r, t, r, t + rad);
        ctx.line_to(r, b - rad);
        ctx.quadratic_curve_to(r, b, r - rad, b);
        ctx.line_to(l + rad, b);
        ctx.quadratic_curve_to(l, b, l, b - rad);
        ctx.line_to(l, t + rad);
        ctx.quadratic_curve_to(l, t, l + rad, t);
        ctx.close_path();
        ctx.fill();
    }

    fn stroke_dashed_line(&mut self, from: Vec2, to: Vec2, width: f32, dash: &[f32], color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.set_line_dash(dash);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.set_line_dash(&[]);
    }

    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        for (a, b) in segments {
            self.ctx.move_to(a.x as f64, a.y as f64);
            self.ctx.line_to(b.x as f64, b.y as f64);
        }
        self.ctx.stroke();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: &str) {
        // Unit circle under a scale transform; the path survives restore()
        let ctx = &self.ctx;
        ctx.save();
        let _ = ctx.translate(center.x as f64, center.y as f64);
        let _ = ctx.scale(radii.x as f64, radii.y as f64);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, 1.0, 0.0, std::f64::consts::TAU);
        ctx.restore();

        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle<'_>) {
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(style.align.as_str());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
