//! [`Surface`] backed by a 2D canvas context.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{Error, Result};
use crate::surface::{Blend, Fill, Surface, TextStyle};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(Error::SurfaceUnavailable)?
            .dyn_into()
            .map_err(|_| Error::SurfaceUnavailable)?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store. Resets context state, so text alignment is re-applied.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
    }

    fn apply_fill(&self, fill: Fill<'_>) {
        match fill {
            Fill::Solid(color) => self.ctx.set_fill_style_str(color),
            Fill::Horizontal { x0, x1, stops } => {
                let gradient = self.ctx.create_linear_gradient(x0, 0.0, x1, 0.0);
                for (offset, color) in stops {
                    if gradient.add_color_stop(*offset as f32, color).is_err() {
                        log::warn!("bad gradient stop {color} at {offset}");
                    }
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ctx.translate(x, y).ok();
    }

    fn rotate(&mut self, radians: f64) {
        self.ctx.rotate(radians).ok();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_blend(&mut self, blend: Blend) {
        let op = match blend {
            Blend::Normal => "source-over",
            Blend::Subtract => "destination-out",
            Blend::Additive => "lighter",
        };
        self.ctx.set_global_composite_operation(op).ok();
    }

    fn set_fill(&mut self, fill: Fill<'_>) {
        self.apply_fill(fill);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, r, 0.0, TAU).ok();
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.ctx.begin_path();
        self.ctx.ellipse(cx, cy, rx, ry, 0.0, 0.0, TAU).ok();
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.0, first.1);
        for (x, y) in rest {
            self.ctx.line_to(*x, *y);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_quadratic(&mut self, start: (f64, f64), segments: &[((f64, f64), (f64, f64))]) {
        self.ctx.begin_path();
        self.ctx.move_to(start.0, start.1);
        for ((cx, cy), (x, y)) in segments {
            self.ctx.quadratic_curve_to(*cx, *cy, *x, *y);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle<'_>) {
        self.ctx.set_font(style.font);
        self.apply_fill(style.fill);
        if let Some((color, blur)) = style.glow {
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(blur);
        }
        self.ctx.fill_text(text, x, y).ok();
        if style.glow.is_some() {
            self.ctx.set_shadow_blur(0.0);
        }
    }
}
