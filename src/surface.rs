//! 2D drawing contract used by both engines.
//!
//! The browser implementation lives in `web::canvas`; [`Recorder`] is a headless
//! surface that logs draw calls for tests.

/// Compositing mode for subsequent fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// Regular painting (`source-over`).
    Normal,
    /// Removes destination content proportionally to source alpha (`destination-out`).
    Subtract,
    /// Overlaps brighten (`lighter`).
    Additive,
}

/// Fill paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill<'a> {
    Solid(&'a str),
    /// Left-to-right gradient between `x0` and `x1` with `(offset, color)` stops.
    Horizontal {
        x0: f64,
        x1: f64,
        stops: &'a [(f64, &'a str)],
    },
}

/// Text styling for [`Surface::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub fill: Fill<'a>,
    /// Shadow glow as `(color, blur)`.
    pub glow: Option<(&'a str, f64)>,
}

pub trait Surface {
    /// Drawable size in surface pixels.
    fn size(&self) -> (f64, f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);

    fn set_alpha(&mut self, alpha: f64);
    fn set_blend(&mut self, blend: Blend);
    fn set_fill(&mut self, fill: Fill<'_>);

    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64);
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64);
    /// Closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[(f64, f64)]);
    /// Closed path starting at `start`, each segment a quadratic curve `(control, end)`.
    fn fill_quadratic(&mut self, start: (f64, f64), segments: &[((f64, f64), (f64, f64))]);
    /// Centered text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle<'_>);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    Alpha(f64),
    Blend(Blend),
    Fill(String),
    Clear,
    Rect(f64, f64, f64, f64),
    Circle(f64, f64, f64),
    Ellipse(f64, f64, f64, f64),
    Polygon(usize),
    Quadratic(usize),
    Text(String),
}

/// Headless surface that records every call.
#[derive(Clone, Debug)]
pub struct Recorder {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }
    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }
    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::Translate(x, y));
    }
    fn rotate(&mut self, radians: f64) {
        self.ops.push(DrawOp::Rotate(radians));
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::Alpha(alpha));
    }
    fn set_blend(&mut self, blend: Blend) {
        self.ops.push(DrawOp::Blend(blend));
    }
    fn set_fill(&mut self, fill: Fill<'_>) {
        let name = match fill {
            Fill::Solid(c) => c.to_string(),
            Fill::Horizontal { stops, .. } => format!("gradient({})", stops.len()),
        };
        self.ops.push(DrawOp::Fill(name));
    }
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Rect(x, y, w, h));
    }
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.ops.push(DrawOp::Circle(cx, cy, r));
    }
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.ops.push(DrawOp::Ellipse(cx, cy, rx, ry));
    }
    fn fill_polygon(&mut self, points: &[(f64, f64)]) {
        self.ops.push(DrawOp::Polygon(points.len()));
    }
    fn fill_quadratic(&mut self, _start: (f64, f64), segments: &[((f64, f64), (f64, f64))]) {
        self.ops.push(DrawOp::Quadratic(segments.len()));
    }
    fn fill_text(&mut self, text: &str, _x: f64, _y: f64, _style: &TextStyle<'_>) {
        self.ops.push(DrawOp::Text(text.to_string()));
    }
}
