//! Shape routines. Each draws centered on the current origin, so callers
//! translate / rotate to the particle first.

use std::f64::consts::{PI, TAU};

use super::particle::{Particle, ParticleKind};
use crate::surface::{Fill, Surface, TextStyle};

pub const ETHIOPIAN_GREEN: &str = "#078930";
pub const ETHIOPIAN_GOLD: &str = "#FCDD09";
pub const ETHIOPIAN_RED: &str = "#DA121A";
pub const GLOW: &str = "#FFF7ED";

/// Five petals rotated around a red center disc.
pub fn flower<S: Surface + ?Sized>(s: &mut S, radius: f64) {
    s.save();
    for _ in 0..5 {
        s.rotate(TAU / 5.0);
        s.fill_ellipse(0.0, -radius, radius / 1.6, radius);
    }
    s.set_fill(Fill::Solid(ETHIOPIAN_RED));
    s.fill_circle(0.0, 0.0, radius / 2.5);
    s.restore();
}

/// Five-point star, outer radius `radius`, inner radius half that.
pub fn star<S: Surface + ?Sized>(s: &mut S, radius: f64) {
    let mut points = Vec::with_capacity(10);
    for i in 0..5 {
        let outer = (18.0 + i as f64 * 72.0) / 180.0 * PI;
        let inner = (54.0 + i as f64 * 72.0) / 180.0 * PI;
        points.push((outer.cos() * radius, -outer.sin() * radius));
        points.push((inner.cos() * radius / 2.0, -inner.sin() * radius / 2.0));
    }
    s.fill_polygon(&points);
}

/// Pointed blade bulging by a third of its half-length.
pub fn grass<S: Surface + ?Sized>(s: &mut S, radius: f64) {
    s.fill_quadratic(
        (0.0, -radius),
        &[
            ((radius / 3.0, 0.0), (0.0, radius)),
            ((-radius / 3.0, 0.0), (0.0, -radius)),
        ],
    );
}

pub fn pollen<S: Surface + ?Sized>(s: &mut S, radius: f64) {
    s.fill_circle(0.0, 0.0, radius);
}

/// Draw one particle at its position / rotation with the given opacity.
pub fn particle<S: Surface + ?Sized>(s: &mut S, p: &Particle, alpha: f64) {
    s.save();
    s.translate(p.x, p.y);
    s.rotate(p.rotation);
    s.set_alpha(alpha);
    s.set_fill(Fill::Solid(&p.color));
    match p.kind {
        ParticleKind::Flower => flower(s, p.radius),
        ParticleKind::Star => star(s, p.radius),
        ParticleKind::Grass => grass(s, p.radius),
        ParticleKind::Pollen => pollen(s, p.radius),
    }
    s.restore();
}

const GREETING_STOPS: [(f64, &str); 3] = [
    (0.0, ETHIOPIAN_GREEN),
    (0.5, ETHIOPIAN_GOLD),
    (1.0, ETHIOPIAN_RED),
];

/// Two-line greeting caption at the burst anchor.
pub fn greeting<S: Surface + ?Sized>(s: &mut S, primary: &str, translation: &str, alpha: f64) {
    if alpha <= 0.0 {
        return;
    }
    let (w, h) = s.size();
    let cx = w / 2.0;
    let cy = h / 2.5;
    s.save();
    s.set_alpha(alpha.min(1.0));
    s.fill_text(
        primary,
        cx,
        cy,
        &TextStyle {
            font: "bold 64px \"Playfair Display\", serif",
            fill: Fill::Horizontal {
                x0: cx - 100.0,
                x1: cx + 100.0,
                stops: &GREETING_STOPS,
            },
            glow: Some((ETHIOPIAN_GOLD, 30.0)),
        },
    );
    s.fill_text(
        translation,
        cx,
        cy + 50.0,
        &TextStyle {
            font: "300 32px \"Inter\", sans-serif",
            fill: Fill::Solid(GLOW),
            glow: Some((ETHIOPIAN_GOLD, 30.0)),
        },
    );
    s.restore();
}
