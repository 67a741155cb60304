//! Celebration particles and their per-kind spawn profiles.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{CelebrationConfig, Span};
use crate::error::{Error, Result};
use crate::random::uniform;

/// Visual / behavioural category. Picks the draw routine and the spawn profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Flower, // Adey Abeba: five petals around a red disc
    Grass,  // Ketema blade
    Pollen,
    Star,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 4] = [
        ParticleKind::Star,
        ParticleKind::Pollen,
        ParticleKind::Grass,
        ParticleKind::Flower,
    ];
}

/// Spawn parameters for one kind. `weight` is the kind's share of a burst.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindProfile {
    pub weight: f64,
    pub radius: Span,
    /// Alpha lost per tick.
    pub decay: Span,
    pub flicker: Span,
    /// Palette; each particle picks one uniformly.
    pub colors: Vec<String>,
    /// Constant downward drift per tick.
    pub gravity: f64,
}

impl Default for KindProfile {
    fn default() -> Self {
        Self::flower()
    }
}

impl KindProfile {
    pub fn flower() -> Self {
        Self {
            weight: 0.5,
            radius: Span::new(4.0, 10.0),
            decay: Span::new(0.002, 0.009),
            flicker: Span::new(0.0, 0.2),
            colors: vec!["#FFD700".into(), "#FCDD09".into(), "#DA121A".into()],
            gravity: 0.9,
        }
    }

    pub fn grass() -> Self {
        Self {
            weight: 0.3,
            radius: Span::new(6.0, 18.0),
            decay: Span::new(0.002, 0.009),
            flicker: Span::new(0.0, 0.2),
            colors: vec!["#14532D".into()],
            gravity: 0.9,
        }
    }

    pub fn star() -> Self {
        Self {
            weight: 0.1,
            radius: Span::new(2.0, 5.0),
            decay: Span::new(0.01, 0.02),
            flicker: Span::fixed(0.9),
            colors: vec!["#FFFFFF".into()],
            gravity: 0.9,
        }
    }

    pub fn pollen() -> Self {
        Self {
            weight: 0.1,
            radius: Span::new(1.0, 3.0),
            decay: Span::new(0.01, 0.03),
            flicker: Span::fixed(0.9),
            colors: vec!["#FFF7ED".into()],
            gravity: 0.2,
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        let bad = |msg: &str| Err(Error::InvalidConfig(format!("{name}: {msg}")));
        if !(self.weight >= 0.0 && self.weight.is_finite()) {
            return bad("weight must be a non-negative number");
        }
        if self.radius.min <= 0.0 || self.radius.min > self.radius.max {
            return bad("radius range must be positive and ordered");
        }
        if self.decay.min <= 0.0 || self.decay.min > self.decay.max {
            return bad("decay range must be positive and ordered");
        }
        if self.flicker.min < 0.0 || self.flicker.max > 1.0 || self.flicker.min > self.flicker.max {
            return bad("flicker range must lie within [0, 1]");
        }
        if self.colors.is_empty() {
            return bad("palette is empty");
        }
        if self.gravity < 0.0 {
            return bad("gravity must not be negative");
        }
        Ok(())
    }
}

/// One live particle. Mutated only by [`Particle::step`], once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: String,
    pub alpha: f64,
    pub decay: f64,
    pub flicker: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub kind: ParticleKind,
    pub swirl_angle: f64,
    pub swirl_radius: f64,
    pub swirl_speed: f64,
    pub gravity: f64,
}

impl Particle {
    /// Roll a fresh particle of `kind` at the origin.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        cfg: &CelebrationConfig,
        kind: ParticleKind,
        x: f64,
        y: f64,
    ) -> Self {
        let profile = cfg.profile(kind);
        let heading = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = uniform(rng, cfg.launch_speed.min, cfg.launch_speed.max);
        let color = profile
            .colors
            .get(rng.gen_range(0..profile.colors.len().max(1)))
            .cloned()
            .unwrap_or_else(|| "#FFFFFF".to_string());
        Self {
            x,
            y,
            vx: heading.cos() * speed,
            vy: heading.sin() * speed,
            radius: uniform(rng, profile.radius.min, profile.radius.max),
            color,
            alpha: 1.0,
            decay: uniform(rng, profile.decay.min, profile.decay.max),
            flicker: uniform(rng, profile.flicker.min, profile.flicker.max),
            rotation: rng.gen_range(0.0..std::f64::consts::TAU),
            rotation_speed: uniform(rng, -cfg.max_rotation_speed, cfg.max_rotation_speed),
            kind,
            swirl_angle: rng.gen_range(0.0..std::f64::consts::TAU),
            swirl_radius: uniform(rng, cfg.swirl_radius.min, cfg.swirl_radius.max),
            swirl_speed: uniform(rng, -cfg.max_swirl_speed, cfg.max_swirl_speed),
            gravity: profile.gravity,
        }
    }

    /// Advance one frame. `now` is the wall clock in ms and only feeds the
    /// horizontal wander, so particles drift without carrying their own phase.
    /// Returns whether the particle is still alive given the surface `bottom` bound.
    pub fn step(&mut self, cfg: &CelebrationConfig, now: f64, bottom: f64) -> bool {
        self.vx *= cfg.drag;
        self.vy *= cfg.drag;

        self.swirl_angle += self.swirl_speed;
        let orbit = self.swirl_radius / 100.0;
        let sx = self.swirl_angle.cos() * orbit;
        let sy = self.swirl_angle.sin() * orbit;

        self.x += self.vx + sx;
        self.y += self.vy + sy + self.gravity;
        self.x += (now * cfg.wander_time_scale + self.y * cfg.wander_y_scale).sin() * cfg.wander_amplitude;

        self.alpha -= self.decay;
        self.rotation += self.rotation_speed;

        self.is_alive(bottom)
    }

    pub fn is_alive(&self, bottom: f64) -> bool {
        self.alpha > 0.0 && self.y <= bottom
    }

    /// Opacity actually drawn this frame: alpha dimmed by a shared shimmer.
    pub fn display_alpha(&self, cfg: &CelebrationConfig, now: f64) -> f64 {
        let shimmer = (now * cfg.flicker_time_scale).sin();
        (self.alpha * (1.0 - shimmer * self.flicker)).clamp(0.0, 1.0)
    }
}
