//! Celebration engine: owns the live particle field, the greeting overlay and
//! the staged bursts waiting to fire.
//!
//! The host drives it with one [`CelebrationEngine::frame`] call per animation
//! frame. Event handlers (pointer, view change, replay) only append particles or
//! staged bursts; every mutation of an existing particle happens inside `tick`.

use rand::rngs::SmallRng;

use super::draw;
use super::particle::{Particle, ParticleKind};
use super::patterns::{AppView, BurstOrigin, BurstRequest, intro_sequence, surprise_sequence};
use crate::audio::AudioCues;
use crate::config::CelebrationConfig;
use crate::random::WeightedTable;
use crate::schedule::Timeline;
use crate::surface::{Blend, Fill, Surface};

pub struct CelebrationEngine<A: AudioCues> {
    cfg: CelebrationConfig,
    kinds: WeightedTable<ParticleKind>,
    rng: SmallRng,
    audio: A,
    particles: Vec<Particle>,
    staged: Timeline<BurstRequest>,
    greeting_alpha: f64,
    size: (f64, f64),
    pointer_suppressed: bool,
    disposed: bool,
}

impl<A: AudioCues> CelebrationEngine<A> {
    pub fn new(cfg: CelebrationConfig, audio: A, rng: SmallRng, size: (f64, f64)) -> Self {
        let kinds = WeightedTable::new(ParticleKind::ALL.map(|k| (cfg.profile(k).weight, k)));
        log::debug!("celebration engine ready ({}x{})", size.0, size.1);
        Self {
            cfg,
            kinds,
            rng,
            audio,
            particles: Vec::new(),
            staged: Timeline::new(),
            greeting_alpha: 0.0,
            size,
            pointer_suppressed: false,
            disposed: false,
        }
    }

    // --- Spawning ---------------------------------------------------------------

    /// Spawn `intensity` particles at the origin. Origins off the surface (e.g.
    /// above the top edge) are fine and make particles fall in.
    pub fn spawn_burst(&mut self, x: f64, y: f64, intensity: u32, play_sound: bool) {
        if self.disposed || intensity == 0 {
            return;
        }
        if !x.is_finite() || !y.is_finite() {
            log::warn!("ignoring burst at non-finite origin ({x}, {y})");
            return;
        }
        if play_sound {
            self.audio.impact(intensity > self.cfg.grand_sound_threshold);
        }
        if intensity > self.cfg.greeting_threshold {
            self.greeting_alpha = 1.0;
            if play_sound {
                self.audio.greeting();
            }
            log::info!("greeting burst of {intensity} at ({x:.0}, {y:.0})");
        }
        self.particles.reserve(intensity as usize);
        for _ in 0..intensity {
            let kind = self
                .kinds
                .sample(&mut self.rng)
                .copied()
                .unwrap_or(ParticleKind::Flower);
            let p = Particle::spawn(&mut self.rng, &self.cfg, kind, x, y);
            self.particles.push(p);
        }
    }

    pub fn spawn(&mut self, req: BurstRequest) {
        let (x, y) = req.origin.resolve(&mut self.rng, self.size);
        self.spawn_burst(x, y, req.intensity, req.play_sound);
    }

    /// Queue a burst to fire on the first tick at or after `at_ms`.
    pub fn schedule(&mut self, at_ms: f64, req: BurstRequest) {
        if !self.disposed {
            self.staged.schedule(at_ms, req);
        }
    }

    fn schedule_all(&mut self, seq: Vec<(f64, BurstRequest)>) {
        for (at, req) in seq {
            self.schedule(at, req);
        }
    }

    // --- Triggers ---------------------------------------------------------------

    /// Opening celebration, starting after the configured intro delay.
    pub fn schedule_intro(&mut self, now: f64) {
        let seq = intro_sequence(&self.cfg.intro, now + self.cfg.intro.delay_ms);
        log::debug!("intro celebration scheduled ({} bursts)", seq.len());
        self.schedule_all(seq);
    }

    /// "Replay" button: the intro pattern, immediately.
    pub fn replay(&mut self, now: f64) {
        let seq = intro_sequence(&self.cfg.intro, now);
        self.schedule_all(seq);
    }

    /// Switching to a celebrated view plays the surprise pattern.
    pub fn on_view_change(&mut self, view: AppView, now: f64) {
        if self.cfg.surprise.views.contains(&view) {
            log::debug!("surprise celebration for view '{view}'");
            let seq = surprise_sequence(&self.cfg.surprise, now);
            self.schedule_all(seq);
        }
    }

    /// Pointer-down anywhere on the surface. Returns whether a burst was spawned.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.disposed || self.pointer_suppressed {
            return false;
        }
        self.spawn(BurstRequest {
            origin: BurstOrigin::Point { x, y },
            intensity: self.cfg.pointer_intensity,
            play_sound: true,
        });
        true
    }

    /// While set, pointer bursts are ignored (the gift game owns the pointer).
    pub fn set_pointer_suppressed(&mut self, suppressed: bool) {
        self.pointer_suppressed = suppressed;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    // --- Frame ------------------------------------------------------------------

    /// Advance one frame: fade the greeting, fire due staged bursts, then move
    /// every particle once and drop the dead ones.
    pub fn tick(&mut self, now: f64) {
        if self.disposed {
            return;
        }
        self.greeting_alpha = (self.greeting_alpha - self.cfg.greeting_fade).max(0.0);

        for req in self.staged.drain_due(now) {
            self.spawn(req);
        }

        let bottom = self.size.1 + self.cfg.bottom_margin;
        let cfg = &self.cfg;
        self.particles.retain_mut(|p| p.step(cfg, now, bottom));
    }

    /// Draw the current state. The previous frame is faded rather than cleared,
    /// leaving trails, and particles are composited additively.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, now: f64) {
        if self.disposed {
            return;
        }
        let (w, h) = surface.size();
        surface.set_blend(Blend::Subtract);
        surface.set_alpha(self.cfg.trail_fade);
        surface.set_fill(Fill::Solid("#000000"));
        surface.fill_rect(0.0, 0.0, w, h);
        surface.set_alpha(1.0);
        surface.set_blend(Blend::Additive);

        self.render_greeting(surface);
        for p in &self.particles {
            draw::particle(surface, p, p.display_alpha(&self.cfg, now));
        }
        surface.set_blend(Blend::Normal);
    }

    /// Caption drawn while the greeting overlay is visible.
    pub fn render_greeting<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw::greeting(
            surface,
            &self.cfg.greeting_text,
            &self.cfg.greeting_translation,
            self.greeting_alpha,
        );
    }

    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: f64) {
        let (w, h) = surface.size();
        if (w, h) != self.size {
            self.resize(w, h);
        }
        self.tick(now);
        self.render(surface, now);
    }

    /// Drop every particle and pending burst; later calls become no-ops.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.particles.clear();
        self.staged.clear();
        self.greeting_alpha = 0.0;
    }

    // --- Accessors --------------------------------------------------------------

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn greeting_alpha(&self) -> f64 {
        self.greeting_alpha
    }

    pub fn pending_bursts(&self) -> usize {
        self.staged.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_pointer_suppressed(&self) -> bool {
        self.pointer_suppressed
    }

    pub fn config(&self) -> &CelebrationConfig {
        &self.cfg
    }

    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Cue, CueLog};
    use crate::random::seeded_rng;
    use crate::surface::{DrawOp, Recorder};

    fn engine() -> CelebrationEngine<CueLog> {
        CelebrationEngine::new(
            CelebrationConfig::default(),
            CueLog::default(),
            seeded_rng(42),
            (800.0, 600.0),
        )
    }

    #[test]
    fn burst_spawns_exact_intensity() {
        let mut e = engine();
        e.spawn_burst(100.0, 100.0, 80, false);
        assert_eq!(e.particles().len(), 80);
        assert!(e.particles().iter().all(|p| p.x == 100.0 && p.alpha == 1.0));
        assert!(e.audio().cues.is_empty());
    }

    #[test]
    fn kind_mix_roughly_follows_weights() {
        let mut e = engine();
        e.spawn_burst(0.0, 0.0, 4000, false);
        let count = |k| e.particles().iter().filter(|p| p.kind == k).count() as f64 / 4000.0;
        assert!((count(ParticleKind::Flower) - 0.5).abs() < 0.05);
        assert!((count(ParticleKind::Grass) - 0.3).abs() < 0.05);
        assert!((count(ParticleKind::Star) - 0.1).abs() < 0.03);
        assert!((count(ParticleKind::Pollen) - 0.1).abs() < 0.03);
    }

    #[test]
    fn sound_cues_follow_thresholds() {
        let mut e = engine();
        e.spawn_burst(0.0, 0.0, 60, true);
        e.spawn_burst(0.0, 0.0, 120, true);
        e.spawn_burst(0.0, 0.0, 350, true);
        assert_eq!(
            e.audio().cues,
            vec![
                Cue::Impact { grand: false },
                Cue::Impact { grand: true },
                Cue::Impact { grand: true },
                Cue::Greeting,
            ]
        );
    }

    #[test]
    fn greeting_fades_each_tick_and_floors_at_zero() {
        let mut e = engine();
        e.spawn_burst(400.0, 240.0, 200, false);
        assert_eq!(e.greeting_alpha(), 1.0);
        e.tick(0.0);
        assert!((e.greeting_alpha() - 0.995).abs() < 1e-12);
        for i in 0..400 {
            e.tick(i as f64);
        }
        assert_eq!(e.greeting_alpha(), 0.0);
    }

    #[test]
    fn suppressed_pointer_spawns_nothing() {
        let mut e = engine();
        e.set_pointer_suppressed(true);
        assert!(!e.on_pointer_down(10.0, 10.0));
        assert!(e.particles().is_empty());
        e.set_pointer_suppressed(false);
        assert!(e.on_pointer_down(10.0, 10.0));
        assert_eq!(e.particles().len(), 60);
    }

    #[test]
    fn non_finite_origin_is_ignored() {
        let mut e = engine();
        e.spawn_burst(f64::NAN, 0.0, 10, true);
        assert!(e.particles().is_empty());
        assert!(e.audio().cues.is_empty());
    }

    #[test]
    fn render_fades_then_draws_additively() {
        let mut e = engine();
        e.spawn_burst(100.0, 100.0, 3, false);
        let mut rec = Recorder::new(800.0, 600.0);
        e.render(&mut rec, 0.0);
        let ops = rec.ops();
        assert_eq!(ops[0], DrawOp::Blend(Blend::Subtract));
        assert_eq!(ops[3], DrawOp::Rect(0.0, 0.0, 800.0, 600.0));
        assert!(ops.contains(&DrawOp::Blend(Blend::Additive)));
        assert_eq!(rec.count(|op| matches!(op, DrawOp::Translate(..))), 3);
        assert_eq!(ops.last(), Some(&DrawOp::Blend(Blend::Normal)));
    }

    #[test]
    fn dispose_cancels_staged_bursts() {
        let mut e = engine();
        e.schedule_intro(0.0);
        assert!(e.pending_bursts() > 0);
        e.dispose();
        assert_eq!(e.pending_bursts(), 0);
        e.tick(10_000.0);
        e.spawn_burst(0.0, 0.0, 10, false);
        assert!(e.particles().is_empty());
    }
}
