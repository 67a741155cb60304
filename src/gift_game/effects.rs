//! Cosmetic catch feedback: sparkles, floating score text and screen shake.
//! Nothing here feeds back into score, level or time.

use rand::Rng;

const SPARKLES_PER_CATCH: usize = 8;
const SPARKLE_GRAVITY: f64 = 0.5;
const SPARKLE_GLYPHS: [&str; 3] = ["✨", "⭐", "💫"];
const TEXT_LIFE: u32 = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining movement ticks.
    pub life: f64,
    pub color: &'static str,
    pub glyph: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub life: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Effects {
    pub sparkles: Vec<Sparkle>,
    pub texts: Vec<FloatingText>,
    pub shake: u32,
}

impl Effects {
    pub fn on_catch<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        x: f64,
        y: f64,
        color: &'static str,
        text: String,
        shake: u32,
    ) {
        for _ in 0..SPARKLES_PER_CATCH {
            self.sparkles.push(Sparkle {
                x,
                y,
                vx: rng.gen_range(-5.0..5.0),
                vy: rng.gen_range(-5.0..5.0) - 5.0,
                life: rng.gen_range(30.0..50.0),
                color,
                glyph: SPARKLE_GLYPHS[rng.gen_range(0..SPARKLE_GLYPHS.len())],
            });
        }
        self.texts.push(FloatingText {
            x,
            y,
            text,
            life: TEXT_LIFE,
        });
        self.shake = shake;
    }

    /// One movement tick.
    pub fn step(&mut self) {
        self.sparkles.retain_mut(|s| {
            s.x += s.vx;
            s.y += s.vy;
            s.vy += SPARKLE_GRAVITY;
            s.life -= 1.0;
            s.life > 0.0
        });
        self.texts.retain_mut(|t| {
            t.y -= 1.0;
            t.life = t.life.saturating_sub(1);
            t.life > 0
        });
        self.shake = self.shake.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.sparkles.clear();
        self.texts.clear();
        self.shake = 0;
    }
}
