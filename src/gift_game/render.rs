//! Draws a [`GiftGame`] onto a [`Surface`] and maps pointer positions to its
//! on-canvas controls.

use super::session::{GiftGame, Phase, RewardStage};
use super::store::ScoreStore;
use crate::celebration::draw::{ETHIOPIAN_GOLD, ETHIOPIAN_GREEN, ETHIOPIAN_RED};
use crate::surface::{Fill, Surface, TextStyle};

const BACKDROP: &str = "#0b1d12";
const SCRIM: &str = "#000000";
const TEXT: &str = "#ffffff";
const MUTED: &str = "#d6d3d1";

const HUD_FONT: &str = "bold 20px \"Inter\", sans-serif";
const GIFT_FONT: &str = "40px serif";
const SPARKLE_FONT: &str = "18px serif";
const FLOAT_FONT: &str = "bold 24px \"Inter\", sans-serif";
const TITLE_FONT: &str = "bold 40px \"Playfair Display\", serif";
const BODY_FONT: &str = "20px \"Inter\", sans-serif";
const BOX_FONT: &str = "96px serif";

const BUTTON_W: f64 = 200.0;
const BUTTON_H: f64 = 56.0;
const PAUSE_SIZE: f64 = 44.0;
const BOX_SIZE: f64 = 140.0;

/// Clickable regions drawn by [`render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Start or restart a session.
    Start,
    /// Pause / resume toggle in the HUD.
    Pause,
    /// The level-up gift box.
    RewardBox,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

fn start_button((w, h): (f64, f64)) -> Rect {
    Rect::centered(w / 2.0, h / 2.0 + 80.0, BUTTON_W, BUTTON_H)
}

fn pause_button((w, _): (f64, f64)) -> Rect {
    Rect {
        x: w - PAUSE_SIZE - 12.0,
        y: 12.0,
        w: PAUSE_SIZE,
        h: PAUSE_SIZE,
    }
}

fn reward_box((w, h): (f64, f64)) -> Rect {
    Rect::centered(w / 2.0, h / 2.0, BOX_SIZE, BOX_SIZE)
}

/// Control under `(x, y)` for the current phase, if any.
pub fn control_at<S: ScoreStore>(game: &GiftGame<S>, x: f64, y: f64) -> Option<Control> {
    let size = game.size();
    match game.phase() {
        Phase::Idle | Phase::Ended => start_button(size).contains(x, y).then_some(Control::Start),
        Phase::Playing => pause_button(size).contains(x, y).then_some(Control::Pause),
        // The whole scrim resumes, not only the button.
        Phase::Paused => Some(Control::Pause),
        Phase::LevelingUp(up) => (up.stage == RewardStage::Closed && reward_box(size).contains(x, y))
            .then_some(Control::RewardBox),
        Phase::Disposed => None,
    }
}

/// Paint one frame: playfield, feedback effects, HUD and the phase overlay.
pub fn render<G: ScoreStore, S: Surface + ?Sized>(game: &GiftGame<G>, s: &mut S) {
    let (w, h) = s.size();
    s.clear();
    s.set_alpha(1.0);
    s.set_fill(Fill::Solid(BACKDROP));
    s.fill_rect(0.0, 0.0, w, h);

    let fx = game.effects();
    s.save();
    if fx.shake > 0 {
        // Alternate direction each tick, shrinking as the shake runs out.
        let amount = fx.shake as f64 * if fx.shake % 2 == 0 { 1.0 } else { -1.0 };
        s.translate(amount, 0.0);
    }

    for gift in game.gifts() {
        s.fill_text(gift.kind.icon(), gift.x, gift.y, &plain(GIFT_FONT, TEXT));
    }
    for spark in &fx.sparkles {
        s.save();
        s.set_alpha((spark.life / 50.0).clamp(0.0, 1.0));
        s.fill_text(spark.glyph, spark.x, spark.y, &plain(SPARKLE_FONT, spark.color));
        s.restore();
    }
    for float in &fx.texts {
        s.save();
        s.set_alpha((float.life as f64 / 40.0).clamp(0.0, 1.0));
        s.fill_text(
            &float.text,
            float.x,
            float.y,
            &TextStyle {
                font: FLOAT_FONT,
                fill: Fill::Solid(ETHIOPIAN_GOLD),
                glow: Some((SCRIM, 4.0)),
            },
        );
        s.restore();
    }
    s.restore();

    hud(game, s);

    match game.phase() {
        Phase::Idle => intro_card(game, s),
        Phase::Paused => {
            scrim(s, 0.6);
            s.fill_text("Paused", w / 2.0, h / 2.0, &plain(TITLE_FONT, TEXT));
            s.fill_text("Tap to continue", w / 2.0, h / 2.0 + 44.0, &plain(BODY_FONT, MUTED));
        }
        Phase::LevelingUp(up) => {
            scrim(s, 0.75);
            s.fill_text(&format!("Level {}!", up.level), w / 2.0, h / 4.0, &plain(TITLE_FONT, ETHIOPIAN_GOLD));
            s.fill_text(
                &format!("+{}s bonus time", up.bonus_secs),
                w / 2.0,
                h / 4.0 + 40.0,
                &plain(BODY_FONT, MUTED),
            );
            let (bx, by) = reward_box((w, h)).center();
            match up.stage {
                RewardStage::Closed => {
                    s.fill_text("🎁", bx, by, &plain(BOX_FONT, TEXT));
                    s.fill_text("Tap to open", bx, by + BOX_SIZE / 2.0 + 30.0, &plain(BODY_FONT, MUTED));
                }
                RewardStage::Opening { .. } => {
                    s.fill_text("✨", bx, by, &plain(BOX_FONT, TEXT));
                }
                RewardStage::Revealed { .. } => {
                    if let Some(tier) = game.levels().tier_for_level(up.level) {
                        s.fill_text(&tier.icon, bx, by, &plain(BOX_FONT, TEXT));
                        s.fill_text(&tier.reward, bx, by + BOX_SIZE / 2.0 + 30.0, &plain(BODY_FONT, ETHIOPIAN_GOLD));
                    }
                }
            }
        }
        Phase::Ended => {
            scrim(s, 0.75);
            s.fill_text("Time's up!", w / 2.0, h / 2.0 - 80.0, &plain(TITLE_FONT, TEXT));
            s.fill_text(
                &format!("Score {}  ·  Best {}", game.score(), game.high_score()),
                w / 2.0,
                h / 2.0 - 30.0,
                &plain(BODY_FONT, MUTED),
            );
            button(s, start_button((w, h)), "Play again");
        }
        Phase::Playing | Phase::Disposed => {}
    }
}

fn plain<'a>(font: &'a str, color: &'a str) -> TextStyle<'a> {
    TextStyle {
        font,
        fill: Fill::Solid(color),
        glow: None,
    }
}

fn scrim<S: Surface + ?Sized>(s: &mut S, alpha: f64) {
    let (w, h) = s.size();
    s.save();
    s.set_alpha(alpha);
    s.set_fill(Fill::Solid(SCRIM));
    s.fill_rect(0.0, 0.0, w, h);
    s.restore();
}

fn button<S: Surface + ?Sized>(s: &mut S, rect: Rect, label: &str) {
    s.set_fill(Fill::Solid(ETHIOPIAN_GREEN));
    s.fill_rect(rect.x, rect.y, rect.w, rect.h);
    let (cx, cy) = rect.center();
    s.fill_text(label, cx, cy, &plain(BODY_FONT, TEXT));
}

fn hud<G: ScoreStore, S: Surface + ?Sized>(game: &GiftGame<G>, s: &mut S) {
    let (w, _) = s.size();
    let style = plain(HUD_FONT, TEXT);
    s.fill_text(&format!("Score {}", game.score()), 80.0, 30.0, &style);
    s.fill_text(&format!("Best {}", game.high_score()), 80.0, 58.0, &plain(HUD_FONT, MUTED));
    s.fill_text(&format!("Level {}", game.level()), w / 2.0, 30.0, &style);
    let time_color = if game.time_left() <= 5 { ETHIOPIAN_RED } else { TEXT };
    s.fill_text(&format!("⏱ {}s", game.time_left()), w - 110.0, 30.0, &plain(HUD_FONT, time_color));

    // Progress towards the next reward.
    let bar_w = (w / 3.0).max(60.0);
    let bar_x = w / 2.0 - bar_w / 2.0;
    s.set_fill(Fill::Solid("#1f2937"));
    s.fill_rect(bar_x, 46.0, bar_w, 6.0);
    s.set_fill(Fill::Solid(ETHIOPIAN_GOLD));
    s.fill_rect(bar_x, 46.0, bar_w * game.progress(), 6.0);

    if matches!(game.phase(), Phase::Playing | Phase::Paused) {
        let rect = pause_button((w, s.size().1));
        s.set_fill(Fill::Solid("#374151"));
        s.fill_rect(rect.x, rect.y, rect.w, rect.h);
        let (cx, cy) = rect.center();
        let glyph = if game.phase() == Phase::Paused { "▶" } else { "⏸" };
        s.fill_text(glyph, cx, cy, &style);
    }
}

fn intro_card<G: ScoreStore, S: Surface + ?Sized>(game: &GiftGame<G>, s: &mut S) {
    let (w, h) = s.size();
    scrim(s, 0.6);
    s.fill_text("Genna Gift Catch", w / 2.0, h / 2.0 - 100.0, &plain(TITLE_FONT, ETHIOPIAN_GOLD));
    s.fill_text(
        "Tap the falling gifts before they land",
        w / 2.0,
        h / 2.0 - 50.0,
        &plain(BODY_FONT, MUTED),
    );
    if let Some(next) = game.next_reward() {
        s.fill_text(
            &format!("{} {} at {} points", next.icon, next.reward, next.threshold),
            w / 2.0,
            h / 2.0 - 15.0,
            &plain(BODY_FONT, MUTED),
        );
    }
    button(s, start_button((w, h)), "Start");
}
