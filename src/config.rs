//! Tunable constants for both engines.
//!
//! Every struct is `#[serde(default)]`, so a JSON document only has to name the
//! fields it overrides. Defaults are the values the Genna app ships with.

use serde::{Deserialize, Serialize};

use crate::celebration::particle::{KindProfile, ParticleKind};
use crate::celebration::patterns::AppView;
use crate::error::{Error, Result};
use crate::gift_game::level::{LevelTier, TimeBonus};

/// Closed numeric range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    fn check(&self, what: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(invalid(format!("{what}: range {}..{} is inverted or not finite", self.min, self.max)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidConfig(msg)
}

fn check_positive(v: f64, what: &str) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{what} must be positive, got {v}")))
    }
}

fn check_non_negative(v: f64, what: &str) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{what} must be a non-negative number, got {v}")))
    }
}

fn check_probability(v: f64, what: &str) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(format!("{what} must be within [0, 1], got {v}")))
    }
}

// --- Celebration overlay ------------------------------------------------------

/// Staged opening sequence: corner bursts, rain from the top edge, then the grand greeting burst.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroPattern {
    pub delay_ms: f64,
    pub corner_intensity: u32,
    pub rain_waves: u32,
    pub rain_interval_ms: f64,
    pub rain_origin_y: f64,
    pub rain_intensity: u32,
    /// Offset of the grand burst from the start of the sequence.
    pub grand_delay_ms: f64,
    pub grand_intensity: u32,
}

impl Default for IntroPattern {
    fn default() -> Self {
        Self {
            delay_ms: 1200.0,
            corner_intensity: 60,
            rain_waves: 6,
            rain_interval_ms: 400.0,
            rain_origin_y: -30.0,
            rain_intensity: 70,
            grand_delay_ms: 1500.0,
            grand_intensity: 350,
        }
    }
}

/// Bursts from random edge points when switching to one of `views`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurprisePattern {
    pub bursts: u32,
    pub interval_ms: f64,
    pub intensity: u32,
    pub views: Vec<AppView>,
}

impl Default for SurprisePattern {
    fn default() -> Self {
        Self {
            bursts: 5,
            interval_ms: 250.0,
            intensity: 50,
            views: vec![AppView::Genna],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub flower: KindProfile,
    pub grass: KindProfile,
    pub star: KindProfile,
    pub pollen: KindProfile,
    /// Initial speed along a uniformly random heading.
    pub launch_speed: Span,
    /// Rotation speed is sampled from `-max..max` radians per tick.
    pub max_rotation_speed: f64,
    pub swirl_radius: Span,
    pub max_swirl_speed: f64,
    /// Velocity multiplier applied every tick.
    pub drag: f64,
    pub wander_amplitude: f64,
    pub wander_time_scale: f64,
    pub wander_y_scale: f64,
    pub flicker_time_scale: f64,
    /// Particles are dropped once `y > height + bottom_margin`.
    pub bottom_margin: f64,
    /// Opacity of the per-frame subtractive fade.
    pub trail_fade: f64,
    /// Bursts above this intensity play the layered impact.
    pub grand_sound_threshold: u32,
    /// Bursts above this intensity show and speak the greeting.
    pub greeting_threshold: u32,
    pub greeting_fade: f64,
    pub greeting_text: String,
    pub greeting_translation: String,
    pub pointer_intensity: u32,
    pub intro: IntroPattern,
    pub surprise: SurprisePattern,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            flower: KindProfile::flower(),
            grass: KindProfile::grass(),
            star: KindProfile::star(),
            pollen: KindProfile::pollen(),
            launch_speed: Span::new(1.0, 6.0),
            max_rotation_speed: 0.05,
            swirl_radius: Span::new(0.0, 60.0),
            max_swirl_speed: 0.02,
            drag: 0.99,
            wander_amplitude: 0.7,
            wander_time_scale: 0.001,
            wander_y_scale: 0.01,
            flicker_time_scale: 0.01,
            bottom_margin: 20.0,
            trail_fade: 0.12,
            grand_sound_threshold: 100,
            greeting_threshold: 150,
            greeting_fade: 0.005,
            greeting_text: "መልካም ገና!".to_string(),
            greeting_translation: "Melkam Genna".to_string(),
            pointer_intensity: 60,
            intro: IntroPattern::default(),
            surprise: SurprisePattern::default(),
        }
    }
}

impl CelebrationConfig {
    pub fn profile(&self, kind: ParticleKind) -> &KindProfile {
        match kind {
            ParticleKind::Flower => &self.flower,
            ParticleKind::Grass => &self.grass,
            ParticleKind::Pollen => &self.pollen,
            ParticleKind::Star => &self.star,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let profiles = [
            ("flower", &self.flower),
            ("grass", &self.grass),
            ("star", &self.star),
            ("pollen", &self.pollen),
        ];
        let mut total_weight = 0.0;
        for (name, p) in profiles {
            p.validate(name)?;
            total_weight += p.weight;
        }
        if total_weight <= 0.0 {
            return Err(invalid("particle kind weights sum to zero".to_string()));
        }
        self.launch_speed.check("launch_speed")?;
        self.swirl_radius.check("swirl_radius")?;
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(invalid(format!("drag must be within [0, 1], got {}", self.drag)));
        }
        check_probability(self.trail_fade, "trail_fade")?;
        check_positive(self.greeting_fade, "greeting_fade")?;
        if self.pointer_intensity == 0 {
            return Err(invalid("pointer_intensity must be at least 1".to_string()));
        }
        Ok(())
    }
}

// --- Gift game ----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftGameConfig {
    pub start_time_secs: u32,
    pub spawn_period_ms: f64,
    pub movement_period_ms: f64,
    pub seconds_period_ms: f64,
    /// Longest stretch of missed time replayed for a single late frame.
    pub max_catch_up_ms: f64,
    pub special_chance: f64,
    pub special_time_bonus_secs: u32,
    pub regular_speed: Span,
    pub regular_speed_per_level: f64,
    pub special_speed: Span,
    pub special_speed_per_level: f64,
    pub spawn_y: f64,
    pub side_margin: f64,
    /// Pointer distance within which a gift counts as caught.
    pub catch_radius: f64,
    pub reveal_delay_ms: f64,
    pub dismiss_delay_ms: f64,
    pub time_bonus: TimeBonus,
    pub levels: Vec<LevelTier>,
    pub high_score_key: String,
}

impl Default for GiftGameConfig {
    fn default() -> Self {
        Self {
            start_time_secs: 30,
            spawn_period_ms: 800.0,
            movement_period_ms: 16.0,
            seconds_period_ms: 1000.0,
            max_catch_up_ms: 1000.0,
            special_chance: 0.05,
            special_time_bonus_secs: 5,
            regular_speed: Span::new(2.0, 4.0),
            regular_speed_per_level: 2.5,
            special_speed: Span::new(4.0, 7.0),
            special_speed_per_level: 1.5,
            spawn_y: -100.0,
            side_margin: 30.0,
            catch_radius: 40.0,
            reveal_delay_ms: 600.0,
            dismiss_delay_ms: 5000.0,
            time_bonus: TimeBonus::default(),
            levels: LevelTier::genna_rewards(),
            high_score_key: "gennaHighScore".to_string(),
        }
    }
}

impl GiftGameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_time_secs == 0 {
            return Err(invalid("start_time_secs must be at least 1".to_string()));
        }
        check_positive(self.spawn_period_ms, "spawn_period_ms")?;
        check_positive(self.movement_period_ms, "movement_period_ms")?;
        check_positive(self.seconds_period_ms, "seconds_period_ms")?;
        check_positive(self.max_catch_up_ms, "max_catch_up_ms")?;
        check_non_negative(self.side_margin, "side_margin")?;
        check_positive(self.catch_radius, "catch_radius")?;
        check_probability(self.special_chance, "special_chance")?;
        self.regular_speed.check("regular_speed")?;
        self.special_speed.check("special_speed")?;
        if self.regular_speed.min <= 0.0 || self.special_speed.min <= 0.0 {
            return Err(invalid("fall speeds must be positive".to_string()));
        }
        if self.regular_speed_per_level < 0.0 || self.special_speed_per_level < 0.0 {
            return Err(invalid("per-level speed offsets must not be negative".to_string()));
        }
        if self.reveal_delay_ms < 0.0 || self.dismiss_delay_ms < self.reveal_delay_ms {
            return Err(invalid("dismiss_delay_ms must not precede reveal_delay_ms".to_string()));
        }
        LevelTier::validate_table(&self.levels)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        CelebrationConfig::default().validate().unwrap();
        GiftGameConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = GiftGameConfig::from_json(r#"{"start_time_secs": 60, "special_chance": 0.5}"#).unwrap();
        assert_eq!(cfg.start_time_secs, 60);
        assert_eq!(cfg.special_chance, 0.5);
        assert_eq!(cfg.spawn_period_ms, 800.0);
        assert_eq!(cfg.levels.len(), 6);
    }

    #[test]
    fn rejects_unusable_margins_and_radius() {
        assert!(GiftGameConfig::from_json(r#"{"side_margin": -1e308}"#).is_err());
        assert!(GiftGameConfig::from_json(r#"{"side_margin": -1}"#).is_err());
        assert!(GiftGameConfig::from_json(r#"{"catch_radius": 0}"#).is_err());
        assert!(GiftGameConfig::from_json(r#"{"catch_radius": -5}"#).is_err());
        assert!(GiftGameConfig::from_json(r#"{"max_catch_up_ms": 0}"#).is_err());
        let wide = GiftGameConfig::from_json(r#"{"side_margin": 0, "catch_radius": 1e6}"#).unwrap();
        assert_eq!(wide.side_margin, 0.0);
    }

    #[test]
    fn rejects_unsorted_level_table() {
        let json = r#"{"levels": [
            {"threshold": 0, "level": 0, "reward": "a", "icon": "x"},
            {"threshold": 500, "level": 1, "reward": "b", "icon": "y"},
            {"threshold": 400, "level": 2, "reward": "c", "icon": "z"}
        ]}"#;
        assert!(matches!(GiftGameConfig::from_json(json), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(CelebrationConfig::from_json("{not json"), Err(Error::ConfigJson(_))));
    }

    #[test]
    fn rejects_zero_kind_weights() {
        let json = r#"{
            "flower": {"weight": 0.0}, "grass": {"weight": 0.0},
            "star": {"weight": 0.0}, "pollen": {"weight": 0.0}
        }"#;
        assert!(matches!(CelebrationConfig::from_json(json), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn surprise_views_parse_from_names() {
        let cfg = CelebrationConfig::from_json(r#"{"surprise": {"views": ["chat", "genna"]}}"#).unwrap();
        assert_eq!(cfg.surprise.views, vec![AppView::Chat, AppView::Genna]);
        assert_eq!(cfg.surprise.bursts, 5);
    }
}
