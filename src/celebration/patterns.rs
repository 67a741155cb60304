//! Staged burst patterns and the application views that trigger them.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{IntroPattern, SurprisePattern};

/// Top-level tabs of the Genna app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    Chat,
    Visuals,
    Gastronomy,
    Coffee,
    Genna,
}

impl AppView {
    pub fn name(self) -> &'static str {
        match self {
            AppView::Chat => "chat",
            AppView::Visuals => "visuals",
            AppView::Gastronomy => "gastronomy",
            AppView::Coffee => "coffee",
            AppView::Genna => "genna",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(AppView::Chat),
            "visuals" => Ok(AppView::Visuals),
            "gastronomy" => Ok(AppView::Gastronomy),
            "coffee" => Ok(AppView::Coffee),
            "genna" => Ok(AppView::Genna),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Where a burst starts. Resolved against the surface size when the burst
/// fires, so staged bursts follow window resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BurstOrigin {
    Point { x: f64, y: f64 },
    Corner(Corner),
    /// Random x along a horizontal line, typically just above the top edge.
    TopEdge { y: f64 },
    /// Greeting anchor: horizontally centered, 40% down.
    Center,
    /// Random point on one of the four edges.
    RandomEdge,
}

impl BurstOrigin {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R, (w, h): (f64, f64)) -> (f64, f64) {
        let w = w.max(1.0);
        let h = h.max(1.0);
        match *self {
            BurstOrigin::Point { x, y } => (x, y),
            BurstOrigin::Corner(Corner::TopLeft) => (0.0, 0.0),
            BurstOrigin::Corner(Corner::TopRight) => (w, 0.0),
            BurstOrigin::Corner(Corner::BottomLeft) => (0.0, h),
            BurstOrigin::Corner(Corner::BottomRight) => (w, h),
            BurstOrigin::TopEdge { y } => (rng.gen_range(0.0..w), y),
            BurstOrigin::Center => (w / 2.0, h / 2.5),
            BurstOrigin::RandomEdge => match rng.gen_range(0..4) {
                0 => (rng.gen_range(0.0..w), 0.0),
                1 => (w, rng.gen_range(0.0..h)),
                2 => (rng.gen_range(0.0..w), h),
                _ => (0.0, rng.gen_range(0.0..h)),
            },
        }
    }
}

/// A burst waiting to be spawned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstRequest {
    pub origin: BurstOrigin,
    pub intensity: u32,
    pub play_sound: bool,
}

/// Opening celebration relative to `start`: the four corners, rain from the
/// top edge, then the grand greeting burst in the middle.
pub fn intro_sequence(cfg: &IntroPattern, start: f64) -> Vec<(f64, BurstRequest)> {
    let mut out = Vec::new();
    for (i, corner) in Corner::ALL.into_iter().enumerate() {
        out.push((
            start,
            BurstRequest {
                origin: BurstOrigin::Corner(corner),
                intensity: cfg.corner_intensity,
                play_sound: i == 0,
            },
        ));
    }
    for wave in 0..cfg.rain_waves {
        out.push((
            start + wave as f64 * cfg.rain_interval_ms,
            BurstRequest {
                origin: BurstOrigin::TopEdge { y: cfg.rain_origin_y },
                intensity: cfg.rain_intensity,
                play_sound: false,
            },
        ));
    }
    out.push((
        start + cfg.grand_delay_ms,
        BurstRequest {
            origin: BurstOrigin::Center,
            intensity: cfg.grand_intensity,
            play_sound: true,
        },
    ));
    out.retain(|(_, req)| req.intensity > 0);
    out
}

/// Edge bursts played when switching to a celebrated view.
pub fn surprise_sequence(cfg: &SurprisePattern, start: f64) -> Vec<(f64, BurstRequest)> {
    if cfg.intensity == 0 {
        return Vec::new();
    }
    (0..cfg.bursts)
        .map(|i| {
            (
                start + i as f64 * cfg.interval_ms,
                BurstRequest {
                    origin: BurstOrigin::RandomEdge,
                    intensity: cfg.intensity,
                    play_sound: i == 0,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;

    #[test]
    fn intro_ends_with_grand_centered_burst() {
        let cfg = IntroPattern::default();
        let seq = intro_sequence(&cfg, 1_000.0);
        assert_eq!(seq.len(), 4 + 6 + 1);
        let (at, last) = seq.last().copied().unwrap();
        assert_eq!(at, 2_500.0);
        assert_eq!(last.origin, BurstOrigin::Center);
        assert_eq!(last.intensity, 350);
        assert!(seq.iter().all(|(t, _)| *t >= 1_000.0));
    }

    #[test]
    fn surprise_bursts_are_staggered() {
        let cfg = SurprisePattern::default();
        let seq = surprise_sequence(&cfg, 0.0);
        let times: Vec<f64> = seq.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0.0, 250.0, 500.0, 750.0, 1_000.0]);
        assert_eq!(seq.iter().filter(|(_, r)| r.play_sound).count(), 1);
    }

    #[test]
    fn origins_resolve_on_or_near_the_surface() {
        let mut rng = seeded_rng(21);
        let size = (800.0, 600.0);
        assert_eq!(BurstOrigin::Corner(Corner::BottomRight).resolve(&mut rng, size), (800.0, 600.0));
        assert_eq!(BurstOrigin::Center.resolve(&mut rng, size), (400.0, 240.0));
        for _ in 0..100 {
            let (x, y) = BurstOrigin::RandomEdge.resolve(&mut rng, size);
            let on_edge = x == 0.0 || x == 800.0 || y == 0.0 || y == 600.0;
            assert!(on_edge, "({x}, {y}) not on an edge");
            let (tx, ty) = BurstOrigin::TopEdge { y: -30.0 }.resolve(&mut rng, size);
            assert!((0.0..800.0).contains(&tx));
            assert_eq!(ty, -30.0);
        }
    }

    #[test]
    fn views_parse_case_insensitively() {
        assert_eq!("Genna".parse::<AppView>(), Ok(AppView::Genna));
        assert_eq!(" chat ".parse::<AppView>(), Ok(AppView::Chat));
        assert!("arcade".parse::<AppView>().is_err());
        assert_eq!(AppView::Coffee.to_string(), "coffee");
    }
}
