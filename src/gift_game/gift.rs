//! Falling collectibles.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftKind {
    Red,
    Green,
    Gold,
    Candle,
    Scarf,
    Coffee,
    Cross,
    Crown,
    /// Rare, fast, worth extra seconds on the clock.
    Special,
}

impl GiftKind {
    /// Every regular (non-special) kind, lowest value first.
    pub const REGULAR: [GiftKind; 8] = [
        GiftKind::Red,
        GiftKind::Green,
        GiftKind::Gold,
        GiftKind::Candle,
        GiftKind::Scarf,
        GiftKind::Coffee,
        GiftKind::Cross,
        GiftKind::Crown,
    ];

    pub fn points(self) -> u32 {
        match self {
            GiftKind::Red | GiftKind::Green => 10,
            GiftKind::Gold => 15,
            GiftKind::Candle => 20,
            GiftKind::Scarf => 25,
            GiftKind::Coffee => 30,
            GiftKind::Cross => 40,
            GiftKind::Special => 50,
            GiftKind::Crown => 100,
        }
    }

    /// Level at which the kind starts falling. `None` for the special kind,
    /// which is rolled separately at any level.
    pub fn unlock_level(self) -> Option<u32> {
        match self {
            GiftKind::Red | GiftKind::Green | GiftKind::Gold => Some(0),
            GiftKind::Candle | GiftKind::Scarf => Some(1),
            GiftKind::Coffee | GiftKind::Cross => Some(2),
            GiftKind::Crown => Some(3),
            GiftKind::Special => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            GiftKind::Red => "🎁",
            GiftKind::Gold => "⭐",
            GiftKind::Green => "🎄",
            GiftKind::Candle => "🕯️",
            GiftKind::Coffee => "☕",
            GiftKind::Scarf => "🧣",
            GiftKind::Cross => "✝️",
            GiftKind::Crown => "👑",
            GiftKind::Special => "🌟",
        }
    }

    /// Accent colour for catch sparkles.
    pub fn color(self) -> &'static str {
        match self {
            GiftKind::Red => "#ef4444",
            GiftKind::Green => "#22c55e",
            GiftKind::Gold => "#eab308",
            GiftKind::Candle => "#f97316",
            GiftKind::Scarf => "#14b8a6",
            GiftKind::Coffee => "#78350f",
            GiftKind::Cross => "#b91c1c",
            GiftKind::Crown => "#fbbf24",
            GiftKind::Special => "#ec4899",
        }
    }

    /// Regular kinds falling at `level`.
    pub fn unlocked_at(level: u32) -> impl Iterator<Item = GiftKind> {
        Self::REGULAR
            .into_iter()
            .filter(move |k| k.unlock_level().is_some_and(|l| l <= level))
    }
}

/// One falling gift. `y` only ever grows while the gift is live.
#[derive(Clone, Debug, PartialEq)]
pub struct Gift {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub kind: GiftKind,
    pub speed: f64,
}

impl Gift {
    pub fn fall(&mut self) {
        self.y += self.speed;
    }

    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}
