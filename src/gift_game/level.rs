//! Score → level progression and level-up time bonus.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the level threshold table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTier {
    /// Minimum score for this tier.
    pub threshold: u32,
    pub level: u32,
    /// Gift revealed when the tier is reached.
    pub reward: String,
    pub icon: String,
}

impl LevelTier {
    fn new(threshold: u32, level: u32, reward: &str, icon: &str) -> Self {
        Self {
            threshold,
            level,
            reward: reward.to_string(),
            icon: icon.to_string(),
        }
    }

    /// Rewards of the Genna gift game.
    pub fn genna_rewards() -> Vec<LevelTier> {
        vec![
            Self::new(0, 0, "Small Genna Candle", "🕯️"),
            Self::new(300, 1, "Traditional Netela (Elegant Scarf)", "🎗️"),
            Self::new(1000, 2, "Handcrafted Meskel Cross", "✝️"),
            Self::new(3000, 3, "Royal Gabi (Traditional Blanket)", "🧣"),
            Self::new(6000, 4, "Ceramic Coffee Set (Jebena)", "☕"),
            Self::new(10000, 5, "Golden Crown of Lalibela", "👑"),
        ]
    }

    /// A usable table starts at score 0 and strictly increases in both threshold and level.
    pub fn validate_table(tiers: &[LevelTier]) -> Result<()> {
        let first = tiers
            .first()
            .ok_or_else(|| Error::InvalidConfig("level table is empty".to_string()))?;
        if first.threshold != 0 {
            return Err(Error::InvalidConfig(format!(
                "level table must start at score 0, starts at {}",
                first.threshold
            )));
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold || pair[1].level <= pair[0].level {
                return Err(Error::InvalidConfig(format!(
                    "level table not strictly increasing at threshold {}",
                    pair[1].threshold
                )));
            }
        }
        Ok(())
    }
}

/// Ordered threshold table. `level(score)` is non-decreasing in `score`.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelTable {
    tiers: Vec<LevelTier>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            tiers: LevelTier::genna_rewards(),
        }
    }
}

impl LevelTable {
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self> {
        LevelTier::validate_table(&tiers)?;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    fn index_for(&self, score: u32) -> usize {
        // Count of thresholds <= score; the table starts at 0 so this is >= 1.
        self.tiers
            .partition_point(|t| t.threshold <= score)
            .saturating_sub(1)
    }

    /// Highest tier whose threshold `score` has reached.
    pub fn tier(&self, score: u32) -> &LevelTier {
        &self.tiers[self.index_for(score)]
    }

    pub fn level(&self, score: u32) -> u32 {
        self.tier(score).level
    }

    pub fn tier_for_level(&self, level: u32) -> Option<&LevelTier> {
        self.tiers.iter().find(|t| t.level == level)
    }

    /// Next tier to reach, if any.
    pub fn next_tier(&self, score: u32) -> Option<&LevelTier> {
        self.tiers.get(self.index_for(score) + 1)
    }

    /// Fraction of the way from the current tier to the next, in `[0, 1]`.
    /// The top tier reports 1.
    pub fn progress(&self, score: u32) -> f64 {
        let current = self.tier(score).threshold;
        match self.next_tier(score) {
            Some(next) => {
                let span = (next.threshold - current) as f64;
                ((score - current) as f64 / span).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }
}

/// Seconds granted on level-up: `min(cap, score / points_per_second + base)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBonus {
    pub base: u32,
    pub points_per_second: u32,
    pub cap: u32,
}

impl Default for TimeBonus {
    fn default() -> Self {
        Self {
            base: 10,
            points_per_second: 100,
            cap: 45,
        }
    }
}

impl TimeBonus {
    pub fn for_score(&self, score: u32) -> u32 {
        let scaled = score.checked_div(self.points_per_second).unwrap_or(0);
        scaled.saturating_add(self.base).min(self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_levels() {
        let table = LevelTable::default();
        assert_eq!(table.level(0), 0);
        assert_eq!(table.level(299), 0);
        assert_eq!(table.level(300), 1);
        assert_eq!(table.level(999), 1);
        assert_eq!(table.level(1000), 2);
        assert_eq!(table.level(6000), 4);
        assert_eq!(table.level(10000), 5);
        assert_eq!(table.level(u32::MAX), 5);
    }

    #[test]
    fn level_is_monotonic() {
        let table = LevelTable::default();
        let mut prev = 0;
        for score in (0..12_000).step_by(7) {
            let lvl = table.level(score);
            assert!(lvl >= prev, "level dropped at score {score}");
            prev = lvl;
        }
    }

    #[test]
    fn progress_between_tiers() {
        let table = LevelTable::default();
        assert_eq!(table.progress(0), 0.0);
        assert_eq!(table.progress(150), 0.5);
        assert_eq!(table.progress(300), 0.0);
        assert_eq!(table.progress(20_000), 1.0);
        assert_eq!(table.next_tier(299).map(|t| t.level), Some(1));
        assert!(table.next_tier(10_000).is_none());
    }

    #[test]
    fn time_bonus_is_capped() {
        let bonus = TimeBonus::default();
        assert_eq!(bonus.for_score(300), 13);
        assert_eq!(bonus.for_score(1000), 20);
        assert_eq!(bonus.for_score(3000), 40);
        assert_eq!(bonus.for_score(6000), 45);
        assert_eq!(bonus.for_score(u32::MAX), 45);
    }

    #[test]
    fn rejects_tables_not_starting_at_zero() {
        let tiers = vec![LevelTier::new(10, 0, "a", "x")];
        assert!(LevelTable::new(tiers).is_err());
        assert!(LevelTable::new(Vec::new()).is_err());
    }
}
