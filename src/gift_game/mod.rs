//! The Genna gift-catch mini-game.

pub mod effects;
pub mod gift;
pub mod level;
pub mod render;
pub mod session;
pub mod store;

pub use gift::{Gift, GiftKind};
pub use level::{LevelTable, LevelTier, TimeBonus};
pub use render::{Control, control_at, render};
pub use session::{GameEvent, GiftGame, LevelUp, Phase, RewardStage};
pub use store::{MemoryStore, ScoreStore};
