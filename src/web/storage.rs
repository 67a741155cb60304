//! High score persisted in `localStorage`.

use web_sys::{Storage, window};

use crate::gift_game::store::{ScoreStore, parse_stored};

pub struct LocalScoreStore {
    key: String,
}

impl LocalScoreStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }
}

impl ScoreStore for LocalScoreStore {
    fn load(&self) -> Option<u32> {
        let raw = Self::storage()?.get_item(&self.key).ok().flatten()?;
        let parsed = parse_stored(&raw);
        if parsed.is_none() {
            log::warn!("ignoring unreadable high score {raw:?} under '{}'", self.key);
        }
        parsed
    }

    fn save(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable, high score not saved");
            return;
        };
        if let Err(e) = storage.set_item(&self.key, &score.to_string()) {
            log::warn!("saving high score failed: {e:?}");
        }
    }
}
