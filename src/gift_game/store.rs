//! Durable high-score storage.

/// Key-value persistence for the session high score. Implementations swallow
/// and log their own failures; a broken store only loses the record.
pub trait ScoreStore {
    fn load(&self) -> Option<u32>;
    fn save(&mut self, score: u32);
}

/// In-memory store; also records how many writes happened.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.value
    }

    fn save(&mut self, score: u32) {
        self.value = Some(score);
        self.writes += 1;
    }
}

/// Parse a stored value the way it is written: a decimal integer string.
pub fn parse_stored(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_parse_leniently() {
        assert_eq!(parse_stored("1200"), Some(1200));
        assert_eq!(parse_stored(" 42\n"), Some(42));
        assert_eq!(parse_stored("NaN"), None);
        assert_eq!(parse_stored("-3"), None);
    }
}
