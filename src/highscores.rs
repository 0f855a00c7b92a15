//! Best-score tracking
//!
//! A single integer persisted through a [`KeyValueStore`]. It only ever moves
//! upward: read once at startup, written whenever a run beats it.

use crate::persistence::KeyValueStore;

/// The all-time best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neonflow_highscore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Current best
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Parse a stored value. Anything non-numeric counts as no score.
    pub fn parse(raw: &str) -> Option<u64> {
        raw.trim().parse().ok()
    }

    /// Load from storage (missing or malformed = 0)
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(raw) = store.get(Self::STORAGE_KEY) else {
            log::info!("No high score found, starting fresh");
            return Self::default();
        };

        match Self::parse(&raw) {
            Some(best) => {
                log::info!("Loaded high score {best}");
                Self { best }
            }
            None => {
                log::warn!("Ignoring malformed high score {raw:?}");
                Self::default()
            }
        }
    }

    /// Check if a score would replace the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a score, persisting it if it beats the best.
    /// Returns true when the best changed.
    pub fn record(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.set(Self::STORAGE_KEY, &score.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_malformed_is_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "lots");
        assert_eq!(HighScore::load(&store).best(), 0);

        store.set(HighScore::STORAGE_KEY, "-12");
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_only_moves_upward() {
        let mut store = MemoryStore::new();
        let mut high = HighScore::new(500);

        assert!(!high.record(300, &mut store));
        assert_eq!(high.best(), 500);
        assert_eq!(store.get(HighScore::STORAGE_KEY), None);

        assert!(high.record(600, &mut store));
        assert_eq!(high.best(), 600);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("600"));

        assert!(!high.record(600, &mut store));
    }

    #[test]
    fn test_survives_reload() {
        let mut store = MemoryStore::new();
        let mut high = HighScore::load(&store);
        high.record(1234, &mut store);
        assert_eq!(HighScore::load(&store).best(), 1234);
    }
}
