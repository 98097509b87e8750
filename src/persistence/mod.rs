//! High score storage backends
//!
//! The game persists exactly one number. Backends never fail loudly: a
//! missing or unreadable value loads as `None`, a failed write is logged.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use serde::{Deserialize, Serialize};

/// Get/set of the single persisted best score
pub trait ScoreStore {
    fn load(&self) -> Option<u64>;
    fn save(&mut self, high_score: u64);
}

/// On-disk / in-storage record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScore {
    pub high_score: u64,
}

impl SavedScore {
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Accepts the JSON record or a bare integer (older saves)
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        serde_json::from_str::<SavedScore>(text)
            .ok()
            .or_else(|| text.parse::<u64>().ok().map(|high_score| Self { high_score }))
    }
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of writes, handy for asserting save frequency
    pub writes: u32,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Option<u64> {
        self.value
    }

    fn save(&mut self, high_score: u64) {
        self.value = Some(high_score);
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!(SavedScore::parse(r#"{"high_score":42}"#), Some(SavedScore { high_score: 42 }));
        assert_eq!(SavedScore::parse(" 17\n"), Some(SavedScore { high_score: 17 }));
        assert_eq!(SavedScore::parse("garbage"), None);
        assert_eq!(SavedScore::parse("-3"), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let saved = SavedScore { high_score: 9 };
        let json = saved.to_json().unwrap();
        assert_eq!(SavedScore::parse(&json), Some(saved));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(), None);
        store.save(5);
        assert_eq!(store.load(), Some(5));
        assert_eq!(store.writes, 1);
    }
}
