//! Browser LocalStorage backend

use super::{SavedScore, ScoreStore};

/// Best score under a fixed LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: &'static str,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self {
            key: "snow_hop_highscore",
        }
    }
}

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Option<u64> {
        let storage = Self::storage()?;
        let text = storage.get_item(self.key).ok().flatten()?;
        let saved = SavedScore::parse(&text);
        match saved {
            Some(saved) => log::info!("Loaded high score {}", saved.high_score),
            None => log::warn!("Ignoring unreadable high score in LocalStorage"),
        }
        saved.map(|s| s.high_score)
    }

    fn save(&mut self, high_score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score not saved");
            return;
        };
        if let Some(json) = (SavedScore { high_score }).to_json() {
            match storage.set_item(self.key, &json) {
                Ok(()) => log::info!("High score {} saved", high_score),
                Err(err) => log::warn!("Failed to save high score: {:?}", err),
            }
        }
    }
}
