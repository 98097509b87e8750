//! JSON file backend for native builds

use std::fs;
use std::path::{Path, PathBuf};

use super::{SavedScore, ScoreStore};

/// Stores the best score as a small JSON document
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$SNOW_HOP_SAVE`, or a file in the system temp dir
    pub fn default_location() -> Self {
        let path = std::env::var_os("SNOW_HOP_SAVE")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("snow_hop_highscore.json"));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Option<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                log::info!("No high score at {} ({})", self.path.display(), err);
                return None;
            }
        };

        match SavedScore::parse(&text) {
            Some(saved) => {
                log::info!("Loaded high score {}", saved.high_score);
                Some(saved.high_score)
            }
            None => {
                log::warn!("Ignoring unreadable high score file {}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, high_score: u64) {
        let Some(json) = (SavedScore { high_score }).to_json() else {
            return;
        };

        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("tmp");
        let result = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path));
        match result {
            Ok(()) => log::debug!("High score {} saved to {}", high_score, self.path.display()),
            Err(err) => log::warn!("Could not save high score: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snow_hop_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_loads_none() {
        let store = FileStore::new(scratch_path("missing"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(321);
        assert_eq!(FileStore::new(&path).load(), Some(321));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let dir = std::env::temp_dir().join(format!("snow_hop_no_such_dir_{}", std::process::id()));
        let mut scores = crate::HighScore::load(FileStore::new(dir.join("highscore.json")));

        assert!(scores.submit(12));
        assert_eq!(scores.best(), 12);
        assert_eq!(scores.store().load(), None);
        assert!(!dir.exists());
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{{{").unwrap();
        assert_eq!(FileStore::new(&path).load(), None);
        let _ = fs::remove_file(&path);
    }
}
