//! Best score tracking
//!
//! The simulation raises [`GameEvent::NewHighScore`]; the host feeds those
//! events here and the value is written through to a [`ScoreStore`].

use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GameState};
use crate::tuning::Tuning;

/// The persisted best score and the store it lives in
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    best: u64,
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Load the best score, falling back to 0 when the store has nothing
    pub fn load(store: S) -> Self {
        let best = store.load().unwrap_or(0);
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a score; persists and returns true only if it beats the best
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.save(score);
        log::info!("New high score: {}", score);
        true
    }

    /// Persist any new best reported by the last tick(s)
    pub fn observe(&mut self, events: &[GameEvent]) {
        let best = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::NewHighScore(score) => Some(*score),
                _ => None,
            })
            .max();
        if let Some(best) = best {
            self.submit(best);
        }
    }

    /// Start a game that knows the current best
    pub fn new_game(&self, seed: u64, tuning: Tuning) -> GameState {
        GameState::with_tuning(seed, tuning).with_high_score(self.best)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
