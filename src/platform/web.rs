//! Browser bindings
//!
//! JavaScript owns the canvas and the animation-frame loop; it forwards key
//! events and frame timestamps here and draws from the JSON view.

use wasm_bindgen::prelude::*;

use super::{FrameClock, KeyState};
use crate::highscores::HighScore;
use crate::persistence::LocalStorageStore;
use crate::sim::{GameState, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Snow Hop (web) starting...");
}

/// Game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    keys: KeyState,
    clock: FrameClock,
    high_score: HighScore<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let high_score = HighScore::load(LocalStorageStore::default());
        let state = high_score.new_game(seed, Tuning::load());
        log::info!("New game, seed {}", seed);

        WebGame {
            state,
            keys: KeyState::default(),
            clock: FrameClock::default(),
            high_score,
        }
    }

    /// Returns true if the key was handled (caller should preventDefault)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.key_up(key)
    }

    /// Window blurred or tab hidden: release keys and stop the clock
    pub fn suspend(&mut self) {
        self.keys.release_all();
        self.clock.reset();
    }

    /// Run the ticks owed for this animation frame; returns how many ran
    pub fn frame(&mut self, timestamp_ms: f64) -> u32 {
        let ticks = self.clock.advance(timestamp_ms);
        let input = self.keys.snapshot();
        for _ in 0..ticks {
            tick(&mut self.state, &input);
        }

        let events = self.state.drain_events();
        self.high_score.observe(&events);
        ticks
    }

    /// Current frame as JSON for the renderer
    pub fn view_json(&self) -> String {
        match self.state.view().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("View serialization failed: {}", err);
                String::from("{}")
            }
        }
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn double_jump_ready(&self) -> bool {
        self.state.player.has_double_jump
    }

    pub fn canvas_width(&self) -> f32 {
        self.state.tuning.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.state.tuning.canvas_height
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
