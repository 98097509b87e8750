//! Gameplay tuning
//!
//! Every balance constant the simulation reads, loadable from JSON so a
//! host can tweak the feel without rebuilding. Defaults mirror [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    /// Downward acceleration added to vy every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_force: f32,
    /// Horizontal speed while a direction is held
    pub movement_speed: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Snowflakes ===
    pub snowflake_count: usize,
    /// Nominal flake diameter, also the pickup radius term
    pub snowflake_size: f32,
    pub golden_every: u64,
    pub red_every: u64,
    pub normal_points: u64,
    pub golden_points: u64,
    pub reactivation_delay_ticks: u64,

    // === Explosion ===
    pub particle_count: usize,

    // === Platforms ===
    pub platform_sink_speed: f32,
    pub min_platform_width: f32,
    pub max_platform_width: f32,
    pub platform_height: f32,
    /// New platform is spawned once the topmost one sinks below this y
    pub min_platform_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            movement_speed: MOVEMENT_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            snowflake_count: SNOWFLAKE_COUNT,
            snowflake_size: SNOWFLAKE_SIZE,
            golden_every: GOLDEN_EVERY,
            red_every: RED_EVERY,
            normal_points: NORMAL_POINTS,
            golden_points: GOLDEN_POINTS,
            reactivation_delay_ticks: REACTIVATION_DELAY_TICKS,

            particle_count: PARTICLE_COUNT,

            platform_sink_speed: PLATFORM_SINK_SPEED,
            min_platform_width: MIN_PLATFORM_WIDTH,
            max_platform_width: MAX_PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            min_platform_spacing: MIN_PLATFORM_SPACING,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("Ignoring malformed tuning ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        self.canvas_width = positive(self.canvas_width, defaults.canvas_width);
        self.canvas_height = positive(self.canvas_height, defaults.canvas_height);
        self.player_width = positive(self.player_width, defaults.player_width)
            .min(self.canvas_width);
        self.player_height = positive(self.player_height, defaults.player_height);
        self.snowflake_size = positive(self.snowflake_size, defaults.snowflake_size);
        self.platform_height = positive(self.platform_height, defaults.platform_height);

        self.min_platform_width = positive(self.min_platform_width, defaults.min_platform_width)
            .min(self.canvas_width);
        self.max_platform_width = positive(self.max_platform_width, defaults.max_platform_width)
            .clamp(self.min_platform_width, self.canvas_width);

        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        if !self.jump_force.is_finite() {
            self.jump_force = defaults.jump_force;
        }
        if !self.movement_speed.is_finite() {
            self.movement_speed = defaults.movement_speed;
        }
        if !self.platform_sink_speed.is_finite() {
            self.platform_sink_speed = defaults.platform_sink_speed;
        }
        if !self.min_platform_spacing.is_finite() {
            self.min_platform_spacing = defaults.min_platform_spacing;
        }

        // Zero periods would divide by zero in the kind rule
        self.golden_every = self.golden_every.max(1);
        self.red_every = self.red_every.max(1);
        self
    }

    /// Rightmost x the player may occupy
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        self.canvas_width - self.player_width
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snow_hop_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded tuning overrides from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        Self::default()
    }

    /// Native: read from the file named by `SNOW_HOP_TUNING`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os("SNOW_HOP_TUNING") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.to_string_lossy());
                Self::from_json_or_default(&json)
            }
            Err(err) => {
                log::warn!("Could not read {}: {}", path.to_string_lossy(), err);
                Self::default()
            }
        }
    }
}
