//! Snow Hop - A single-screen arcade platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `platform`: Browser/native platform abstraction (input, frame clock)
//! - `persistence`: High score storage backends
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation rate: one tick per display frame
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (pixels, y grows downward)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player physics (pixels per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -12.0;
    pub const MOVEMENT_SPEED: f32 = 5.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between a respawned player's feet and the platform top
    pub const RESPAWN_CLEARANCE: f32 = 5.0;

    /// Snowflakes
    pub const SNOWFLAKE_COUNT: usize = 15;
    pub const SNOWFLAKE_SIZE: f32 = 8.0;
    pub const GOLDEN_EVERY: u64 = 20;
    pub const RED_EVERY: u64 = 12;
    pub const NORMAL_POINTS: u64 = 1;
    pub const GOLDEN_POINTS: u64 = 10;
    /// Pickup respawn delay (one second at 60 Hz)
    pub const REACTIVATION_DELAY_TICKS: u64 = 60;

    /// Explosion burst size
    pub const PARTICLE_COUNT: usize = 50;

    /// Platforms
    pub const PLATFORM_SINK_SPEED: f32 = 0.5;
    pub const MIN_PLATFORM_WIDTH: f32 = 120.0;
    pub const MAX_PLATFORM_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const MIN_PLATFORM_SPACING: f32 = 100.0;
}
