//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, constants in pixels per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod explosion;
pub mod noise;
pub mod platforms;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{PlatformContact, resolve_platforms, snowflake_hit};
pub use noise::Noise1D;
pub use platforms::PlatformManager;
pub use schedule::{Reactivation, ReactivationQueue};
pub use state::{
    Facing, GameEvent, GamePhase, GameState, Particle, Platform, Player, Snowflake,
    SnowflakeKind, TickInput,
};
pub use tick::tick;
pub use view::FrameView;
