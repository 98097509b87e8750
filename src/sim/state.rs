//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; hosts hold one and pass
//! it to [`super::tick`] once per frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::noise::Noise1D;
use super::platforms::PlatformManager;
use super::schedule::ReactivationQueue;
use crate::consts::RESPAWN_CLEARANCE;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is alive and under control
    Running,
    /// Player died; particle burst is playing out before respawn
    Exploding,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height
    pub size: Vec2,
    pub is_jumping: bool,
    /// Mid-air double jump available (granted by a red snowflake)
    pub has_double_jump: bool,
    pub visible: bool,
    pub facing: Facing,
    /// Jump input from the previous tick (double jump needs a fresh press)
    #[serde(skip)]
    pub jump_held: bool,
    /// Already touched the bottom edge this fall
    #[serde(skip)]
    pub was_on_ground: bool,
    /// Standing on a platform as of the last tick
    #[serde(skip)]
    pub supported: bool,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            is_jumping: false,
            has_double_jump: false,
            visible: true,
            facing: Facing::Right,
            jump_held: false,
            was_on_ground: false,
            supported: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Apply held directions, gravity and jump requests to velocity
    ///
    /// Returns `Some(true)` for a double jump, `Some(false)` for a normal jump.
    pub fn apply_input(&mut self, input: &TickInput, tuning: &Tuning) -> Option<bool> {
        // Left wins when both are held
        if input.left {
            self.vel.x = -tuning.movement_speed;
            self.facing = Facing::Left;
        } else if input.right {
            self.vel.x = tuning.movement_speed;
            self.facing = Facing::Right;
        } else {
            self.vel.x = 0.0;
        }

        self.vel.y += tuning.gravity;

        let fresh_press = input.jump && !self.jump_held;
        self.jump_held = input.jump;

        if input.jump && !self.is_jumping {
            self.vel.y = tuning.jump_force;
            self.is_jumping = true;
            Some(false)
        } else if fresh_press && self.is_jumping && self.has_double_jump {
            self.vel.y = tuning.jump_force * 2.0;
            self.has_double_jump = false;
            Some(true)
        } else {
            None
        }
    }

    /// Semi-implicit Euler step (velocity already updated this tick)
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Put the player back in play above a platform
    pub fn respawn_at(&mut self, pos: Vec2, facing: Facing) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.is_jumping = false;
        self.has_double_jump = false;
        self.visible = true;
        self.facing = facing;
        self.jump_held = false;
        self.was_on_ground = false;
        self.supported = false;
    }
}

/// A sinking platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Horizontal extents overlap (open intervals, touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, x: f32, width: f32) -> bool {
        x < self.pos.x + self.width && x + width > self.pos.x
    }
}

/// Snowflake types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnowflakeKind {
    #[default]
    Normal,
    /// Bonus points, falls twice as fast
    Golden,
    /// Grants a double jump
    Red,
}

impl SnowflakeKind {
    /// Kind for the n-th spawn (1-based). Golden takes precedence over red.
    pub fn for_spawn(counter: u64, tuning: &Tuning) -> Self {
        if counter % tuning.golden_every == 0 {
            SnowflakeKind::Golden
        } else if counter % tuning.red_every == 0 {
            SnowflakeKind::Red
        } else {
            SnowflakeKind::Normal
        }
    }

    pub fn points(&self, tuning: &Tuning) -> u64 {
        match self {
            SnowflakeKind::Golden => tuning.golden_points,
            SnowflakeKind::Normal | SnowflakeKind::Red => tuning.normal_points,
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snowflake {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    /// Fall speed (pixels per tick)
    pub speed: f32,
    pub active: bool,
    pub kind: SnowflakeKind,
    /// Drawn size (the pickup radius uses the nominal size instead)
    pub size: f32,
    /// Per-flake phase into the drift noise
    #[serde(skip)]
    pub time_offset: f32,
    /// Bumped on every respawn; stale reactivations compare against it
    #[serde(skip)]
    pub generation: u32,
}

impl Snowflake {
    /// Create a flake and give it its first spawn
    pub fn new<R: Rng + ?Sized>(id: u32, spawns: &mut u64, rng: &mut R, tuning: &Tuning) -> Self {
        let mut flake = Self {
            id,
            pos: Vec2::ZERO,
            speed: 0.0,
            active: false,
            kind: SnowflakeKind::Normal,
            size: tuning.snowflake_size,
            time_offset: rng.random::<f32>() * 1000.0,
            generation: 0,
        };
        flake.respawn(spawns, rng, tuning);
        flake
    }

    /// Re-enter at the top with a fresh position, speed, size and kind
    pub fn respawn<R: Rng + ?Sized>(&mut self, spawns: &mut u64, rng: &mut R, tuning: &Tuning) {
        *spawns += 1;
        self.kind = SnowflakeKind::for_spawn(*spawns, tuning);
        self.pos = Vec2::new(
            rng.random::<f32>() * tuning.canvas_width,
            -tuning.snowflake_size,
        );
        self.active = true;
        self.generation = self.generation.wrapping_add(1);

        let base_speed = 1.0 + rng.random::<f32>() * 2.0;
        self.speed = if self.kind == SnowflakeKind::Golden {
            base_speed * 2.0
        } else {
            base_speed
        };
        self.size = tuning.snowflake_size * (0.4 + rng.random::<f32>() * 0.6);
    }

    /// Fall and drift sideways along the noise field, wrapping at the edges
    ///
    /// Returns true when the flake has left the bottom and needs a respawn.
    pub fn fall(&mut self, noise: &Noise1D, tick: u64, tuning: &Tuning) -> bool {
        self.pos.y += self.speed;

        let n = noise.sample((tick as f32 + self.time_offset) * 0.01);
        self.pos.x += (n - 0.5) * 3.0 * 0.2;

        let margin = tuning.snowflake_size;
        if self.pos.x < -margin {
            self.pos.x = tuning.canvas_width;
        } else if self.pos.x > tuning.canvas_width + margin {
            self.pos.x = -margin;
        }

        self.pos.y > tuning.canvas_height
    }
}

/// A particle for the death explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Input commands for a single tick, sampled once before simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Things the host may want to react to (sound, persistence, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped { double: bool },
    Landed { platform_id: u32 },
    Collected { kind: SnowflakeKind, points: u64 },
    DoubleJumpGranted,
    NewHighScore(u64),
    Died { at: Vec2 },
    Respawned,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (also the drift noise clock)
    pub time_ticks: u64,
    pub score: u64,
    pub high_score: u64,
    pub player: Player,
    pub platforms: PlatformManager,
    pub snowflakes: Vec<Snowflake>,
    /// Total snowflake spawns so far; drives kind assignment
    pub snowflake_spawns: u64,
    pub reactivations: ReactivationQueue,
    pub particles: Vec<Particle>,
    pub noise: Noise1D,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let noise = Noise1D::new(&mut rng);
        let platforms = PlatformManager::with_initial_layout(&tuning);

        let mut snowflake_spawns = 0;
        let snowflakes = (0..tuning.snowflake_count)
            .map(|i| Snowflake::new(i as u32 + 1, &mut snowflake_spawns, &mut rng, &tuning))
            .collect();

        let mut state = Self {
            seed,
            rng,
            player: Player::new(Vec2::ZERO, &tuning),
            tuning,
            phase: GamePhase::Running,
            time_ticks: 0,
            score: 0,
            high_score: 0,
            platforms,
            snowflakes,
            snowflake_spawns,
            reactivations: ReactivationQueue::default(),
            particles: Vec::new(),
            noise,
            events: Vec::new(),
        };

        let (pos, facing) = state.spawn_point();
        state.player.respawn_at(pos, facing);
        state
    }

    /// Seed the best score loaded by the host
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Random spot resting just above a random on-screen platform
    ///
    /// Platforms that have sunk past the bottom edge are still alive until
    /// pruned; they are skipped so the player never spawns into a death.
    pub fn spawn_point(&mut self) -> (Vec2, Facing) {
        let tuning = &self.tuning;
        let visible: Vec<&Platform> = self
            .platforms
            .platforms
            .iter()
            .filter(|p| p.top() < tuning.canvas_height)
            .collect();

        let pos = if visible.is_empty() {
            Vec2::new(
                (tuning.canvas_width - tuning.player_width) * 0.5,
                tuning.canvas_height * 0.5,
            )
        } else {
            let platform = visible[self.rng.random_range(0..visible.len())];
            let slack = (platform.width - tuning.player_width).max(0.0);
            let x = platform.pos.x + self.rng.random::<f32>() * slack;
            let y = platform.top() - tuning.player_height - RESPAWN_CLEARANCE;
            Vec2::new(x.clamp(0.0, tuning.max_player_x()), y)
        };

        let facing = if self.rng.random_bool(0.5) {
            Facing::Left
        } else {
            Facing::Right
        };
        (pos, facing)
    }

    /// Add points and raise the best score if beaten
    pub fn award(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.high_score));
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_rule() {
        let tuning = Tuning::default();
        assert_eq!(SnowflakeKind::for_spawn(1, &tuning), SnowflakeKind::Normal);
        assert_eq!(SnowflakeKind::for_spawn(12, &tuning), SnowflakeKind::Red);
        assert_eq!(SnowflakeKind::for_spawn(20, &tuning), SnowflakeKind::Golden);
        assert_eq!(SnowflakeKind::for_spawn(24, &tuning), SnowflakeKind::Red);
        assert_eq!(SnowflakeKind::for_spawn(40, &tuning), SnowflakeKind::Golden);
        // 60 is a multiple of both; golden wins
        assert_eq!(SnowflakeKind::for_spawn(60, &tuning), SnowflakeKind::Golden);
    }

    #[test]
    fn test_spawn_counter_drives_kinds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawns = 0;
        let mut flake = Snowflake::new(1, &mut spawns, &mut rng, &tuning);

        let mut kinds = vec![flake.kind];
        for _ in 0..39 {
            flake.respawn(&mut spawns, &mut rng, &tuning);
            kinds.push(flake.kind);
        }

        assert_eq!(spawns, 40);
        for (i, kind) in kinds.iter().enumerate() {
            let n = i as u64 + 1;
            let expected = if n % 20 == 0 {
                SnowflakeKind::Golden
            } else if n % 12 == 0 {
                SnowflakeKind::Red
            } else {
                SnowflakeKind::Normal
            };
            assert_eq!(*kind, expected, "spawn {}", n);
        }
    }

    #[test]
    fn test_golden_falls_faster() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut spawns = 19;
        let flake = Snowflake::new(1, &mut spawns, &mut rng, &tuning);
        assert_eq!(flake.kind, SnowflakeKind::Golden);
        assert!(flake.speed >= 2.0 && flake.speed <= 6.0);
        assert!(flake.active);
        assert_eq!(flake.pos.y, -tuning.snowflake_size);
    }

    fn drifting_flake(x: f32, y: f32, speed: f32) -> Snowflake {
        Snowflake {
            id: 1,
            pos: Vec2::new(x, y),
            speed,
            active: true,
            kind: SnowflakeKind::Normal,
            size: 8.0,
            time_offset: 0.0,
            generation: 1,
        }
    }

    #[test]
    fn test_flake_wraps_at_both_edges() {
        let tuning = Tuning::default();
        let noise = Noise1D::new(&mut Pcg32::seed_from_u64(3));

        // Tick 0 lands on a noise lattice point: no sideways drift
        let mut left = drifting_flake(-9.0, 100.0, 1.0);
        assert!(!left.fall(&noise, 0, &tuning));
        assert_eq!(left.pos.x, tuning.canvas_width);
        assert_eq!(left.pos.y, 101.0);

        let mut right = drifting_flake(tuning.canvas_width + 9.0, 100.0, 1.0);
        assert!(!right.fall(&noise, 0, &tuning));
        assert_eq!(right.pos.x, -tuning.snowflake_size);

        let mut inside = drifting_flake(400.0, 100.0, 1.0);
        inside.fall(&noise, 0, &tuning);
        assert_eq!(inside.pos.x, 400.0);
    }

    #[test]
    fn test_flake_reports_bottom_exit() {
        let tuning = Tuning::default();
        let noise = Noise1D::new(&mut Pcg32::seed_from_u64(3));

        let mut flake = drifting_flake(400.0, 597.0, 2.0);
        assert!(!flake.fall(&noise, 0, &tuning));
        assert_eq!(flake.pos.y, 599.0);
        assert!(flake.fall(&noise, 1, &tuning));
        assert_eq!(flake.pos.y, 601.0);

        // Resting exactly on the edge is still on screen
        let mut parked = drifting_flake(400.0, tuning.canvas_height, 0.0);
        assert!(!parked.fall(&noise, 2, &tuning));
    }

    #[test]
    fn test_spawn_point_skips_sunken_platforms() {
        let mut state = GameState::new(8);
        state.platforms = PlatformManager::default();
        state.platforms.add(Vec2::new(0.0, 300.0), 800.0, 20.0);
        state.platforms.add(Vec2::new(100.0, 605.0), 150.0, 20.0);

        for _ in 0..50 {
            let (pos, _) = state.spawn_point();
            assert_eq!(pos.y, 300.0 - state.tuning.player_height - RESPAWN_CLEARANCE);
        }

        // Nothing on screen: fixed fallback point
        state.platforms = PlatformManager::default();
        state.platforms.add(Vec2::new(100.0, 605.0), 150.0, 20.0);
        let (pos, _) = state.spawn_point();
        assert_eq!(pos, Vec2::new(380.0, 300.0));
    }

    #[test]
    fn test_new_state_spawns_above_platform() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.snowflakes.len(), state.tuning.snowflake_count);
        assert_eq!(state.snowflake_spawns, state.tuning.snowflake_count as u64);

        let player = &state.player;
        let feet = player.bottom();
        assert!(state
            .platforms
            .platforms
            .iter()
            .any(|p| (p.top() - feet - RESPAWN_CLEARANCE).abs() < 1e-3));
    }

    #[test]
    fn test_award_tracks_best() {
        let mut state = GameState::new(1).with_high_score(5);
        state.award(3);
        assert_eq!(state.high_score, 5);
        assert!(state.events.is_empty());

        state.award(3);
        assert_eq!(state.score, 6);
        assert_eq!(state.high_score, 6);
        assert_eq!(state.drain_events(), vec![GameEvent::NewHighScore(6)]);
        assert!(state.events.is_empty());
    }
}
