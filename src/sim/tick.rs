//! Per-frame simulation tick
//!
//! Order of operations each tick:
//! 1. fire due snowflake reactivations
//! 2. player: input, gravity, integration, platform collisions, bounds/death
//! 3. snowflakes fall and drift
//! 4. pickups
//! 5. platforms sink, prune and top up
//! 6. explosion lifecycle
//!
//! While exploding, step 2 and 4 are skipped; the world keeps moving.

use super::collision::{clamp_to_canvas, resolve_platforms, snowflake_hit, touches_bottom};
use super::explosion;
use super::state::{GameEvent, GamePhase, GameState, SnowflakeKind, TickInput};

/// Advance the game state by one tick (one display frame)
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    fire_reactivations(state);

    if state.phase == GamePhase::Running {
        step_player(state, input);
    }

    update_snowflakes(state);

    if state.phase == GamePhase::Running && state.player.visible {
        collect_pickups(state);
    }

    if let Some(id) = state.platforms.step(&mut state.rng, &state.tuning) {
        log::debug!("Tick {}: spawned platform {}", state.time_ticks, id);
    }

    explosion::step(state);
}

/// Input, physics, collision and the fall-death check for the player
fn step_player(state: &mut GameState, input: &TickInput) {
    let died = {
        let tuning = &state.tuning;
        let player = &mut state.player;

        if let Some(double) = player.apply_input(input, tuning) {
            state.events.push(GameEvent::Jumped { double });
        }

        let was_supported = player.supported;
        let prev_y = player.pos.y;
        player.integrate();

        // A resting player re-lands every tick; only report touchdowns
        let contact = resolve_platforms(player, prev_y, &state.platforms.platforms);
        player.supported = contact.landed_on.is_some();
        if let Some(platform_id) = contact.landed_on {
            if !was_supported {
                state.events.push(GameEvent::Landed { platform_id });
            }
        }

        clamp_to_canvas(player, tuning);

        if touches_bottom(player, tuning) {
            let first_touch = !player.was_on_ground;
            player.was_on_ground = true;
            first_touch
        } else {
            player.was_on_ground = false;
            false
        }
    };

    if died {
        explosion::trigger(state);
    }
}

/// Active flakes fall; any that leave the bottom come back at the top
fn update_snowflakes(state: &mut GameState) {
    let GameState {
        snowflakes,
        noise,
        tuning,
        rng,
        snowflake_spawns,
        time_ticks,
        ..
    } = state;

    for flake in snowflakes.iter_mut().filter(|f| f.active) {
        if flake.fall(noise, *time_ticks, tuning) {
            flake.respawn(snowflake_spawns, rng, tuning);
        }
    }
}

/// Score every active flake touching the player and queue its return
fn collect_pickups(state: &mut GameState) {
    let mut caught = Vec::new();
    for flake in &mut state.snowflakes {
        if snowflake_hit(flake, &state.player, &state.tuning) {
            flake.active = false;
            caught.push((flake.id, flake.generation, flake.kind));
        }
    }

    for (id, generation, kind) in caught {
        let points = kind.points(&state.tuning);
        state.events.push(GameEvent::Collected { kind, points });
        state.award(points);

        if kind == SnowflakeKind::Red {
            state.player.has_double_jump = true;
            state.events.push(GameEvent::DoubleJumpGranted);
        }

        let due = state.time_ticks + state.tuning.reactivation_delay_ticks;
        state.reactivations.schedule(id, generation, due);
    }
}

/// Bring back collected flakes whose delay has elapsed
fn fire_reactivations(state: &mut GameState) {
    let due = state.reactivations.drain_due(state.time_ticks);
    if due.is_empty() {
        return;
    }

    let GameState {
        snowflakes,
        tuning,
        rng,
        snowflake_spawns,
        ..
    } = state;

    for entry in due {
        match snowflakes.iter_mut().find(|s| s.id == entry.snowflake_id) {
            Some(flake) if !flake.active && flake.generation == entry.generation => {
                flake.respawn(snowflake_spawns, rng, tuning);
                log::trace!("Snowflake {} back as {:?}", flake.id, flake.kind);
            }
            _ => log::debug!("Dropping stale reactivation for snowflake {}", entry.snowflake_id),
        }
    }
}
