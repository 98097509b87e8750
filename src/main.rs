//! Snow Hop entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs the simulation headless with a simple autopilot, which
//! is handy for soak-testing balance changes:
//!
//! ```text
//! snow-hop [seed] [ticks]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snow_hop::HighScore;
    use snow_hop::Tuning;
    use snow_hop::persistence::FileStore;
    use snow_hop::sim::{GameEvent, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    log::info!("Snow Hop (native) starting, seed {} for {} ticks", seed, ticks);

    let store = FileStore::default_location();
    log::debug!("High score file: {}", store.path().display());
    let mut high_score = HighScore::load(store);
    let mut state = high_score.new_game(seed, Tuning::load());

    let mut deaths = 0u32;
    let mut caught = 0u32;
    let mut best_run = 0u64;

    for _ in 0..ticks {
        let input = autopilot::steer(&state);
        tick(&mut state, &input);
        best_run = best_run.max(state.score);

        let events = state.drain_events();
        for event in &events {
            match event {
                GameEvent::Died { .. } => deaths += 1,
                GameEvent::Collected { .. } => caught += 1,
                _ => {}
            }
        }
        high_score.observe(&events);
    }

    println!(
        "seed {}: {} ticks, {} snowflakes, {} deaths, best run {}, high score {}",
        seed,
        ticks,
        caught,
        deaths,
        best_run,
        high_score.best()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

/// Demo player for headless runs
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::cmp::Ordering;

    use snow_hop::sim::{GameState, TickInput};

    /// Horizontal dead zone so the sprite doesn't jitter under a target
    const DEAD_ZONE: f32 = 8.0;

    /// Chase the nearest active snowflake, jump when it is overhead or when
    /// the player is getting close to the bottom edge
    pub fn steer(state: &GameState) -> TickInput {
        let player = &state.player;
        let center = player.center();
        let mut input = TickInput::default();

        let target = state
            .snowflakes
            .iter()
            .filter(|s| s.active)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(center)
                    .partial_cmp(&b.pos.distance_squared(center))
                    .unwrap_or(Ordering::Equal)
            });

        if let Some(flake) = target {
            let dx = flake.pos.x - center.x;
            input.left = dx < -DEAD_ZONE;
            input.right = dx > DEAD_ZONE;
            input.jump = flake.pos.y < player.pos.y && dx.abs() < player.size.x * 2.0;
        }

        if player.bottom() > state.tuning.canvas_height * 0.8 {
            input.jump = true;
        }
        input
    }
}
