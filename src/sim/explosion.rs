//! Death explosion and respawn sequencing
//!
//! Running -> Exploding on death, back to Running once every particle of the
//! burst has burned out.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState, Particle};

/// Downward acceleration applied to particles each tick
const PARTICLE_GRAVITY: f32 = 0.2;
/// Life lost per tick (a particle lasts ~50 ticks)
const PARTICLE_DECAY: f32 = 0.02;
/// Upward kick added to every particle's initial velocity
const PARTICLE_LIFT: f32 = 2.0;

/// Build one burst particle at `origin` with a random radial velocity
fn burst_particle<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Particle {
    let angle = rng.random::<f32>() * TAU;
    let speed = rng.random::<f32>() * 5.0 + 2.0;
    Particle {
        pos: origin,
        vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - PARTICLE_LIFT),
        life: 1.0,
        size: rng.random::<f32>() * 4.0 + 2.0,
    }
}

/// Kill the player: hide it, reset the run score and start the burst
///
/// Returns false if an explosion is already in progress.
pub fn trigger(state: &mut GameState) -> bool {
    if state.phase == GamePhase::Exploding {
        return false;
    }

    let origin = state.player.center();
    log::info!(
        "Player died at ({:.0}, {:.0}) with score {}",
        origin.x,
        origin.y,
        state.score
    );

    state.score = 0;
    state.player.visible = false;
    state.player.has_double_jump = false;
    state.player.vel = Vec2::ZERO;

    state.particles.clear();
    for _ in 0..state.tuning.particle_count {
        let particle = burst_particle(origin, &mut state.rng);
        state.particles.push(particle);
    }

    state.phase = GamePhase::Exploding;
    state.events.push(GameEvent::Died { at: origin });
    true
}

/// Advance every particle one tick and drop the burnt-out ones
pub fn step_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life -= PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Respawn once the burst is over
///
/// No-op (returns false) unless an explosion is running and all of its
/// particles are gone, so repeated calls never reset the player twice.
pub fn finish(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Exploding || !state.particles.is_empty() {
        return false;
    }

    let (pos, facing) = state.spawn_point();
    state.player.respawn_at(pos, facing);
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Respawned);
    log::info!("Player respawned at ({:.0}, {:.0})", pos.x, pos.y);
    true
}

/// One Exploding tick: animate the burst, respawn when it is done
pub fn step(state: &mut GameState) {
    if state.phase != GamePhase::Exploding {
        return;
    }
    step_particles(&mut state.particles);
    finish(state);
}
