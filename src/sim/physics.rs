//! Continuous-time integration for every entity kind
//!
//! Pure and deterministic: no randomness, no entity creation. Anything that
//! leaves the playfield is only flagged by position; `GameState::prune`
//! removes it after collisions run.

use glam::Vec2;

use super::state::{Enemy, GameState, Player, PowerUp, Projectile};
use crate::consts::*;

/// Move the player from the held movement axes, clamp to the playfield and
/// count down its timers
pub fn step_player(player: &mut Player, axis: Vec2, speed: f32, dt: f32) {
    if !player.alive {
        return;
    }
    player.vel = axis.clamp(Vec2::NEG_ONE, Vec2::ONE) * speed;
    player.pos += player.vel * dt;

    let half = Player::half_extents();
    player.pos = player
        .pos
        .clamp(half, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) - half);

    player.shoot_cooldown = (player.shoot_cooldown - dt).max(0.0);
    player.invincibility_timer = (player.invincibility_timer - dt).max(0.0);
}

/// Move an enemy, bouncing off the side edges. Returns true if it bounced.
///
/// At most one reflection per call; enemies are never clamped vertically.
pub fn step_enemy(enemy: &mut Enemy, dt: f32) -> bool {
    enemy.pos += enemy.vel * dt;
    enemy.shoot_timer += dt;

    let r = enemy.radius;
    if enemy.pos.x < r {
        enemy.pos.x = r;
        enemy.vel.x = -enemy.vel.x;
        true
    } else if enemy.pos.x > PLAYFIELD_WIDTH - r {
        enemy.pos.x = PLAYFIELD_WIDTH - r;
        enemy.vel.x = -enemy.vel.x;
        true
    } else {
        false
    }
}

#[inline]
pub fn step_projectile(projectile: &mut Projectile, dt: f32) {
    projectile.pos += projectile.vel * dt;
}

#[inline]
pub fn step_power_up(power_up: &mut PowerUp, dt: f32) {
    power_up.pos += power_up.vel * dt;
    power_up.pulse_phase += dt;
}

/// Gravity on velocity first, then position
#[inline]
pub fn integrate_particle(pos: &mut Vec2, vel: &mut Vec2, dt: f32, gravity: f32) {
    vel.y += gravity * dt;
    *pos += *vel * dt;
}

/// Advance player, enemies, projectiles and power-ups by `dt`
pub fn step_entities(state: &mut GameState, axis: Vec2, dt: f32) {
    step_player(&mut state.player, axis, state.tuning.player_speed, dt);
    for enemy in &mut state.enemies {
        step_enemy(enemy, dt);
    }
    for projectile in &mut state.projectiles {
        step_projectile(projectile, dt);
    }
    for power_up in &mut state.power_ups {
        step_power_up(power_up, dt);
    }
}
