//! Collision detection and response
//!
//! Runs once per tick after physics. Pairwise tests are fine at this scale
//! (tens of live entities). The scan never removes anything: hits only set
//! `spent`/`collected` flags or zero an enemy's health, and
//! `GameState::prune` compacts the containers afterwards.

use glam::Vec2;

use super::spawn::SpawnDirector;
use super::state::{GameState, Owner, Player, PowerUp};
use crate::{aabb_overlap, circle_overlap};

/// What happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player projectiles that hit an enemy
    pub hits: u32,
    /// Enemies killed by player projectiles
    pub kills: u32,
    /// Points awarded this pass
    pub points: u64,
    /// Hits that actually reduced player health
    pub player_hits: u32,
    /// Enemies that rammed the player
    pub rams: u32,
    /// Power-ups collected
    pub pickups: u32,
}

/// Resolve all overlaps, in category order:
/// player shots vs enemies, enemy shots vs player, player vs enemy bodies,
/// player vs power-ups
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let GameState {
        player,
        enemies,
        projectiles,
        power_ups,
        particles,
        rng,
        tuning,
        ..
    } = state;
    let mut report = CollisionReport::default();

    // Player projectiles vs enemies: first live enemy in order wins, one hit per shot
    for shot in projectiles
        .iter_mut()
        .filter(|p| p.owner == Owner::Player && !p.spent)
    {
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.is_alive() && circle_overlap(e.pos, e.radius, shot.pos, shot.radius))
        else {
            continue;
        };

        shot.spent = true;
        report.hits += 1;
        particles.burst(shot.pos);

        if enemy.take_damage(tuning.player_projectile_damage) {
            player.score += enemy.points;
            report.kills += 1;
            report.points += enemy.points;
            log::debug!(
                "Killed {} at ({:.0}, {:.0}) for {} points",
                if enemy.is_boss { "boss" } else { "enemy" },
                enemy.pos.x,
                enemy.pos.y,
                enemy.points
            );
            SpawnDirector::try_drop_power_up(enemy.pos, power_ups, tuning, rng);
            for _ in 0..tuning.kill_bursts {
                particles.burst(enemy.pos);
            }
        }
    }

    if !player.alive {
        return report;
    }
    let player_half = Player::half_extents();

    // Enemy projectiles vs player
    for shot in projectiles
        .iter_mut()
        .filter(|p| p.owner == Owner::Enemy && !p.spent)
    {
        if !player.alive {
            break;
        }
        if !aabb_overlap(player.pos, player_half, shot.pos, Vec2::splat(shot.radius)) {
            continue;
        }
        shot.spent = true;
        if player.take_damage(tuning.enemy_projectile_damage, tuning.invincibility_duration) {
            report.player_hits += 1;
        }
        particles.burst(player.pos);
    }

    // Player body vs enemy bodies
    for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
        if !player.alive {
            break;
        }
        if !aabb_overlap(player.pos, player_half, enemy.pos, enemy.half_extents()) {
            continue;
        }
        if player.take_damage(enemy.contact_damage, tuning.invincibility_duration) {
            report.player_hits += 1;
        }
        enemy.take_damage(tuning.ram_damage);
        report.rams += 1;
        for _ in 0..tuning.ram_bursts {
            particles.burst(enemy.pos);
        }
    }

    // Player vs power-ups
    for power_up in power_ups.iter_mut().filter(|p| !p.collected) {
        if !player.alive {
            break;
        }
        if !aabb_overlap(player.pos, player_half, power_up.pos, PowerUp::half_extents()) {
            continue;
        }
        power_up.apply(player, tuning);
        power_up.collected = true;
        report.pickups += 1;
        log::debug!("Picked up {:?}, health {}", power_up.kind, player.health);
        particles.burst(player.pos);
    }

    report
}
