//! Per-frame simulation step
//!
//! Applies phase commands, then runs whatever the resulting phase does
//! with the frame's delta.

use glam::Vec2;
use rand::Rng;

use super::collision::{CollisionReport, resolve_collisions};
use super::physics::step_entities;
use super::state::{GamePhase, GameState, Projectile};
use crate::consts::*;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a new session (Menu)
    pub start: bool,
    /// Pause (Playing)
    pub pause: bool,
    /// Resume (Paused)
    pub resume: bool,
    /// Return to the menu (GameOver)
    pub acknowledge: bool,
    /// Quit the process (any phase)
    pub exit: bool,
    /// Movement keys held
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Shoot key held
    pub shoot: bool,
}

impl TickInput {
    /// Movement axis from held keys; opposite keys cancel
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.down as i32 - self.up as i32;
        Vec2::new(x as f32, y as f32)
    }
}

/// Whether the loop owner should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    ExitRequested,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    if input.exit {
        log::info!("Exit requested");
        return TickOutcome::ExitRequested;
    }

    apply_commands(state, input);

    // Zero, negative or NaN deltas step nothing
    if dt.is_nan() || dt <= 0.0 {
        return TickOutcome::Running;
    }
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu => update_starfield(state, dt),
        GamePhase::Playing => {
            let report = update_playing(state, input, dt);
            if report != CollisionReport::default() {
                log::debug!(
                    "Tick {}: {} hits, {} kills (+{}), {} player hits, {} rams, {} pickups",
                    state.time_ticks,
                    report.hits,
                    report.kills,
                    report.points,
                    report.player_hits,
                    report.rams,
                    report.pickups
                );
            }
        }
        GamePhase::Paused => {}
        GamePhase::GameOver => {
            let GameState { particles, rng, .. } = state;
            particles.update(dt, rng);
        }
    }

    TickOutcome::Running
}

/// Phase transitions driven by input commands
fn apply_commands(state: &mut GameState, input: &TickInput) {
    let next = match state.phase {
        GamePhase::Menu if input.start => {
            state.reset_session();
            log::info!("Session started (seed {})", state.seed);
            GamePhase::Playing
        }
        GamePhase::Playing if input.pause => GamePhase::Paused,
        GamePhase::Paused if input.resume => GamePhase::Playing,
        GamePhase::GameOver if input.acknowledge => GamePhase::Menu,
        phase => phase,
    };
    if next != state.phase {
        log::info!("Phase {:?} -> {:?}", state.phase, next);
        state.phase = next;
    }
}

/// Full gameplay pipeline. Returns the collision report for this frame.
fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) -> CollisionReport {
    // Player fire
    if input.shoot && state.player.can_shoot() {
        state
            .projectiles
            .push(Projectile::from_player(&state.player, &state.tuning));
        state.player.shoot_cooldown = state.player.max_shoot_cooldown;
    }

    {
        let GameState {
            spawner,
            enemies,
            power_ups,
            tuning,
            rng,
            ..
        } = state;
        spawner.update(dt, enemies, power_ups, tuning, rng);
    }

    step_entities(state, input.axis(), dt);
    fire_enemy_weapons(state);

    {
        let GameState { particles, rng, .. } = state;
        particles.update(dt, rng);
    }

    let report = resolve_collisions(state);

    if !state.player.alive {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} on wave {}",
            state.player.score,
            state.spawner.wave_number
        );
    }

    state.prune();

    let alive = state.enemies_alive();
    state.spawner.check_wave_complete(alive, &state.tuning);

    report
}

/// Every live enemy whose shoot timer has elapsed fires one shot
fn fire_enemy_weapons(state: &mut GameState) {
    for enemy in &mut state.enemies {
        if enemy.is_alive() && enemy.shoot_timer >= enemy.shoot_interval {
            state
                .projectiles
                .push(Projectile::from_enemy(enemy, &state.tuning));
            enemy.shoot_timer = 0.0;
        }
    }
}

/// Menu background: stars drift down and wrap to a random column at the top
fn update_starfield(state: &mut GameState, dt: f32) {
    let GameState { stars, rng, .. } = state;
    for star in stars.iter_mut() {
        star.pos.y += STAR_FALL_SPEED * dt;
        if star.pos.y > PLAYFIELD_HEIGHT {
            star.pos = Vec2::new(rng.random_range(0.0..PLAYFIELD_WIDTH), -10.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Owner};

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &start(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_menu_only_animates_stars() {
        let mut state = GameState::new(1);
        let before: Vec<Vec2> = state.stars.iter().map(|s| s.pos).collect();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), FRAME_DT);
        }
        assert!(state.stars.iter().zip(&before).any(|(s, b)| s.pos != *b));
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawner.enemy_spawn_timer, 0.0);
        assert!(state.stars.iter().all(|s| s.pos.y <= PLAYFIELD_HEIGHT));
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345);
        tick(&mut state, &start(), FRAME_DT);
        state.enemies.push(Enemy::standard(
            Vec2::new(600.0, 200.0),
            Vec2::new(0.0, 60.0),
            &state.tuning,
        ));

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing moves while paused; pause again is ignored
        let enemy_pos = state.enemies[0].pos;
        let spawn_timer = state.spawner.enemy_spawn_timer;
        for _ in 0..30 {
            tick(&mut state, &pause, FRAME_DT);
        }
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert_eq!(state.spawner.enemy_spawn_timer, spawn_timer);

        let resume = TickInput {
            resume: true,
            ..Default::default()
        };
        tick(&mut state, &resume, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies[0].pos.y > enemy_pos.y);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut state = GameState::new(3);
        tick(&mut state, &start(), FRAME_DT);

        let shoot = TickInput {
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &shoot, FRAME_DT);
        let shots = |s: &GameState| {
            s.projectiles
                .iter()
                .filter(|p| p.owner == Owner::Player)
                .count()
        };
        assert_eq!(shots(&state), 1);

        // 0.2s cooldown at 60 Hz: the next few frames can't fire
        tick(&mut state, &shoot, FRAME_DT);
        assert_eq!(shots(&state), 1);

        for _ in 0..12 {
            tick(&mut state, &shoot, FRAME_DT);
        }
        assert!(shots(&state) >= 2);
    }

    #[test]
    fn test_enemy_fires_on_interval() {
        let mut state = GameState::new(4);
        tick(&mut state, &start(), FRAME_DT);
        let mut enemy = Enemy::standard(Vec2::new(600.0, 100.0), Vec2::ZERO, &state.tuning);
        enemy.shoot_timer = enemy.shoot_interval - FRAME_DT / 2.0;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        let enemy_shots: Vec<_> = state
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Enemy)
            .collect();
        assert_eq!(enemy_shots.len(), 1);
        assert_eq!(state.enemies[0].shoot_timer, 0.0);
        assert!(enemy_shots[0].pos.y > state.enemies[0].pos.y);
    }

    #[test]
    fn test_playing_step_reports_kills() {
        let mut state = GameState::new(5);
        tick(&mut state, &start(), FRAME_DT);
        let mut enemy = Enemy::standard(Vec2::new(300.0, 300.0), Vec2::ZERO, &state.tuning);
        enemy.health = state.tuning.player_projectile_damage;
        state.enemies.push(enemy);
        state.projectiles.push(Projectile {
            pos: Vec2::new(300.0, 300.0),
            vel: Vec2::ZERO,
            owner: Owner::Player,
            radius: state.tuning.player_projectile_radius,
            spent: false,
        });

        let report = update_playing(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(report.hits, 1);
        assert_eq!(report.kills, 1);
        assert_eq!(report.points, ENEMY_POINTS);
        assert_eq!(state.player.score, ENEMY_POINTS);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut state = GameState::new(5);
        tick(&mut state, &start(), FRAME_DT);
        let ticks = state.time_ticks;
        let timer = state.spawner.enemy_spawn_timer;
        let pos = state.player.pos;

        let input = TickInput {
            right: true,
            shoot: true,
            ..Default::default()
        };
        for dt in [0.0, -1.0, f32::NAN] {
            assert_eq!(tick(&mut state, &input, dt), TickOutcome::Running);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.spawner.enemy_spawn_timer, timer);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_exit_from_any_phase() {
        let exit = TickInput {
            exit: true,
            ..Default::default()
        };
        let mut state = GameState::new(6);
        assert_eq!(tick(&mut state, &exit, FRAME_DT), TickOutcome::ExitRequested);
        tick(&mut state, &start(), FRAME_DT);
        assert_eq!(tick(&mut state, &exit, FRAME_DT), TickOutcome::ExitRequested);
    }

    #[test]
    fn test_axis_cancels_opposites() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.axis(), Vec2::new(0.0, -1.0));
    }
}
