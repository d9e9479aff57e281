//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`, which is passed by
//! `&mut` into each tick. There is no global session object.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use super::spawn::SpawnDirector;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::{EnemyStats, Tuning};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, only the starfield animates
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen, waiting for resume
    Paused,
    /// Run ended; particles keep animating
    GameOver,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    pub max_shoot_cooldown: f32,
    /// Seconds of damage immunity remaining
    pub invincibility_timer: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT - 100.0),
            vel: Vec2::ZERO,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            score: 0,
            shoot_cooldown: 0.0,
            max_shoot_cooldown: tuning.shoot_cooldown,
            invincibility_timer: 0.0,
            alive: true,
        }
    }

    #[inline]
    pub fn half_extents() -> Vec2 {
        Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    pub fn can_shoot(&self) -> bool {
        self.alive && self.shoot_cooldown <= 0.0
    }

    /// Apply damage. Returns true if health actually changed.
    ///
    /// Dead or invincible players ignore damage. A non-lethal hit opens the
    /// invincibility window; a lethal one clamps health at 0.
    pub fn take_damage(&mut self, damage: u32, invincibility: f32) -> bool {
        if !self.alive || self.is_invincible() {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.alive = false;
        } else {
            self.invincibility_timer = invincibility;
        }
        true
    }

    /// Heal, clamped to max health
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Fraction of the shoot cooldown that has elapsed (1.0 = ready)
    pub fn shoot_readiness(&self) -> f32 {
        if self.max_shoot_cooldown <= 0.0 {
            return 1.0;
        }
        (1.0 - self.shoot_cooldown / self.max_shoot_cooldown).clamp(0.0, 1.0)
    }
}

/// An enemy ship (standard or boss)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub contact_damage: u32,
    pub points: u64,
    pub shoot_timer: f32,
    pub shoot_interval: f32,
    pub is_boss: bool,
    pub radius: f32,
}

impl Enemy {
    fn from_stats(pos: Vec2, vel: Vec2, stats: &EnemyStats, is_boss: bool) -> Self {
        Self {
            pos,
            vel,
            health: stats.health,
            max_health: stats.health,
            contact_damage: stats.contact_damage,
            points: stats.points,
            shoot_timer: 0.0,
            shoot_interval: stats.shoot_interval,
            is_boss,
            radius: stats.radius,
        }
    }

    /// A standard enemy at `pos` with the given velocity
    pub fn standard(pos: Vec2, vel: Vec2, tuning: &Tuning) -> Self {
        Self::from_stats(pos, vel, &tuning.enemy, false)
    }

    /// A boss enemy at `pos`, descending straight down
    pub fn boss(pos: Vec2, tuning: &Tuning) -> Self {
        Self::from_stats(pos, Vec2::new(0.0, tuning.boss_speed), &tuning.boss, true)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamped at 0. Returns true if this hit was lethal.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(damage);
        was_alive && !self.is_alive()
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT + ENEMY_EXIT_MARGIN
    }

    /// Axis-aligned bounds of the enemy's circle, as half extents
    pub fn half_extents(&self) -> Vec2 {
        Vec2::splat(self.radius)
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    pub radius: f32,
    /// Consumed by a hit; removed at the end of the tick
    pub spent: bool,
}

impl Projectile {
    /// Player shot, fired from just above the ship's nose
    pub fn from_player(player: &Player, tuning: &Tuning) -> Self {
        Self {
            pos: player.pos - Vec2::new(0.0, tuning.player_muzzle_offset),
            vel: Vec2::new(0.0, -tuning.player_projectile_speed),
            owner: Owner::Player,
            radius: tuning.player_projectile_radius,
            spent: false,
        }
    }

    /// Enemy shot, fired from just below the enemy's hull
    pub fn from_enemy(enemy: &Enemy, tuning: &Tuning) -> Self {
        Self {
            pos: enemy.pos + Vec2::new(0.0, enemy.radius + 10.0),
            vel: Vec2::new(0.0, tuning.enemy_projectile_speed),
            owner: Owner::Enemy,
            radius: tuning.enemy_projectile_radius,
            spent: false,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        match self.owner {
            Owner::Player => self.pos.y < -PROJECTILE_EXIT_MARGIN,
            Owner::Enemy => self.pos.y > PLAYFIELD_HEIGHT + PROJECTILE_EXIT_MARGIN,
        }
    }
}

/// Power-up kinds
///
/// Only `Heal` has a gameplay effect; the others are reserved slots with
/// their own look but no effect yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heal,
    Shield,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Heal,
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
    /// Seconds alive, drives the pulse animation
    pub pulse_phase: f32,
    /// Picked up; removed at the end of the tick
    pub collected: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, POWER_UP_FALL_SPEED),
            kind,
            pulse_phase: 0.0,
            collected: false,
        }
    }

    #[inline]
    pub fn half_extents() -> Vec2 {
        Vec2::splat(POWER_UP_HALF_SIZE)
    }

    /// Brightness multiplier in [0, 1]
    pub fn pulse(&self) -> f32 {
        (self.pulse_phase * 5.0).sin() * 0.5 + 0.5
    }

    /// Apply this power-up's effect to the player
    pub fn apply(&self, player: &mut Player, tuning: &Tuning) {
        match self.kind {
            PowerUpKind::Heal => player.heal(tuning.heal_amount),
            // Reserved: no effect defined
            PowerUpKind::Shield | PowerUpKind::RapidFire => {}
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT + POWER_UP_EXIT_MARGIN
    }
}

/// Decorative background star
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
}

/// Random spawn x, kept away from the side edges
pub fn random_spawn_x(rng: &mut impl Rng) -> f32 {
    rng.random_range(SPAWN_EDGE_MARGIN..PLAYFIELD_WIDTH - SPAWN_EDGE_MARGIN)
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Session RNG; every random draw goes through it
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Frames simulated since process start (all phases)
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub particles: ParticleSystem,
    pub spawner: SpawnDirector,
    pub stars: Vec<Star>,
}

impl GameState {
    /// Create a new game state with default tuning and settings
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..PLAYFIELD_WIDTH),
                    rng.random_range(0.0..PLAYFIELD_HEIGHT),
                ),
            })
            .collect();

        Self {
            seed,
            rng,
            player: Player::new(&tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            particles: ParticleSystem::new(&settings, &tuning),
            spawner: SpawnDirector::new(&tuning),
            stars,
            phase: GamePhase::Menu,
            time_ticks: 0,
            tuning,
            settings,
        }
    }

    /// Reinitialize everything a session owns. RNG stream and starfield carry on.
    pub fn reset_session(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.spawner = SpawnDirector::new(&self.tuning);
    }

    /// Emit a particle burst at `pos`
    pub fn burst(&mut self, pos: Vec2) {
        self.particles.burst(pos);
    }

    /// Live enemies (health above 0)
    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Drop spent, collected, dead and off-screen entities
    pub fn prune(&mut self) {
        self.enemies.retain(|e| e.is_alive() && !e.is_off_screen());
        self.projectiles.retain(|p| !p.spent && !p.is_off_screen());
        self.power_ups.retain(|p| !p.collected && !p.is_off_screen());
    }
}
