//! Nova Strike - simulation core for a wave-based 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, physics, spawning, collisions, game phases)
//! - `draw`: Read-only draw list handed to the external renderer
//! - `settings`: Presentation quality presets
//! - `tuning`: Data-driven game balance

pub mod draw;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use draw::{DrawCommand, DrawList, Hud, Overlay, ParticleVertex, Presentation};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Nominal frame step (60 updates per second)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (origin top-left, +y down)
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_HALF_WIDTH: f32 = 30.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 500.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.2;
    /// Player shots spawn this far above the ship's center
    pub const PLAYER_MUZZLE_OFFSET: f32 = 30.0;
    /// Damage immunity after a non-lethal hit (seconds)
    pub const INVINCIBILITY_DURATION: f32 = 1.5;

    /// Projectiles
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 5.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 800.0;
    pub const PLAYER_PROJECTILE_DAMAGE: u32 = 25;
    pub const ENEMY_PROJECTILE_RADIUS: f32 = 4.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 400.0;
    pub const ENEMY_PROJECTILE_DAMAGE: u32 = 10;

    /// Damage an enemy takes when it rams the player (kills a standard enemy)
    pub const RAM_DAMAGE: u32 = 100;

    /// Standard enemy
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_HEALTH: u32 = 50;
    pub const ENEMY_CONTACT_DAMAGE: u32 = 10;
    pub const ENEMY_POINTS: u64 = 100;
    pub const ENEMY_SHOOT_INTERVAL: f32 = 2.0;

    /// Boss enemy
    pub const BOSS_RADIUS: f32 = 40.0;
    pub const BOSS_HEALTH: u32 = 500;
    pub const BOSS_CONTACT_DAMAGE: u32 = 30;
    pub const BOSS_POINTS: u64 = 500;
    pub const BOSS_SHOOT_INTERVAL: f32 = 1.5;
    pub const BOSS_SPEED: f32 = 50.0;

    /// Enemies spawn above the top edge, this far from the side edges
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;
    pub const SPAWN_Y: f32 = -50.0;

    /// Power-ups
    pub const POWER_UP_HALF_SIZE: f32 = 15.0;
    pub const POWER_UP_FALL_SPEED: f32 = 100.0;
    pub const POWER_UP_PERIOD: f32 = 15.0;
    pub const POWER_UP_INITIAL_TIMER: f32 = 10.0;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.10;
    pub const HEAL_AMOUNT: u32 = 30;

    /// Wave progression
    pub const INITIAL_ENEMIES_PER_WAVE: u32 = 5;
    pub const ENEMIES_PER_WAVE_INCREMENT: u32 = 2;
    pub const BASE_SPAWN_INTERVAL: f32 = 1.0;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.05;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.3;
    pub const BOSS_WAVE_PERIOD: u32 = 3;

    /// Off-screen margins past which entities are pruned
    pub const ENEMY_EXIT_MARGIN: f32 = 100.0;
    pub const PROJECTILE_EXIT_MARGIN: f32 = 10.0;
    pub const POWER_UP_EXIT_MARGIN: f32 = 50.0;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 100.0;
    pub const PARTICLES_PER_TICK: usize = 5;
    pub const EMISSION_DURATION: f32 = 0.1;
    pub const PARTICLE_MIN_SPEED: f32 = 50.0;
    pub const PARTICLE_MAX_SPEED: f32 = 100.0;
    pub const PARTICLE_MIN_LIFETIME: f32 = 0.5;
    pub const PARTICLE_MAX_LIFETIME: f32 = 1.5;
    pub const PARTICLE_MIN_SIZE: f32 = 5.0;
    pub const PARTICLE_MAX_SIZE: f32 = 15.0;

    /// Bursts emitted per collision event
    pub const KILL_BURSTS: usize = 3;
    pub const RAM_BURSTS: usize = 5;

    /// Menu starfield
    pub const STAR_COUNT: usize = 100;
    pub const STAR_FALL_SPEED: f32 = 50.0;
}

/// Strict overlap of two axis-aligned boxes given as center + half extents
#[inline]
pub fn aabb_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

/// Strict overlap of two circles
#[inline]
pub fn circle_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    a_center.distance(b_center) < a_radius + b_radius
}

/// Uniform sample from `[lo, hi)`. Empty or inverted ranges yield `lo`, so a
/// tuning value like zero drift never reaches the sampler.
pub fn sample_range(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if lo < hi && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else if lo.is_finite() {
        lo
    } else {
        0.0
    }
}
