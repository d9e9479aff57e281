//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so balance passes
//! don't need a rebuild. Missing JSON fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stats shared by standard enemies and bosses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub radius: f32,
    pub health: u32,
    pub contact_damage: u32,
    pub points: u64,
    pub shoot_interval: f32,
}

/// Gameplay balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_speed: f32,
    pub player_max_health: u32,
    pub shoot_cooldown: f32,
    pub invincibility_duration: f32,

    // === Projectiles ===
    pub player_projectile_speed: f32,
    pub player_projectile_damage: u32,
    pub enemy_projectile_speed: f32,
    pub enemy_projectile_damage: u32,
    pub player_projectile_radius: f32,
    pub enemy_projectile_radius: f32,
    /// Player shots spawn this far above the ship's center
    pub player_muzzle_offset: f32,
    pub ram_damage: u32,

    // === Enemies ===
    pub enemy: EnemyStats,
    pub boss: EnemyStats,
    /// Standard enemy horizontal speed range is [-x, x)
    pub enemy_max_drift: f32,
    /// Standard enemy vertical speed range
    pub enemy_min_descent: f32,
    pub enemy_max_descent: f32,
    pub boss_speed: f32,

    // === Waves ===
    pub initial_enemies_per_wave: u32,
    pub enemies_per_wave_increment: u32,
    pub base_spawn_interval: f32,
    pub spawn_interval_decay: f32,
    pub spawn_interval_floor: f32,
    pub boss_wave_period: u32,

    // === Power-ups ===
    pub power_up_period: f32,
    pub power_up_initial_timer: f32,
    pub power_up_drop_chance: f64,
    pub heal_amount: u32,

    // === Particles ===
    pub particles_per_tick: usize,
    pub emission_duration: f32,
    pub particle_gravity: f32,
    /// Per-particle ranges, sampled as [min, max)
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,
    pub particle_min_lifetime: f32,
    pub particle_max_lifetime: f32,
    pub particle_min_size: f32,
    pub particle_max_size: f32,
    /// Bursts emitted on a kill and on a ram
    pub kill_bursts: usize,
    pub ram_bursts: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            shoot_cooldown: PLAYER_SHOOT_COOLDOWN,
            invincibility_duration: INVINCIBILITY_DURATION,

            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            player_projectile_damage: PLAYER_PROJECTILE_DAMAGE,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            enemy_projectile_damage: ENEMY_PROJECTILE_DAMAGE,
            player_projectile_radius: PLAYER_PROJECTILE_RADIUS,
            enemy_projectile_radius: ENEMY_PROJECTILE_RADIUS,
            player_muzzle_offset: PLAYER_MUZZLE_OFFSET,
            ram_damage: RAM_DAMAGE,

            enemy: EnemyStats {
                radius: ENEMY_RADIUS,
                health: ENEMY_HEALTH,
                contact_damage: ENEMY_CONTACT_DAMAGE,
                points: ENEMY_POINTS,
                shoot_interval: ENEMY_SHOOT_INTERVAL,
            },
            boss: EnemyStats {
                radius: BOSS_RADIUS,
                health: BOSS_HEALTH,
                contact_damage: BOSS_CONTACT_DAMAGE,
                points: BOSS_POINTS,
                shoot_interval: BOSS_SHOOT_INTERVAL,
            },
            enemy_max_drift: 50.0,
            enemy_min_descent: 50.0,
            enemy_max_descent: 100.0,
            boss_speed: BOSS_SPEED,

            initial_enemies_per_wave: INITIAL_ENEMIES_PER_WAVE,
            enemies_per_wave_increment: ENEMIES_PER_WAVE_INCREMENT,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            boss_wave_period: BOSS_WAVE_PERIOD,

            power_up_period: POWER_UP_PERIOD,
            power_up_initial_timer: POWER_UP_INITIAL_TIMER,
            power_up_drop_chance: POWER_UP_DROP_CHANCE,
            heal_amount: HEAL_AMOUNT,

            particles_per_tick: PARTICLES_PER_TICK,
            emission_duration: EMISSION_DURATION,
            particle_gravity: PARTICLE_GRAVITY,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_max_speed: PARTICLE_MAX_SPEED,
            particle_min_lifetime: PARTICLE_MIN_LIFETIME,
            particle_max_lifetime: PARTICLE_MAX_LIFETIME,
            particle_min_size: PARTICLE_MIN_SIZE,
            particle_max_size: PARTICLE_MAX_SIZE,

            kill_bursts: KILL_BURSTS,
            ram_bursts: RAM_BURSTS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning, falling back to defaults on a missing or malformed document
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Spawn interval for a wave: linear decay with a hard floor
    pub fn spawn_interval_for_wave(&self, wave: u32) -> f32 {
        (self.base_spawn_interval - wave as f32 * self.spawn_interval_decay)
            .max(self.spawn_interval_floor)
    }

    /// Whether a wave gets a boss
    pub fn is_boss_wave(&self, wave: u32) -> bool {
        self.boss_wave_period > 0 && wave.is_multiple_of(self.boss_wave_period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{ "heal_amount": 50, "boss_wave_period": 4 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.heal_amount, 50);
        assert_eq!(tuning.boss_wave_period, 4);
        assert_eq!(tuning.player_max_health, PLAYER_MAX_HEALTH);
        assert_eq!(tuning.enemy, Tuning::default().enemy);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::load_or_default(Some("{ not json"));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::load_or_default(None), Tuning::default());
    }

    #[test]
    fn test_feedback_and_projectile_overrides() {
        let tuning = Tuning::from_json(
            r#"{ "kill_bursts": 1, "enemy_projectile_radius": 8.0, "particle_max_size": 30.0 }"#,
        )
        .expect("valid tuning");
        assert_eq!(tuning.kill_bursts, 1);
        assert_eq!(tuning.ram_bursts, RAM_BURSTS);
        assert_eq!(tuning.enemy_projectile_radius, 8.0);
        assert_eq!(tuning.particle_max_size, 30.0);
        assert_eq!(tuning.particle_min_size, PARTICLE_MIN_SIZE);
    }

    #[test]
    fn test_spawn_interval_decay_and_floor() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval_for_wave(2) - 0.9).abs() < 1e-6);
        assert!((tuning.spawn_interval_for_wave(10) - 0.5).abs() < 1e-6);
        assert_eq!(tuning.spawn_interval_for_wave(14), SPAWN_INTERVAL_FLOOR);
        assert_eq!(tuning.spawn_interval_for_wave(100), SPAWN_INTERVAL_FLOOR);

        // Monotonically non-increasing
        let mut prev = f32::MAX;
        for wave in 1..40 {
            let interval = tuning.spawn_interval_for_wave(wave);
            assert!(interval <= prev);
            prev = interval;
        }
    }

    #[test]
    fn test_boss_waves() {
        let tuning = Tuning::default();
        assert!(!tuning.is_boss_wave(1));
        assert!(!tuning.is_boss_wave(2));
        assert!(tuning.is_boss_wave(3));
        assert!(tuning.is_boss_wave(6));
        assert!(!tuning.is_boss_wave(7));
    }
}
