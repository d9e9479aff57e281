//! Wave-driven enemy spawning and power-up drops

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, PowerUp, PowerUpKind, random_spawn_x};
use crate::consts::*;
use crate::sample_range;
use crate::tuning::Tuning;

/// What a spawn-timer firing produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEvent {
    Enemy,
    Boss,
}

/// Wave counters and spawn timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Current wave (1-based)
    pub wave_number: u32,
    pub enemies_per_wave: u32,
    pub enemies_spawned_this_wave: u32,
    pub boss_spawned_this_wave: bool,
    pub enemy_spawn_timer: f32,
    pub enemy_spawn_interval: f32,
    pub power_up_spawn_timer: f32,
}

impl SpawnDirector {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wave_number: 1,
            enemies_per_wave: tuning.initial_enemies_per_wave,
            enemies_spawned_this_wave: 0,
            boss_spawned_this_wave: false,
            enemy_spawn_timer: 0.0,
            enemy_spawn_interval: tuning.base_spawn_interval,
            power_up_spawn_timer: tuning.power_up_initial_timer,
        }
    }

    /// All standard enemies for this wave have been created
    pub fn wave_quota_met(&self) -> bool {
        self.enemies_spawned_this_wave >= self.enemies_per_wave
    }

    /// Advance both spawn timers, pushing any new entities
    pub fn update(
        &mut self,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        power_ups: &mut Vec<PowerUp>,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<SpawnEvent> {
        let event = self.update_enemy_timer(dt, enemies, tuning, rng);

        self.power_up_spawn_timer += dt;
        if self.power_up_spawn_timer >= tuning.power_up_period {
            let pos = Vec2::new(random_spawn_x(rng), SPAWN_Y);
            let kind = PowerUpKind::random(rng);
            log::debug!("Timed power-up {:?} at x={:.0}", kind, pos.x);
            power_ups.push(PowerUp::new(pos, kind));
            self.power_up_spawn_timer = 0.0;
        }

        event
    }

    fn update_enemy_timer(
        &mut self,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<SpawnEvent> {
        self.enemy_spawn_timer += dt;
        if self.enemy_spawn_timer < self.enemy_spawn_interval {
            return None;
        }
        self.enemy_spawn_timer = 0.0;

        if !self.wave_quota_met() {
            let pos = Vec2::new(random_spawn_x(rng), SPAWN_Y);
            let vel = Vec2::new(
                sample_range(rng, -tuning.enemy_max_drift, tuning.enemy_max_drift),
                sample_range(rng, tuning.enemy_min_descent, tuning.enemy_max_descent),
            );
            let mut enemy = Enemy::standard(pos, vel, tuning);
            enemy.shoot_timer = rng.random::<f32>() * enemy.shoot_interval;
            enemies.push(enemy);
            self.enemies_spawned_this_wave += 1;
            log::debug!(
                "Wave {}: enemy {}/{} at x={:.0}",
                self.wave_number,
                self.enemies_spawned_this_wave,
                self.enemies_per_wave,
                pos.x
            );
            Some(SpawnEvent::Enemy)
        } else if tuning.is_boss_wave(self.wave_number) && !self.boss_spawned_this_wave {
            let pos = Vec2::new(random_spawn_x(rng), SPAWN_Y);
            let mut boss = Enemy::boss(pos, tuning);
            boss.shoot_timer = rng.random::<f32>() * boss.shoot_interval;
            enemies.push(boss);
            self.boss_spawned_this_wave = true;
            log::info!("Wave {}: boss incoming", self.wave_number);
            Some(SpawnEvent::Boss)
        } else {
            None
        }
    }

    /// Advance to the next wave once the quota is spawned and no enemy is
    /// left alive. Returns true if the wave advanced.
    pub fn check_wave_complete(&mut self, enemies_alive: usize, tuning: &Tuning) -> bool {
        if !self.wave_quota_met() || enemies_alive > 0 {
            return false;
        }
        self.wave_number += 1;
        self.enemies_per_wave += tuning.enemies_per_wave_increment;
        self.enemies_spawned_this_wave = 0;
        self.boss_spawned_this_wave = false;
        self.enemy_spawn_interval = tuning.spawn_interval_for_wave(self.wave_number);
        log::info!(
            "Wave {} begins: {} enemies, spawn every {:.2}s",
            self.wave_number,
            self.enemies_per_wave,
            self.enemy_spawn_interval
        );
        true
    }

    /// Roll the on-kill power-up drop at `pos`
    pub fn try_drop_power_up(
        pos: Vec2,
        power_ups: &mut Vec<PowerUp>,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> bool {
        if !rng.random_bool(tuning.power_up_drop_chance.clamp(0.0, 1.0)) {
            return false;
        }
        let kind = PowerUpKind::random(rng);
        log::debug!("Dropped power-up {:?}", kind);
        power_ups.push(PowerUp::new(pos, kind));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (SpawnDirector, Tuning, Pcg32) {
        let tuning = Tuning::default();
        (SpawnDirector::new(&tuning), tuning, Pcg32::seed_from_u64(77))
    }

    /// Run the spawn timer until it fires once
    fn fire(
        director: &mut SpawnDirector,
        enemies: &mut Vec<Enemy>,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> Option<SpawnEvent> {
        let mut power_ups = Vec::new();
        let dt = director.enemy_spawn_interval;
        director.update(dt, enemies, &mut power_ups, tuning, rng)
    }

    #[test]
    fn test_initial_values() {
        let (director, _, _) = setup();
        assert_eq!(director.wave_number, 1);
        assert_eq!(director.enemies_per_wave, 5);
        assert_eq!(director.enemies_spawned_this_wave, 0);
        assert_eq!(director.enemy_spawn_interval, 1.0);
        assert!(!director.boss_spawned_this_wave);
    }

    #[test]
    fn test_spawns_on_interval() {
        let (mut director, tuning, mut rng) = setup();
        let mut enemies = Vec::new();
        let mut power_ups = Vec::new();

        assert_eq!(director.update(0.5, &mut enemies, &mut power_ups, &tuning, &mut rng), None);
        assert!(enemies.is_empty());
        assert_eq!(
            director.update(0.5, &mut enemies, &mut power_ups, &tuning, &mut rng),
            Some(SpawnEvent::Enemy)
        );
        assert_eq!(enemies.len(), 1);
        assert_eq!(director.enemy_spawn_timer, 0.0);

        let enemy = &enemies[0];
        assert!(
            enemy.pos.x >= SPAWN_EDGE_MARGIN && enemy.pos.x < PLAYFIELD_WIDTH - SPAWN_EDGE_MARGIN
        );
        assert_eq!(enemy.pos.y, SPAWN_Y);
        assert!(enemy.shoot_timer >= 0.0 && enemy.shoot_timer < enemy.shoot_interval);
    }

    #[test]
    fn test_zero_drift_and_fixed_descent() {
        let (mut director, mut tuning, mut rng) = setup();
        tuning.enemy_max_drift = 0.0;
        tuning.enemy_min_descent = 70.0;
        tuning.enemy_max_descent = 70.0;
        let mut enemies = Vec::new();

        for _ in 0..3 {
            assert_eq!(
                fire(&mut director, &mut enemies, &tuning, &mut rng),
                Some(SpawnEvent::Enemy)
            );
        }
        assert!(enemies.iter().all(|e| e.vel == Vec2::new(0.0, 70.0)));
    }

    #[test]
    fn test_spawn_count_never_exceeds_quota() {
        let (mut director, tuning, mut rng) = setup();
        let mut enemies = Vec::new();
        for _ in 0..20 {
            fire(&mut director, &mut enemies, &tuning, &mut rng);
            assert!(director.enemies_spawned_this_wave <= director.enemies_per_wave);
        }
        // Wave 1 is not a boss wave
        assert_eq!(enemies.len(), 5);
        assert!(enemies.iter().all(|e| !e.is_boss));
    }

    #[test]
    fn test_wave_advances_once_after_all_removed() {
        let (mut director, tuning, mut rng) = setup();
        let mut enemies = Vec::new();
        for _ in 0..5 {
            fire(&mut director, &mut enemies, &tuning, &mut rng);
        }
        assert_eq!(director.enemies_spawned_this_wave, 5);

        // Still alive: no advance
        assert!(!director.check_wave_complete(enemies.len(), &tuning));

        enemies.clear();
        assert!(director.check_wave_complete(0, &tuning));
        assert_eq!(director.wave_number, 2);
        assert_eq!(director.enemies_per_wave, 7);
        assert_eq!(director.enemies_spawned_this_wave, 0);
        assert!((director.enemy_spawn_interval - 0.9).abs() < 1e-6);

        // Quota for the new wave is not met, so no second advance
        assert!(!director.check_wave_complete(0, &tuning));
        assert_eq!(director.wave_number, 2);
    }

    #[test]
    fn test_no_advance_before_quota() {
        let (mut director, tuning, mut rng) = setup();
        let mut enemies = Vec::new();
        fire(&mut director, &mut enemies, &tuning, &mut rng);
        assert!(!director.check_wave_complete(0, &tuning));
        assert_eq!(director.wave_number, 1);
    }

    #[test]
    fn test_boss_only_on_multiple_of_three() {
        let (_, tuning, mut rng) = setup();
        for wave in 1..=9 {
            let mut director = SpawnDirector::new(&tuning);
            director.wave_number = wave;
            director.enemies_spawned_this_wave = director.enemies_per_wave;

            let mut enemies = Vec::new();
            for _ in 0..5 {
                fire(&mut director, &mut enemies, &tuning, &mut rng);
            }
            let bosses = enemies.iter().filter(|e| e.is_boss).count();
            if wave % 3 == 0 {
                assert_eq!(bosses, 1, "wave {wave}");
                assert!(director.boss_spawned_this_wave);
                let boss = &enemies[0];
                assert_eq!(boss.health, BOSS_HEALTH);
                assert_eq!(boss.contact_damage, BOSS_CONTACT_DAMAGE);
                assert_eq!(boss.points, BOSS_POINTS);
            } else {
                assert_eq!(bosses, 0, "wave {wave}");
            }
        }
    }

    #[test]
    fn test_boss_flag_resets_on_next_wave() {
        let (mut director, tuning, mut rng) = setup();
        director.wave_number = 3;
        director.enemies_spawned_this_wave = director.enemies_per_wave;
        let mut enemies = Vec::new();
        assert_eq!(fire(&mut director, &mut enemies, &tuning, &mut rng), Some(SpawnEvent::Boss));

        assert!(director.check_wave_complete(0, &tuning));
        assert!(!director.boss_spawned_this_wave);
        assert_eq!(director.wave_number, 4);
    }

    #[test]
    fn test_power_up_timer() {
        let (mut director, tuning, mut rng) = setup();
        let mut enemies = Vec::new();
        let mut power_ups = Vec::new();

        // Starts at 10s, fires at 15s
        director.update(4.9, &mut enemies, &mut power_ups, &tuning, &mut rng);
        assert!(power_ups.is_empty());
        director.update(0.2, &mut enemies, &mut power_ups, &tuning, &mut rng);
        assert_eq!(power_ups.len(), 1);
        assert_eq!(director.power_up_spawn_timer, 0.0);

        director.update(14.9, &mut enemies, &mut power_ups, &tuning, &mut rng);
        assert_eq!(power_ups.len(), 1);
        director.update(0.2, &mut enemies, &mut power_ups, &tuning, &mut rng);
        assert_eq!(power_ups.len(), 2);
    }

    #[test]
    fn test_drop_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut power_ups = Vec::new();
        let mut tuning = Tuning::default();

        tuning.power_up_drop_chance = 0.0;
        for _ in 0..50 {
            let dropped =
                SpawnDirector::try_drop_power_up(Vec2::ZERO, &mut power_ups, &tuning, &mut rng);
            assert!(!dropped);
        }
        tuning.power_up_drop_chance = 1.0;
        let pos = Vec2::new(3.0, 4.0);
        assert!(SpawnDirector::try_drop_power_up(pos, &mut power_ups, &tuning, &mut rng));
        assert_eq!(power_ups.len(), 1);
        assert_eq!(power_ups[0].pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_drop_rate_is_roughly_ten_percent() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut power_ups = Vec::new();
        let tuning = Tuning::default();
        let drops = (0..10_000)
            .filter(|_| {
                SpawnDirector::try_drop_power_up(Vec2::ZERO, &mut power_ups, &tuning, &mut rng)
            })
            .count();
        assert!((800..1200).contains(&drops), "drops = {drops}");
    }
}
