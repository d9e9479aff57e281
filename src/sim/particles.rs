//! Particle bursts for impact and death feedback
//!
//! Emitters are short-lived: each one sprays particles for a brief emission
//! window after creation, then lingers until its last particle fades. The
//! system keeps a FIFO of emitters and evicts the oldest past the cap.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::integrate_particle;
use crate::sample_range;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    /// Seconds remaining
    pub lifetime: f32,
    /// Initial lifetime, for fade-out
    pub max_lifetime: f32,
    pub size: f32,
}

impl Particle {
    /// Spawn at `origin` with random direction, speed, color, lifetime and size
    pub fn random(origin: Vec2, config: &ParticleConfig, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = sample_range(rng, config.min_speed, config.max_speed);
        let lifetime = sample_range(rng, config.min_lifetime, config.max_lifetime);
        Self {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            color: [
                rng.random_range(0..=255),
                rng.random_range(0..=255),
                rng.random_range(0..=255),
            ],
            lifetime,
            max_lifetime: lifetime,
            size: sample_range(rng, config.min_size, config.max_size),
        }
    }

    /// Linear fade: remaining / initial lifetime
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime <= 0.0 {
            0.0
        } else {
            (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        }
    }
}

/// A burst of particles bound to an impact point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEmitter {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
    /// Seconds of emission left; emits while positive
    pub emission_remaining: f32,
}

impl ParticleEmitter {
    pub fn new(origin: Vec2, emission_duration: f32) -> Self {
        Self {
            origin,
            particles: Vec::new(),
            emission_remaining: emission_duration,
        }
    }

    pub fn is_emitting(&self) -> bool {
        self.emission_remaining > 0.0
    }

    /// Done emitting and every particle has expired
    pub fn is_finished(&self) -> bool {
        !self.is_emitting() && self.particles.is_empty()
    }

    /// Emit a batch (if active), integrate, then drop expired particles
    pub fn update(&mut self, dt: f32, config: &ParticleConfig, rng: &mut impl Rng) {
        if self.is_emitting() {
            let room = config.max_particles.saturating_sub(self.particles.len());
            for _ in 0..config.per_tick.min(room) {
                self.particles.push(Particle::random(self.origin, config, rng));
            }
        }

        for p in &mut self.particles {
            integrate_particle(&mut p.pos, &mut p.vel, dt, config.gravity);
            p.lifetime -= dt;
        }
        self.particles.retain(|p| p.lifetime > 0.0);

        if self.is_emitting() {
            self.emission_remaining = (self.emission_remaining - dt).max(0.0);
        }
    }
}

/// Caps and rates, fixed at construction from settings and tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub max_particles: usize,
    pub max_emitters: usize,
    pub per_tick: usize,
    pub emission_duration: f32,
    pub gravity: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub min_size: f32,
    pub max_size: f32,
}

/// All live emitters, oldest first
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub config: ParticleConfig,
    emitters: VecDeque<ParticleEmitter>,
}

impl ParticleSystem {
    pub fn new(settings: &Settings, tuning: &Tuning) -> Self {
        Self::with_config(ParticleConfig {
            max_particles: settings.max_particles_per_emitter(),
            max_emitters: settings.max_emitters(),
            per_tick: tuning.particles_per_tick,
            emission_duration: tuning.emission_duration,
            gravity: tuning.particle_gravity,
            min_speed: tuning.particle_min_speed,
            max_speed: tuning.particle_max_speed,
            min_lifetime: tuning.particle_min_lifetime,
            max_lifetime: tuning.particle_max_lifetime,
            min_size: tuning.particle_min_size,
            max_size: tuning.particle_max_size,
        })
    }

    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            config,
            emitters: VecDeque::with_capacity(config.max_emitters + 1),
        }
    }

    /// Start a new burst at `origin`, evicting the oldest emitters past the cap
    pub fn burst(&mut self, origin: Vec2) {
        if self.config.max_emitters == 0 {
            return;
        }
        self.emitters
            .push_back(ParticleEmitter::new(origin, self.config.emission_duration));
        while self.emitters.len() > self.config.max_emitters {
            if let Some(evicted) = self.emitters.pop_front() {
                log::trace!(
                    "Evicted emitter at ({:.0}, {:.0}) with {} live particles",
                    evicted.origin.x,
                    evicted.origin.y,
                    evicted.particles.len()
                );
            }
        }
    }

    /// Advance every emitter and drop the finished ones
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        let config = self.config;
        for emitter in &mut self.emitters {
            emitter.update(dt, &config, rng);
        }
        self.emitters.retain(|e| !e.is_finished());
    }

    pub fn clear(&mut self) {
        self.emitters.clear();
    }

    pub fn emitters(&self) -> impl Iterator<Item = &ParticleEmitter> {
        self.emitters.iter()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Live particles across all emitters
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.particles.len()).sum()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.emitters.iter().flat_map(|e| e.particles.iter())
    }
}
