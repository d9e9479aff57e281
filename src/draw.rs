//! Read-only draw list for the external renderer
//!
//! The simulation never draws. After each tick the loop owner builds a
//! `DrawList` from a shared borrow of the state and hands it to whatever
//! renders frames.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use crate::sim::particles::Particle;
use crate::sim::state::{Enemy, GamePhase, GameState, Owner, Player, PowerUp, PowerUpKind};

/// Boss health bar geometry, relative to the boss center
const BOSS_BAR_WIDTH: f32 = 100.0;
const BOSS_BAR_HEIGHT: f32 = 10.0;
const BOSS_BAR_OFFSET_Y: f32 = 60.0;

/// Particle point sprite, ready for a vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct ParticleVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub size: f32,
}

impl ParticleVertex {
    /// Color from the particle's RGB, alpha from its remaining lifetime
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            position: p.pos.to_array(),
            color: [
                p.color[0] as f32 / 255.0,
                p.color[1] as f32 / 255.0,
                p.color[2] as f32 / 255.0,
                p.alpha(),
            ],
            size: p.size,
        }
    }
}

/// One drawable thing, tagged by entity kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Star {
        pos: Vec2,
    },
    Player {
        pos: Vec2,
        half_extents: Vec2,
        alive: bool,
        invincible: bool,
    },
    Enemy {
        pos: Vec2,
        radius: f32,
        is_boss: bool,
        health_fraction: f32,
    },
    /// Bar above a boss; `top_left` is the frame corner, `fill` in [0, 1]
    BossHealthBar {
        top_left: Vec2,
        size: Vec2,
        fill: f32,
    },
    Projectile {
        pos: Vec2,
        radius: f32,
        owner: Owner,
    },
    PowerUp {
        pos: Vec2,
        half_extents: Vec2,
        kind: PowerUpKind,
        pulse: f32,
    },
}

/// HUD scalars
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub health: u32,
    pub max_health: u32,
    pub health_fraction: f32,
    pub wave: u32,
    /// 1.0 when the player can fire
    pub shoot_readiness: f32,
}

/// Screen overlay for the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    MainMenu,
    None,
    Paused,
    GameOver { final_score: u64 },
}

/// How text-bearing UI should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Presentation {
    /// Fonts loaded; render labels
    Text,
    /// Fonts unavailable; render placeholder boxes instead of text
    Placeholder,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct DrawList {
    pub phase: GamePhase,
    pub overlay: Overlay,
    pub presentation: Presentation,
    pub hud: Hud,
    /// Back to front: stars, power-ups, enemies, projectiles, player
    pub commands: Vec<DrawCommand>,
    pub particles: Vec<ParticleVertex>,
}

impl DrawList {
    /// Snapshot the post-tick state
    pub fn build(state: &GameState, fonts_available: bool) -> Self {
        let capacity = state.stars.len()
            + state.enemies.len() * 2
            + state.projectiles.len()
            + state.power_ups.len()
            + 1;
        let mut commands = Vec::with_capacity(capacity);
        commands.extend(state.stars.iter().map(|s| DrawCommand::Star { pos: s.pos }));

        let in_session = state.phase != GamePhase::Menu;
        let mut particles = Vec::new();
        if in_session {
            commands.extend(state.power_ups.iter().map(power_up_command));
            for enemy in &state.enemies {
                enemy_commands(enemy, &mut commands);
            }
            commands.extend(state.projectiles.iter().map(|p| DrawCommand::Projectile {
                pos: p.pos,
                radius: p.radius,
                owner: p.owner,
            }));
            commands.push(player_command(&state.player));

            particles.reserve(state.particles.particle_count());
            particles.extend(state.particles.particles().map(ParticleVertex::from_particle));
        }

        let overlay = match state.phase {
            GamePhase::Menu => Overlay::MainMenu,
            GamePhase::Playing => Overlay::None,
            GamePhase::Paused => Overlay::Paused,
            GamePhase::GameOver => Overlay::GameOver {
                final_score: state.player.score,
            },
        };

        Self {
            phase: state.phase,
            overlay,
            presentation: if fonts_available {
                Presentation::Text
            } else {
                Presentation::Placeholder
            },
            hud: Hud {
                score: state.player.score,
                health: state.player.health,
                max_health: state.player.max_health,
                health_fraction: if state.player.max_health == 0 {
                    0.0
                } else {
                    state.player.health as f32 / state.player.max_health as f32
                },
                wave: state.spawner.wave_number,
                shoot_readiness: state.player.shoot_readiness(),
            },
            commands,
            particles,
        }
    }

    /// Particle vertices as raw bytes for a GPU upload
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Whether the HUD should be shown
    pub fn show_hud(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }
}

fn player_command(player: &Player) -> DrawCommand {
    DrawCommand::Player {
        pos: player.pos,
        half_extents: Player::half_extents(),
        alive: player.alive,
        invincible: player.is_invincible(),
    }
}

fn enemy_commands(enemy: &Enemy, out: &mut Vec<DrawCommand>) {
    if !enemy.is_alive() {
        return;
    }
    out.push(DrawCommand::Enemy {
        pos: enemy.pos,
        radius: enemy.radius,
        is_boss: enemy.is_boss,
        health_fraction: enemy.health_fraction(),
    });
    if enemy.is_boss {
        out.push(DrawCommand::BossHealthBar {
            top_left: enemy.pos - Vec2::new(BOSS_BAR_WIDTH / 2.0, BOSS_BAR_OFFSET_Y),
            size: Vec2::new(BOSS_BAR_WIDTH, BOSS_BAR_HEIGHT),
            fill: enemy.health_fraction(),
        });
    }
}

fn power_up_command(power_up: &PowerUp) -> DrawCommand {
    DrawCommand::PowerUp {
        pos: power_up.pos,
        half_extents: PowerUp::half_extents(),
        kind: power_up.kind,
        pulse: power_up.pulse(),
    }
}
