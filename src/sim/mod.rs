//! Simulation module
//!
//! All gameplay logic lives here. It has no rendering, windowing or input
//! polling dependencies:
//! - Time comes in as a per-frame delta
//! - Randomness comes from the seeded RNG in `GameState`
//! - Containers keep insertion order, so earlier entities win ties

pub mod collision;
pub mod particles;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use particles::{Particle, ParticleConfig, ParticleEmitter, ParticleSystem};
pub use spawn::{SpawnDirector, SpawnEvent};
pub use state::{
    Enemy, GamePhase, GameState, Owner, Player, PowerUp, PowerUpKind, Projectile, Star,
};
pub use tick::{TickInput, TickOutcome, tick};
