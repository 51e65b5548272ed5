//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::{Axis, Camera};
pub use collision::{detect, first_hit};
pub use entity::{Cloud, Obstacle, ObstacleShape, Particle, Player, Steer};
pub use rect::Rect;
pub use spawn::{SpawnGate, Spawner, sweep};
pub use state::{CrashCause, GameEvent, GamePhase, GameState, World};
pub use tick::{Intent, TickInput, tick};
