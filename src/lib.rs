//! Rara Arcade - three small arcade games on one fixed-timestep core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `tuning`: Data-driven per-variant game balance
//! - `renderer`: Terminal rendering adapter
//! - `platform`: Terminal input, frame pacing and lifecycle
//! - `audio`: Pluggable sound effects with a silent fallback
//! - `app`: The frame loop tying it all together

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Tuning, Variant};

/// Game configuration constants
pub mod consts {
    /// Default frame rate; one simulation tick per frame
    pub const TARGET_FPS: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical play field, in world units
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Cap on live decorative particles
    pub const MAX_PARTICLES: usize = 64;
    /// Entries kept in the session leaderboard
    pub const MAX_HIGH_SCORES: usize = 10;
}
