//! Game state and core simulation types
//!
//! `GameState` is the whole session: phase, high scores and the current
//! `World`. The world holds every entity of one run and is thrown away on
//! restart rather than reset field by field.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{Cloud, Obstacle, Particle, Player};
use super::spawn::Spawner;
use crate::highscores::HighScores;
use crate::tuning::{Physics, Tuning, Variant};

/// Mixed into the run seed for the decorative RNG stream
const DECOR_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ground,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Flapped,
    LaneChanged { lane: u32 },
    ObstaclePassed,
    /// Emitted once per life
    Crashed { cause: CrashCause },
    GameOver { score: u64, new_high: bool },
    Paused,
    Resumed,
    Restarted,
}

/// Everything belonging to a single run
#[derive(Debug, Clone)]
pub struct World {
    /// Seed this run was built from
    pub seed: u64,
    pub player: Player,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Background clouds (flying variants only)
    pub clouds: Vec<Cloud>,
    pub score: u64,
    /// Simulation ticks spent playing
    pub time_ticks: u64,
    /// World units scrolled so far (drives background detail)
    pub distance: f32,
    pub camera: Camera,
    pub spawner: Spawner,
    /// Crash side effects already fired for this life
    pub collision_handled: bool,
    /// Gameplay RNG (spawns)
    pub(crate) rng: Pcg32,
    /// Decoration RNG (particles, clouds), kept apart so scenery never
    /// perturbs spawns
    pub(crate) decor_rng: Pcg32,
}

impl World {
    /// Build a fresh world for `tuning`
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let field = tuning.field;
        let mut decor_rng = Pcg32::seed_from_u64(seed ^ DECOR_STREAM);

        let (player, camera, clouds) = match &tuning.physics {
            Physics::Driving(d) => (
                Player::driver(d, field),
                // The road runs forever ahead; the start line is the bottom
                Camera::vertical(field.y, f32::NEG_INFINITY, field.y),
                Vec::new(),
            ),
            Physics::Flying(f) => (
                Player::flyer(f, field),
                Camera::horizontal(field.x, 0.0, field.x),
                (0..f.cloud_count)
                    .map(|_| Cloud::scatter(field.x, &mut decor_rng))
                    .collect(),
            ),
        };

        let mut world = Self {
            seed,
            player,
            obstacles: Vec::new(),
            particles: Vec::new(),
            clouds,
            score: 0,
            time_ticks: 0,
            distance: 0.0,
            camera,
            spawner: Spawner::new(tuning.spawn),
            collision_handled: false,
            rng: Pcg32::seed_from_u64(seed),
            decor_rng,
        };
        world.camera.follow(world.player.center());
        world
    }

    /// Player position on screen
    pub fn player_screen_pos(&self) -> Vec2 {
        self.camera.point_to_screen(self.player.pos)
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    pub high_scores: HighScores,
    /// The current run
    pub world: World,
    /// Session seed; each run derives its own from it
    pub seed: u64,
    /// Runs started after the first (restarts)
    pub restarts: u32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session sitting on the menu
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let world = World::new(&tuning, seed);
        log::info!("{} session created (seed {})", tuning.variant.title(), seed);
        Self {
            tuning,
            phase: GamePhase::Menu,
            high_scores: HighScores::new(),
            world,
            seed,
            restarts: 0,
            events: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.tuning.variant
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    /// Discard the current world and build the next run's from scratch
    pub fn rebuild_world(&mut self) {
        self.restarts += 1;
        let seed = self.seed.wrapping_add(self.restarts as u64);
        self.world = World::new(&self.tuning, seed);
    }
}
