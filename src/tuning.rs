//! Data-driven game balance
//!
//! Every constant that differs between the three games lives here, so the
//! simulation itself stays variant-agnostic. A `Tuning` can also be loaded
//! from JSON via `Settings`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::SpawnGate;

/// Which of the three games is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Lane-dodging driving game
    LaneRacer,
    /// Side-scrolling flyer with a round bird
    RaraAvis,
    /// Side-scrolling flyer with a square player and tighter pipes
    FlippyBlock,
}

impl Variant {
    pub fn title(&self) -> &'static str {
        match self {
            Variant::LaneRacer => "LANE RACER",
            Variant::RaraAvis => "RARA AVIS",
            Variant::FlippyBlock => "FLIPPYBLOCK EXTREME",
        }
    }

    /// Short name used for binaries and asset files
    pub fn slug(&self) -> &'static str {
        match self {
            Variant::LaneRacer => "lane-racer",
            Variant::RaraAvis => "rara-avis",
            Variant::FlippyBlock => "flippy-block",
        }
    }

    pub fn is_flying(&self) -> bool {
        !matches!(self, Variant::LaneRacer)
    }
}

/// How the score grows during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// +1 every simulation tick survived
    PerTick,
    /// +1 each time an obstacle slips behind the player
    PerObstaclePassed,
}

/// Whether decorative scenery keeps moving while the run is not advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorPolicy {
    /// Clouds freeze outside `Playing`
    FreezeWhenIdle,
    /// Clouds drift in every phase
    AlwaysAnimate,
}

/// Driving-specific constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivingTuning {
    pub lane_count: u32,
    pub car_size: Vec2,
    pub obstacle_size: Vec2,
    /// World units the car climbs per tick
    pub scroll_speed: f32,
    /// World units a cone drifts toward the car per tick
    pub obstacle_speed: f32,
    /// Gap between the car and the bottom edge at the start line
    pub start_margin: f32,
}

/// Flying-specific constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyingTuning {
    /// Horizontal centre of the player (fixed)
    pub player_x: f32,
    pub player_size: Vec2,
    /// Drawn as a circle when true, a square otherwise
    pub round_player: bool,
    pub gravity: f32,
    /// Velocity written on flap (negative is up)
    pub jump_impulse: f32,
    pub ground_height: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_speed: f32,
    /// Minimum distance from the gap centre to the ceiling and to the floor
    pub gap_margin: f32,
    /// Ticks between particle puffs (0 disables the trail)
    pub particle_interval: u64,
    pub particle_life: u32,
    pub cloud_count: usize,
}

/// Variant-specific physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Physics {
    Driving(DrivingTuning),
    Flying(FlyingTuning),
}

/// Complete balance sheet for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub variant: Variant,
    pub field: Vec2,
    pub scoring: ScoringPolicy,
    pub decor: DecorPolicy,
    pub spawn: SpawnGate,
    pub physics: Physics,
}

impl Tuning {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::LaneRacer => Self::lane_racer(),
            Variant::RaraAvis => Self::rara_avis(),
            Variant::FlippyBlock => Self::flippy_block(),
        }
    }

    pub fn lane_racer() -> Self {
        let spawn_rate = 30;
        Self {
            variant: Variant::LaneRacer,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            scoring: ScoringPolicy::PerTick,
            decor: DecorPolicy::FreezeWhenIdle,
            spawn: SpawnGate::one_in(spawn_rate),
            physics: Physics::Driving(DrivingTuning {
                lane_count: 3,
                car_size: Vec2::new(50.0, 80.0),
                obstacle_size: Vec2::new(40.0, 60.0),
                scroll_speed: 5.0,
                obstacle_speed: 3.0,
                start_margin: 20.0,
            }),
        }
    }

    pub fn rara_avis() -> Self {
        Self {
            variant: Variant::RaraAvis,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            scoring: ScoringPolicy::PerObstaclePassed,
            decor: DecorPolicy::FreezeWhenIdle,
            // 1800 ms at 60 Hz
            spawn: SpawnGate::Interval { period_ticks: 108 },
            physics: Physics::Flying(FlyingTuning {
                player_x: 100.0,
                player_size: Vec2::splat(40.0),
                round_player: true,
                gravity: 0.5,
                jump_impulse: -8.0,
                ground_height: 100.0,
                pipe_width: 80.0,
                pipe_gap: 200.0,
                pipe_speed: 3.0,
                gap_margin: 150.0,
                particle_interval: 5,
                particle_life: 30,
                cloud_count: 5,
            }),
        }
    }

    pub fn flippy_block() -> Self {
        Self {
            variant: Variant::FlippyBlock,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            scoring: ScoringPolicy::PerObstaclePassed,
            decor: DecorPolicy::AlwaysAnimate,
            spawn: SpawnGate::Interval { period_ticks: 90 },
            physics: Physics::Flying(FlyingTuning {
                player_x: 120.0,
                player_size: Vec2::splat(36.0),
                round_player: false,
                gravity: 0.6,
                jump_impulse: -9.0,
                ground_height: 100.0,
                pipe_width: 70.0,
                pipe_gap: 170.0,
                pipe_speed: 4.0,
                gap_margin: 140.0,
                particle_interval: 4,
                particle_life: 24,
                cloud_count: 4,
            }),
        }
    }

    /// Driving constants, if this is the driving variant
    pub fn driving(&self) -> Option<&DrivingTuning> {
        match &self.physics {
            Physics::Driving(d) => Some(d),
            Physics::Flying(_) => None,
        }
    }

    /// Flying constants, if this is a flying variant
    pub fn flying(&self) -> Option<&FlyingTuning> {
        match &self.physics {
            Physics::Flying(f) => Some(f),
            Physics::Driving(_) => None,
        }
    }
}

impl DrivingTuning {
    /// Width of one lane (whole world units, as the lanes are painted)
    pub fn lane_width(&self, field_width: f32) -> f32 {
        (field_width / self.lane_count.max(1) as f32).floor()
    }

    /// Left edge that centres an entity of `width` in `lane`
    pub fn lane_x(&self, lane: u32, width: f32, field_width: f32) -> f32 {
        let lane_width = self.lane_width(field_width);
        lane as f32 * lane_width + (lane_width / 2.0).floor() - (width / 2.0).floor()
    }
}

impl FlyingTuning {
    /// Y of the ground surface
    pub fn floor_y(&self, field_height: f32) -> f32 {
        field_height - self.ground_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_defaults_differ_by_variant() {
        assert_eq!(Tuning::lane_racer().scoring, ScoringPolicy::PerTick);
        assert_eq!(Tuning::rara_avis().scoring, ScoringPolicy::PerObstaclePassed);
        assert_eq!(Tuning::flippy_block().scoring, ScoringPolicy::PerObstaclePassed);
    }

    #[test]
    fn test_lane_centres() {
        let t = Tuning::lane_racer();
        let d = t.driving().unwrap();
        assert_eq!(d.lane_width(800.0), 266.0);
        assert_eq!(d.lane_x(0, 40.0, 800.0), 113.0);
        assert_eq!(d.lane_x(1, 50.0, 800.0), 374.0);
        assert_eq!(d.lane_x(2, 40.0, 800.0), 645.0);
    }

    #[test]
    fn test_tuning_json_roundtrip_keeps_variant() {
        let t = Tuning::flippy_block();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(back.flying().is_some());
        assert!(back.driving().is_none());
    }
}
