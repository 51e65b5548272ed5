//! Entity records and their per-tick update rules
//!
//! Entities are plain data. Each `update` applies exactly one fixed-timestep
//! step; none of them know about collections, scoring, or each other.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::camera::{Axis, Camera};
use super::rect::Rect;
use crate::tuning::{DrivingTuning, FlyingTuning, Physics};

/// Clouds leaving past this x wrap back to the right edge
const CLOUD_WRAP_MARGIN: f32 = 100.0;
/// Band of sky clouds drift in
const CLOUD_MIN_Y: f32 = 50.0;
const CLOUD_MAX_Y: f32 = 200.0;
/// Particle launch speed range (per axis, per tick)
const PARTICLE_SPEED: f32 = 3.0;

/// Discrete steering command for lane changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

/// The player-controlled entity (car or bird)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Current lane (driving only)
    pub lane: Option<u32>,
    pub alive: bool,
}

impl Player {
    /// A car parked in the middle lane at the start line
    pub fn driver(tuning: &DrivingTuning, field: Vec2) -> Self {
        let lane = tuning.lane_count / 2;
        let size = tuning.car_size;
        Self {
            pos: Vec2::new(
                tuning.lane_x(lane, size.x, field.x),
                field.y - size.y - tuning.start_margin,
            ),
            size,
            vel: Vec2::new(0.0, -tuning.scroll_speed),
            lane: Some(lane),
            alive: true,
        }
    }

    /// A flyer hovering at mid-height on its fixed column
    pub fn flyer(tuning: &FlyingTuning, field: Vec2) -> Self {
        let size = tuning.player_size;
        Self {
            pos: Vec2::new(tuning.player_x, field.y / 2.0) - size / 2.0,
            size,
            vel: Vec2::ZERO,
            lane: None,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Snap one lane left or right. Returns true if the lane changed.
    pub fn steer(&mut self, dir: Steer, tuning: &DrivingTuning, field_width: f32) -> bool {
        let Some(lane) = self.lane else {
            return false;
        };
        let target = match dir {
            Steer::Left if lane > 0 => lane - 1,
            Steer::Right if lane + 1 < tuning.lane_count => lane + 1,
            _ => return false,
        };
        self.lane = Some(target);
        self.pos.x = tuning.lane_x(target, self.size.x, field_width);
        true
    }

    /// Overwrite vertical velocity with the jump impulse (never additive)
    pub fn flap(&mut self, impulse: f32) {
        self.vel.y = impulse;
    }

    /// Advance one tick under the variant's physics
    pub fn update(&mut self, physics: &Physics, field: Vec2) {
        match physics {
            Physics::Driving(d) => self.update_driving(d, field),
            Physics::Flying(f) => self.update_flying(f, field),
        }
    }

    fn update_driving(&mut self, tuning: &DrivingTuning, field: Vec2) {
        // The road scrolls toward the car: constant climb, no lateral drift
        self.pos.y += self.vel.y;
        if let Some(lane) = self.lane {
            self.lane = Some(lane.min(tuning.lane_count.saturating_sub(1)));
        }
        self.pos.x = self.pos.x.clamp(0.0, (field.x - self.size.x).max(0.0));
    }

    fn update_flying(&mut self, tuning: &FlyingTuning, field: Vec2) {
        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;

        // Ceiling: clamp but survive
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
        }

        // Floor: clamp and die
        let floor = tuning.floor_y(field.y);
        if self.pos.y + self.size.y > floor {
            self.pos.y = floor - self.size.y;
            self.vel.y = 0.0;
            self.alive = false;
        }
    }
}

/// Collidable geometry of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// A single solid box (traffic cone)
    Block,
    /// A full-height column with an open gap between two solid rects
    Pipe { gap_top: f32, gap_bottom: f32 },
}

/// A cone on the road or a pipe pair in the sky
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left of the bounding box in world space
    pub pos: Vec2,
    pub size: Vec2,
    /// Constant per-entity velocity
    pub vel: Vec2,
    pub lane: Option<u32>,
    /// Already counted toward the score
    pub passed: bool,
    pub shape: ObstacleShape,
}

impl Obstacle {
    /// A cone centred in `lane` with its top edge at `top`
    pub fn cone(lane: u32, top: f32, tuning: &DrivingTuning, field_width: f32) -> Self {
        let size = tuning.obstacle_size;
        Self {
            pos: Vec2::new(tuning.lane_x(lane, size.x, field_width), top),
            size,
            vel: Vec2::new(0.0, tuning.obstacle_speed),
            lane: Some(lane),
            passed: false,
            shape: ObstacleShape::Block,
        }
    }

    /// A pipe pair at `x` whose gap is centred on `gap_center`
    pub fn pipe(x: f32, gap_center: f32, tuning: &FlyingTuning, field: Vec2) -> Self {
        let half_gap = (tuning.pipe_gap / 2.0).floor();
        Self {
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(tuning.pipe_width, field.y),
            vel: Vec2::new(-tuning.pipe_speed, 0.0),
            lane: None,
            passed: false,
            shape: ObstacleShape::Pipe {
                gap_top: gap_center - half_gap,
                gap_bottom: gap_center + half_gap,
            },
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Bounding box of the whole entity
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    /// The solid regions; a pipe yields its top and bottom halves separately
    pub fn hitboxes(&self) -> impl Iterator<Item = Rect> {
        let boxes = match self.shape {
            ObstacleShape::Block => [Some(self.bounds()), None],
            ObstacleShape::Pipe {
                gap_top,
                gap_bottom,
            } => {
                let bottom_edge = self.pos.y + self.size.y;
                [
                    Some(Rect::new(self.pos.x, self.pos.y, self.size.x, gap_top - self.pos.y)),
                    Some(Rect::new(self.pos.x, gap_bottom, self.size.x, bottom_edge - gap_bottom)),
                ]
            }
        };
        boxes.into_iter().flatten()
    }

    /// True once the obstacle has left the view past its trailing edge.
    /// Obstacles travelling toward negative coordinates leave by the start
    /// of the view; everything else leaves by the end.
    pub fn is_off_screen(&self, camera: &Camera) -> bool {
        let (lo, hi) = camera.visible_range();
        let axis = camera.axis;
        if axis.of(self.vel) < 0.0 {
            axis.of(self.pos + self.size) < lo
        } else {
            axis.of(self.pos) > hi
        }
    }

    /// True once the obstacle is entirely past the player's centre line
    pub fn is_behind(&self, player: &Player, axis: Axis) -> bool {
        let center = axis.of(player.center());
        if axis.of(self.vel) < 0.0 {
            axis.of(self.pos + self.size) < center
        } else {
            axis.of(self.pos) > center
        }
    }
}

/// Short-lived decorative puff trailing the flyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    pub fn spawn(at: Vec2, life: u32, rng: &mut impl Rng) -> Self {
        Self {
            pos: at,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            ),
            life,
            max_life: life,
            size: rng.random_range(2..=5) as f32,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    /// Remaining life as a 0-1 fraction (for fading)
    pub fn fade(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Background cloud, purely decorative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
}

impl Cloud {
    /// A cloud at a random spot in the sky band
    pub fn scatter(field_width: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=field_width),
                rng.random_range(CLOUD_MIN_Y..=CLOUD_MAX_Y),
            ),
            speed: rng.random_range(0.5..1.5),
        }
    }

    pub fn update(&mut self, field_width: f32, rng: &mut impl Rng) {
        self.pos.x -= self.speed;
        if self.pos.x < -CLOUD_WRAP_MARGIN {
            self.pos.x = field_width + CLOUD_WRAP_MARGIN;
            self.pos.y = rng.random_range(CLOUD_MIN_Y..=CLOUD_MAX_Y);
        }
    }
}
