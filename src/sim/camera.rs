//! Scroll offset that keeps the player visually pinned
//!
//! The camera follows a single world-space coordinate along one axis and
//! clamps so the view never leaves the defined world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World axis the camera scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// One-axis camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub axis: Axis,
    /// Visible extent along the axis
    pub viewport: f32,
    /// World bounds along the axis (`world_min` may be -inf for endless roads)
    pub world_min: f32,
    pub world_max: f32,
    /// World coordinate drawn at the start of the view
    pub offset: f32,
}

impl Camera {
    pub fn new(axis: Axis, viewport: f32, world_min: f32, world_max: f32) -> Self {
        let mut camera = Self {
            axis,
            viewport,
            world_min,
            world_max,
            offset: 0.0,
        };
        camera.offset = camera.clamp_offset(0.0);
        camera
    }

    pub fn horizontal(viewport: f32, world_min: f32, world_max: f32) -> Self {
        Self::new(Axis::Horizontal, viewport, world_min, world_max)
    }

    pub fn vertical(viewport: f32, world_min: f32, world_max: f32) -> Self {
        Self::new(Axis::Vertical, viewport, world_min, world_max)
    }

    /// Centre the view on `focus` (a world-space point), within bounds
    pub fn follow(&mut self, focus: Vec2) {
        let wanted = self.axis.of(focus) - self.viewport / 2.0;
        self.offset = self.clamp_offset(wanted);
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        // A world smaller than the viewport pins the camera at its start
        let max = (self.world_max - self.viewport).max(self.world_min);
        offset.clamp(self.world_min, max)
    }

    /// World coordinate range currently on screen
    pub fn visible_range(&self) -> (f32, f32) {
        (self.offset, self.offset + self.viewport)
    }

    /// Convert a world coordinate along the axis to a screen coordinate
    #[inline]
    pub fn to_screen(&self, world: f32) -> f32 {
        world - self.offset
    }

    /// Convert a world point to screen space (only the camera axis scrolls)
    pub fn point_to_screen(&self, world: Vec2) -> Vec2 {
        match self.axis {
            Axis::Horizontal => Vec2::new(self.to_screen(world.x), world.y),
            Axis::Vertical => Vec2::new(world.x, self.to_screen(world.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centres_focus_inside_bounds() {
        let mut cam = Camera::vertical(600.0, 0.0, 1800.0);
        cam.follow(Vec2::new(0.0, 900.0));
        assert_eq!(cam.offset, 600.0);
        assert_eq!(cam.to_screen(900.0), 300.0);
    }

    #[test]
    fn test_clamps_to_world_edges() {
        let mut cam = Camera::vertical(600.0, 0.0, 1800.0);
        cam.follow(Vec2::new(0.0, 100.0));
        assert_eq!(cam.offset, 0.0);
        cam.follow(Vec2::new(0.0, 1750.0));
        assert_eq!(cam.offset, 1200.0);
    }

    #[test]
    fn test_endless_road_keeps_car_centred() {
        let mut cam = Camera::vertical(600.0, f32::NEG_INFINITY, 600.0);
        assert_eq!(cam.offset, 0.0);
        cam.follow(Vec2::new(399.0, 540.0));
        assert_eq!(cam.offset, 0.0);
        cam.follow(Vec2::new(399.0, -5000.0));
        assert_eq!(cam.offset, -5300.0);
        assert_eq!(cam.to_screen(-5000.0), 300.0);
    }

    #[test]
    fn test_world_narrower_than_view_pins_at_start() {
        let mut cam = Camera::horizontal(800.0, 0.0, 800.0);
        cam.follow(Vec2::new(100.0, 300.0));
        assert_eq!(cam.offset, 0.0);
        assert_eq!(cam.point_to_screen(Vec2::new(50.0, 70.0)), Vec2::new(50.0, 70.0));
    }
}
