//! Player vs obstacle collision detection
//!
//! Plain AABB overlap. An obstacle may be one entity but several solid
//! regions (a pipe's top and bottom halves); each region is tested on its own.

use super::entity::{Obstacle, Player};
use super::rect::Rect;

/// Index of the first obstacle the player overlaps, if any
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let body = player.rect();
    obstacles
        .iter()
        .position(|obstacle| overlaps(&body, obstacle))
}

/// Whether the player overlaps any obstacle. Stops at the first hit.
pub fn detect(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_hit(player, obstacles).is_some()
}

fn overlaps(body: &Rect, obstacle: &Obstacle) -> bool {
    // Cheap reject on the whole bounding box before the per-region test
    body.intersects(&obstacle.bounds()) && obstacle.hitboxes().any(|r| body.intersects(&r))
}
