//! Axis-aligned collision detection
//!
//! The player and obstacles are plain rectangles. Landmarks live in their own
//! collection and never reach this module.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min, self.max());
        let (b_min, b_max) = (other.min, other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// First obstacle (in collection order) overlapping the player
pub fn first_collision<'a>(player: &Rect, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| player.overlaps(&o.rect()))
}
