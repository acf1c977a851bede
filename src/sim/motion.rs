//! Scrolling and eviction
//!
//! Everything on the road moves down at the same speed; nothing has its own
//! velocity.

use super::state::{Landmark, Obstacle};
use crate::consts::{FIELD_HEIGHT, ROAD_MARK_PERIOD};

/// An entity carried down the screen by the road
pub trait Scrolling {
    /// Top edge (y grows downward)
    fn top(&self) -> f32;
    fn scroll(&mut self, distance: f32);
}

impl Scrolling for Obstacle {
    fn top(&self) -> f32 {
        self.pos.y
    }

    fn scroll(&mut self, distance: f32) {
        self.pos.y += distance;
    }
}

impl Scrolling for Landmark {
    fn top(&self) -> f32 {
        self.pos.y
    }

    fn scroll(&mut self, distance: f32) {
        self.pos.y += distance;
    }
}

/// True once the entity's top edge has reached the bottom boundary
#[inline]
pub fn has_exited<T: Scrolling>(entity: &T) -> bool {
    entity.top() >= FIELD_HEIGHT
}

/// Move every entity down by `speed` and drop the ones that left the field.
/// Returns how many were evicted.
pub fn advance<T: Scrolling>(entities: &mut Vec<T>, speed: f32) -> usize {
    for entity in entities.iter_mut() {
        entity.scroll(speed);
    }
    let before = entities.len();
    entities.retain(|e| !has_exited(e));
    before - entities.len()
}

/// Advance the lane-marking offset (visual only)
#[inline]
pub fn advance_road_offset(offset: f32, speed: f32) -> f32 {
    (offset + speed).rem_euclid(ROAD_MARK_PERIOD)
}
