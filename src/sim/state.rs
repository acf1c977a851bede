//! Session state and entity types
//!
//! Everything the session owns and mutates lives here. Hosts only ever see
//! the owned [`SessionSnapshot`] copies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::{LandmarkKind, TrackId};
use crate::consts::*;
use crate::lane_x;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No session
    #[default]
    Idle,
    /// Simulation advancing
    Running,
    /// Collision happened, simulation frozen until restart/reset
    Terminated,
}

/// Lane change request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    /// Map a `-1`/`+1` offset to a direction
    pub fn from_offset(offset: i8) -> Option<Self> {
        match offset {
            -1 => Some(LaneDirection::Left),
            1 => Some(LaneDirection::Right),
            _ => None,
        }
    }

    pub fn offset(&self) -> i8 {
        match self {
            LaneDirection::Left => -1,
            LaneDirection::Right => 1,
        }
    }
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lane: u8,
    pub color: u32,
}

impl Player {
    pub fn new(color: u32) -> Self {
        Self {
            lane: CENTER_LANE,
            color,
        }
    }

    /// Shift one lane, clamped to the road
    pub fn steer(&mut self, direction: LaneDirection) {
        self.lane = match direction {
            LaneDirection::Left => self.lane.saturating_sub(1),
            LaneDirection::Right => (self.lane + 1).min(LANE_COUNT - 1),
        };
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(lane_x(self.lane, PLAYER_WIDTH), PLAYER_Y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos(), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// Obstacle look (no gameplay difference)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Sedan,
    Truck,
    Van,
    Cone,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Sedan,
        ObstacleKind::Truck,
        ObstacleKind::Van,
        ObstacleKind::Cone,
    ];
}

/// Oncoming obstacle in a lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    pub kind: ObstacleKind,
    pub color: u32,
    /// Top-left corner
    pub pos: Vec2,
}

impl Obstacle {
    /// New obstacle just above the top edge of its lane
    pub fn spawn(id: u32, lane: u8, kind: ObstacleKind, color: u32) -> Self {
        Self {
            id,
            lane,
            kind,
            color,
            pos: Vec2::new(lane_x(lane, OBSTACLE_WIDTH), -OBSTACLE_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT))
    }
}

/// Which verge a landmark stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Roadside decoration, never collides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: u32,
    pub side: Side,
    pub kind: LandmarkKind,
    pub pos: Vec2,
}

impl Landmark {
    pub fn spawn(id: u32, side: Side, kind: LandmarkKind) -> Self {
        let verge = ROAD_LEFT;
        let x = match side {
            Side::Left => (verge - LANDMARK_WIDTH) / 2.0,
            Side::Right => ROAD_RIGHT + (verge - LANDMARK_WIDTH) / 2.0,
        };
        Self {
            id,
            side,
            kind,
            pos: Vec2::new(x, -LANDMARK_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(LANDMARK_WIDTH, LANDMARK_HEIGHT))
    }
}

/// Mutable state of one session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: Phase,
    pub track: TrackId,
    /// Scroll speed (pixels/tick)
    pub speed: f32,
    /// Completed ticks
    pub score: u64,
    /// Simulated time since start
    pub elapsed_ms: f64,
    /// Lane marking scroll, wraps at `ROAD_MARK_PERIOD`
    pub road_offset: f32,
    pub player: Player,
    /// In spawn order, newest last
    pub obstacles: Vec<Obstacle>,
    /// In spawn order, newest last
    pub landmarks: Vec<Landmark>,
    next_id: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            track: TrackId::default(),
            speed: 0.0,
            score: 0,
            elapsed_ms: 0.0,
            road_offset: 0.0,
            player: Player::new(0),
            obstacles: Vec::new(),
            landmarks: Vec::new(),
            next_id: 1,
        }
    }
}

impl SessionState {
    /// Fresh running state for a new session
    pub fn start(track: TrackId, speed: f32, player_color: u32) -> Self {
        Self {
            phase: Phase::Running,
            track,
            speed,
            player: Player::new(player_color),
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn snapshot(&self, best_score: u64) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            track: self.track,
            speed: self.speed,
            score: self.score,
            best_score,
            elapsed_ms: self.elapsed_ms,
            road_offset: self.road_offset,
            player: self.player.clone(),
            player_rect: self.player.rect(),
            obstacles: self.obstacles.clone(),
            landmarks: self.landmarks.clone(),
        }
    }
}

/// Read-only copy of the session for renderers and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub track: TrackId,
    pub speed: f32,
    pub score: u64,
    pub best_score: u64,
    pub elapsed_ms: f64,
    pub road_offset: f32,
    pub player: Player,
    pub player_rect: Rect,
    pub obstacles: Vec<Obstacle>,
    pub landmarks: Vec<Landmark>,
}
