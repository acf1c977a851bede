//! Demo driver
//!
//! Picks lane changes from a snapshot so a session can run without input.
//! Used by the headless host and the browser's attract mode.

use crate::consts::LANE_COUNT;
use crate::sim::{LaneDirection, Phase, SessionSnapshot};

/// Ticks of travel to look ahead in the current lane
pub const LOOKAHEAD_TICKS: f32 = 25.0;
/// Danger window floor (pixels) for low speeds
pub const MIN_LOOKAHEAD: f32 = 120.0;

/// Distance the player can travel in `lane` before touching an obstacle.
/// Negative when one already shares the player's rows; infinite when the
/// lane is clear.
pub fn free_distance(snapshot: &SessionSnapshot, lane: u8) -> f32 {
    let player = &snapshot.player_rect;
    let player_bottom = player.max().y;
    snapshot
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.pos.y < player_bottom)
        .map(|o| player.min.y - o.rect().max().y)
        .fold(f32::INFINITY, f32::min)
}

/// Danger window at the given speed
fn lookahead(speed: f32) -> f32 {
    (speed * LOOKAHEAD_TICKS).max(MIN_LOOKAHEAD)
}

/// Lane change to make this tick, if any
pub fn choose_lane_change(snapshot: &SessionSnapshot) -> Option<LaneDirection> {
    if snapshot.phase != Phase::Running {
        return None;
    }

    let lane = snapshot.player.lane;
    let current = free_distance(snapshot, lane);
    if current > lookahead(snapshot.speed) {
        return None;
    }

    let mut best: Option<(LaneDirection, f32)> = None;
    for direction in [LaneDirection::Left, LaneDirection::Right] {
        let target = lane as i8 + direction.offset();
        if !(0..LANE_COUNT as i8).contains(&target) {
            continue;
        }
        let free = free_distance(snapshot, target as u8);
        if free > current && best.is_none_or(|(_, b)| free > b) {
            best = Some((direction, free));
        }
    }

    if let Some((direction, free)) = best {
        log::trace!(
            "autopilot: lane {} blocked at {:.0}, steering {:?} ({:.0} free)",
            lane,
            current,
            direction,
            free
        );
    }
    best.map(|(direction, _)| direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarConfig, TrackId};
    use crate::consts::*;
    use crate::sim::{Obstacle, ObstacleKind, Player};
    use crate::{BestScore, Session};
    use glam::Vec2;

    fn running(lane: u8) -> SessionSnapshot {
        let mut player = Player::new(0);
        player.lane = lane;
        SessionSnapshot {
            phase: Phase::Running,
            track: TrackId::Highway,
            speed: 8.0,
            score: 0,
            best_score: 0,
            elapsed_ms: 0.0,
            road_offset: 0.0,
            player_rect: player.rect(),
            player,
            obstacles: Vec::new(),
            landmarks: Vec::new(),
        }
    }

    fn obstacle(id: u32, lane: u8, bottom: f32) -> Obstacle {
        let mut o = Obstacle::spawn(id, lane, ObstacleKind::Sedan, 0);
        o.pos = Vec2::new(o.pos.x, bottom - OBSTACLE_HEIGHT);
        o
    }

    #[test]
    fn test_clear_road_keeps_lane() {
        assert_eq!(choose_lane_change(&running(CENTER_LANE)), None);
    }

    #[test]
    fn test_distant_obstacle_ignored() {
        let mut snap = running(CENTER_LANE);
        snap.obstacles.push(obstacle(1, CENTER_LANE, 0.0));
        assert_eq!(free_distance(&snap, CENTER_LANE), PLAYER_Y);
        assert_eq!(choose_lane_change(&snap), None);
    }

    #[test]
    fn test_dodges_toward_clear_lane() {
        let mut snap = running(CENTER_LANE);
        snap.obstacles.push(obstacle(1, CENTER_LANE, PLAYER_Y - 40.0));
        snap.obstacles.push(obstacle(2, 0, PLAYER_Y - 100.0));
        assert_eq!(choose_lane_change(&snap), Some(LaneDirection::Right));
    }

    #[test]
    fn test_edge_lane_only_steers_inward() {
        let mut snap = running(LANE_COUNT - 1);
        snap.obstacles.push(obstacle(1, LANE_COUNT - 1, PLAYER_Y - 10.0));
        assert_eq!(choose_lane_change(&snap), Some(LaneDirection::Left));
    }

    #[test]
    fn test_never_steers_into_occupied_rows() {
        let mut snap = running(0);
        snap.obstacles.push(obstacle(1, 0, PLAYER_Y - 10.0));
        // Alongside the player in lane 1
        snap.obstacles.push(obstacle(2, 1, PLAYER_Y + 40.0));
        assert!(free_distance(&snap, 1) < 0.0);
        assert_eq!(choose_lane_change(&snap), None);
    }

    #[test]
    fn test_passed_obstacles_ignored() {
        let mut snap = running(CENTER_LANE);
        snap.obstacles
            .push(obstacle(1, CENTER_LANE, PLAYER_Y + PLAYER_HEIGHT + OBSTACLE_HEIGHT));
        assert_eq!(free_distance(&snap, CENTER_LANE), f32::INFINITY);
    }

    #[test]
    fn test_inactive_session_gets_no_input() {
        let mut snap = running(CENTER_LANE);
        snap.obstacles.push(obstacle(1, CENTER_LANE, PLAYER_Y - 5.0));
        snap.phase = Phase::Terminated;
        assert_eq!(choose_lane_change(&snap), None);
        snap.phase = Phase::Idle;
        assert_eq!(choose_lane_change(&snap), None);
    }

    #[test]
    fn test_autopilot_survives_long_run() {
        let mut session = Session::with_seed(42, BestScore::in_memory(0));
        let mut snap = session
            .start_session(TrackId::Highway.profile(), &CarConfig::default())
            .unwrap();
        for _ in 0..1_000 {
            if let Some(direction) = choose_lane_change(&snap) {
                session.set_lane(direction);
            }
            snap = session.tick(16.0);
        }
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.score, 1_000);
    }
}
