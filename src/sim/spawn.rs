//! Procedural obstacle and landmark spawning
//!
//! Both spawners use the same gate: spawn when the collection is empty, or
//! when the newest entity has scrolled past a clearance line and a per-tick
//! roll succeeds. Lanes are not checked against in-flight obstacles, so two
//! obstacles can end up in the same lane.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::motion::Scrolling;
use super::state::{Landmark, Obstacle, ObstacleKind, SessionState, Side};
use crate::config::TrackProfile;
use crate::config::track::DEFAULT_OBSTACLE_COLOR;
use crate::consts::*;

/// Clearance + probability gate for one entity family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    /// Newest entity's top edge must be below this y
    pub clearance: f32,
    /// Chance per tick once clear
    pub chance: f32,
}

pub const OBSTACLE_POLICY: SpawnPolicy = SpawnPolicy {
    clearance: OBSTACLE_CLEARANCE,
    chance: OBSTACLE_SPAWN_CHANCE,
};

pub const LANDMARK_POLICY: SpawnPolicy = SpawnPolicy {
    clearance: LANDMARK_CLEARANCE,
    chance: LANDMARK_SPAWN_CHANCE,
};

impl SpawnPolicy {
    /// Decide whether to spawn this tick. `newest_top` is the top edge of the
    /// most recently spawned live entity, `None` when there are none. The
    /// roll is only drawn once the clearance gate is open.
    pub fn should_spawn<R: Rng + ?Sized>(&self, newest_top: Option<f32>, rng: &mut R) -> bool {
        match newest_top {
            None => true,
            Some(top) => top > self.clearance && rng.random::<f32>() < self.chance,
        }
    }
}

/// Roll a new obstacle at the top of a random lane
pub fn roll_obstacle<R: Rng + ?Sized>(id: u32, track: &TrackProfile, rng: &mut R) -> Obstacle {
    let lane = rng.random_range(0..LANE_COUNT);
    let kind = *ObstacleKind::ALL.choose(rng).unwrap_or(&ObstacleKind::Sedan);
    let color = track
        .obstacle_palette
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_OBSTACLE_COLOR);
    Obstacle::spawn(id, lane, kind, color)
}

/// Roll a new landmark on a random verge. `None` if the track permits no
/// landmark kinds.
pub fn roll_landmark<R: Rng + ?Sized>(
    id: u32,
    track: &TrackProfile,
    rng: &mut R,
) -> Option<Landmark> {
    let side = if rng.random_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    };
    let kind = *track.landmark_kinds.choose(rng)?;
    Some(Landmark::spawn(id, side, kind))
}

/// Run both spawners for one tick
pub fn spawn_entities<R: Rng + ?Sized>(
    state: &mut SessionState,
    track: &TrackProfile,
    rng: &mut R,
) {
    let newest_obstacle = state.obstacles.last().map(|o| o.top());
    if OBSTACLE_POLICY.should_spawn(newest_obstacle, rng) {
        let id = state.next_entity_id();
        let obstacle = roll_obstacle(id, track, rng);
        log::debug!(
            "Spawned obstacle {} ({:?}) in lane {}",
            obstacle.id,
            obstacle.kind,
            obstacle.lane
        );
        state.obstacles.push(obstacle);
    }

    let newest_landmark = state.landmarks.last().map(|o| o.top());
    if LANDMARK_POLICY.should_spawn(newest_landmark, rng) {
        let id = state.next_entity_id();
        if let Some(landmark) = roll_landmark(id, track, rng) {
            state.landmarks.push(landmark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_collection_always_spawns() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            assert!(OBSTACLE_POLICY.should_spawn(None, &mut rng));
            assert!(LANDMARK_POLICY.should_spawn(None, &mut rng));
        }
    }

    #[test]
    fn test_no_spawn_before_clearance() {
        let mut rng = Pcg32::seed_from_u64(2);
        let always = SpawnPolicy {
            clearance: 200.0,
            chance: 1.0,
        };
        assert!(!always.should_spawn(Some(-80.0), &mut rng));
        assert!(!always.should_spawn(Some(200.0), &mut rng));
        assert!(always.should_spawn(Some(200.5), &mut rng));
    }

    #[test]
    fn test_spawn_rate_matches_chance() {
        let mut rng = Pcg32::seed_from_u64(3);
        let trials = 20_000;
        let hits = (0..trials)
            .filter(|_| OBSTACLE_POLICY.should_spawn(Some(500.0), &mut rng))
            .count();
        let rate = hits as f32 / trials as f32;
        assert!((rate - OBSTACLE_SPAWN_CHANCE).abs() < 0.01, "rate = {}", rate);
    }

    #[test]
    fn test_rolled_obstacles_cover_all_lanes() {
        let mut rng = Pcg32::seed_from_u64(4);
        let track = TrackId::Highway.profile();
        let mut seen = [false; LANE_COUNT as usize];
        for id in 0..200 {
            let o = roll_obstacle(id, track, &mut rng);
            assert!(o.lane < LANE_COUNT);
            assert!(track.obstacle_palette.contains(&o.color));
            assert_eq!(o.pos.y, -OBSTACLE_HEIGHT);
            seen[o.lane as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_landmark_kinds_come_from_track() {
        let mut rng = Pcg32::seed_from_u64(5);
        let track = TrackId::Desert.profile();
        let mut sides = (0, 0);
        for id in 0..200 {
            let l = roll_landmark(id, track, &mut rng).unwrap();
            assert!(track.landmark_kinds.contains(&l.kind));
            match l.side {
                Side::Left => sides.0 += 1,
                Side::Right => sides.1 += 1,
            }
        }
        assert!(sides.0 > 0 && sides.1 > 0);
    }

    #[test]
    fn test_empty_landmark_set_rolls_nothing() {
        let mut rng = Pcg32::seed_from_u64(6);
        let track = TrackProfile {
            landmark_kinds: &[],
            ..TrackId::Forest.profile().clone()
        };
        assert!(roll_landmark(1, &track, &mut rng).is_none());
    }

    #[test]
    fn test_first_tick_spawns_one_of_each() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = SessionState::start(TrackId::Highway, 8.0, 0);
        spawn_entities(&mut state, TrackId::Highway.profile(), &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.landmarks.len(), 1);

        // Newest entities sit above the clearance line, so nothing more spawns
        spawn_entities(&mut state, TrackId::Highway.profile(), &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.landmarks.len(), 1);
        assert_ne!(state.obstacles[0].id, state.landmarks[0].id);
    }
}
