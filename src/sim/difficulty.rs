//! Speed progression
//!
//! Speed only ever grows, by a constant amount per tick. Score is a plain
//! tick counter and needs no model of its own.

use serde::{Deserialize, Serialize};

use crate::config::{CarConfig, TrackProfile};
use crate::consts::{ENGINE_BONUS_PER_LEVEL, MIN_SPEED_INCREMENT, TIRE_REDUCTION_PER_LEVEL};

/// Linear speed curve for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub start: f32,
    pub increment: f32,
}

impl SpeedCurve {
    pub fn new(track: &TrackProfile, car: &CarConfig) -> Self {
        Self {
            start: starting_speed(track, car),
            increment: speed_increment(track, car),
        }
    }

    /// Speed after one more tick. No cap.
    #[inline]
    pub fn advance(&self, speed: f32) -> f32 {
        speed + self.increment
    }
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            start: 0.0,
            increment: MIN_SPEED_INCREMENT,
        }
    }
}

/// Track base speed plus the engine bonus
pub fn starting_speed(track: &TrackProfile, car: &CarConfig) -> f32 {
    track.base_speed + car.engine_level as f32 * ENGINE_BONUS_PER_LEVEL
}

/// Track increment minus the tire reduction, floored
pub fn speed_increment(track: &TrackProfile, car: &CarConfig) -> f32 {
    (track.speed_increment - car.tire_level as f32 * TIRE_REDUCTION_PER_LEVEL)
        .max(MIN_SPEED_INCREMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackId;

    fn track(base_speed: f32, speed_increment: f32) -> TrackProfile {
        TrackProfile {
            base_speed,
            speed_increment,
            ..TrackId::Highway.profile().clone()
        }
    }

    #[test]
    fn test_engine_raises_start() {
        let t = track(8.0, 0.002);
        let stock = CarConfig::default();
        let tuned = CarConfig::default().with_upgrades(3, 0);
        assert_eq!(starting_speed(&t, &stock), 8.0);
        assert!((starting_speed(&t, &tuned) - (8.0 + 3.0 * ENGINE_BONUS_PER_LEVEL)).abs() < 1e-6);
    }

    #[test]
    fn test_tires_reduce_increment() {
        let t = track(8.0, 0.002);
        let car = CarConfig::default().with_upgrades(0, 2);
        let expected = 0.002 - 2.0 * TIRE_REDUCTION_PER_LEVEL;
        assert!((speed_increment(&t, &car) - expected).abs() < 1e-7);
    }

    #[test]
    fn test_increment_floors() {
        let t = track(8.0, 0.001);
        let car = CarConfig::default().with_upgrades(0, 3);
        // 0.001 - 3 * 0.0004 is negative
        assert_eq!(speed_increment(&t, &car), MIN_SPEED_INCREMENT);
    }

    #[test]
    fn test_curve_matches_repeated_advance() {
        let curve = SpeedCurve::new(&track(8.0, 0.002), &CarConfig::default());
        let mut speed = curve.start;
        for _ in 0..500 {
            speed = curve.advance(speed);
        }
        assert!((speed - 9.0).abs() < 0.01);
        assert!((curve.advance(curve.start) - 8.002).abs() < 1e-5);
    }
}
