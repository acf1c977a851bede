//! Lane Rush - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Simulation core (session state machine, spawning, motion, collisions)
//! - `config`: Track profiles and car configuration
//! - `best_score`: Persisted best score record
//! - `persistence`: Key-value storage backends
//! - `settings`: Player preferences (track, car, audio)
//! - `audio`: Session observer driving sound cues
//! - `autopilot`: Demo driver for idle/attract mode

pub mod audio;
pub mod autopilot;
pub mod best_score;
pub mod config;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use best_score::BestScore;
pub use config::{CarConfig, TrackId, TrackProfile};
pub use error::{ConfigError, StoreError};
pub use settings::Settings;
pub use sim::{LaneDirection, Phase, Session, SessionObserver, SessionSnapshot};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Road layout: three lanes between two landmark verges
    pub const LANE_COUNT: u8 = 3;
    pub const CENTER_LANE: u8 = 1;
    pub const LANE_WIDTH: f32 = 100.0;
    pub const ROAD_LEFT: f32 = 50.0;
    pub const ROAD_RIGHT: f32 = ROAD_LEFT + LANE_WIDTH * LANE_COUNT as f32;
    /// Lane marking dash period; road offset wraps at this value
    pub const ROAD_MARK_PERIOD: f32 = 40.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const PLAYER_Y: f32 = FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN;

    /// Obstacles share the player's footprint
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    /// Newest obstacle must be this far down before another may spawn
    pub const OBSTACLE_CLEARANCE: f32 = 200.0;
    /// Per-tick spawn chance once clearance is reached
    pub const OBSTACLE_SPAWN_CHANCE: f32 = 0.02;

    /// Roadside landmarks
    pub const LANDMARK_WIDTH: f32 = 36.0;
    pub const LANDMARK_HEIGHT: f32 = 48.0;
    pub const LANDMARK_CLEARANCE: f32 = 300.0;
    pub const LANDMARK_SPAWN_CHANCE: f32 = 0.01;

    /// Upgrades
    pub const MAX_UPGRADE_LEVEL: u8 = 3;
    /// Starting speed bonus per engine level (pixels/tick)
    pub const ENGINE_BONUS_PER_LEVEL: f32 = 0.5;
    /// Per-tick acceleration shaved off per tire level
    pub const TIRE_REDUCTION_PER_LEVEL: f32 = 0.0004;
    /// Acceleration never drops below this, whatever the tires
    pub const MIN_SPEED_INCREMENT: f32 = 0.0005;
}

/// Left edge of a lane's centered entity of the given width
#[inline]
pub fn lane_x(lane: u8, width: f32) -> f32 {
    consts::ROAD_LEFT + lane as f32 * consts::LANE_WIDTH + (consts::LANE_WIDTH - width) / 2.0
}

/// Pack an RGB triple into `0xRRGGBB`
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::*;

    #[test]
    fn test_lanes_fit_on_road() {
        for lane in 0..LANE_COUNT {
            let x = lane_x(lane, PLAYER_WIDTH);
            assert!(x >= ROAD_LEFT);
            assert!(x + PLAYER_WIDTH <= ROAD_RIGHT);
        }
        assert_eq!(ROAD_RIGHT + ROAD_LEFT, FIELD_WIDTH);
    }

    #[test]
    fn test_rgb_packing() {
        assert_eq!(rgb(0xff, 0x80, 0x01), 0xff8001);
    }
}
