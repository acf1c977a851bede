//! Track profiles
//!
//! A track fixes the starting speed, the acceleration curve, the obstacle
//! palette and which landmarks line the road.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rgb;

/// Built-in track identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackId {
    #[default]
    Highway,
    Desert,
    Forest,
    NeonCity,
}

impl TrackId {
    pub const ALL: [TrackId; 4] = [
        TrackId::Highway,
        TrackId::Desert,
        TrackId::Forest,
        TrackId::NeonCity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackId::Highway => "highway",
            TrackId::Desert => "desert",
            TrackId::Forest => "forest",
            TrackId::NeonCity => "neon-city",
        }
    }

    /// The built-in profile for this track
    pub fn profile(&self) -> &'static TrackProfile {
        match self {
            TrackId::Highway => &TRACKS[0],
            TrackId::Desert => &TRACKS[1],
            TrackId::Forest => &TRACKS[2],
            TrackId::NeonCity => &TRACKS[3],
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "highway" => Ok(TrackId::Highway),
            "desert" => Ok(TrackId::Desert),
            "forest" => Ok(TrackId::Forest),
            "neon-city" | "neon_city" | "neon" => Ok(TrackId::NeonCity),
            other => Err(ConfigError::UnknownTrack(other.to_string())),
        }
    }
}

/// Decorative roadside entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandmarkKind {
    Tree,
    Pine,
    Rock,
    Cactus,
    Dune,
    Lamppost,
    Billboard,
    Building,
    NeonSign,
}

/// Immutable per-track tuning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackProfile {
    pub id: TrackId,
    pub name: &'static str,
    /// Scroll speed at the start of a session (pixels/tick)
    pub base_speed: f32,
    /// Speed gained every tick before tire upgrades
    pub speed_increment: f32,
    /// Obstacle colors (`0xRRGGBB`)
    pub obstacle_palette: &'static [u32],
    /// Landmark kinds that may appear beside the road
    pub landmark_kinds: &'static [LandmarkKind],
}

impl TrackProfile {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let track = self.id.to_string();
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            return Err(ConfigError::NonPositiveBaseSpeed {
                track,
                value: self.base_speed,
            });
        }
        if self.speed_increment.is_nan() || self.speed_increment <= 0.0 {
            return Err(ConfigError::NonPositiveSpeedIncrement {
                track,
                value: self.speed_increment,
            });
        }
        if self.landmark_kinds.is_empty() {
            return Err(ConfigError::EmptyLandmarkKinds { track });
        }
        Ok(())
    }
}

/// Fallback obstacle color for a track with an empty palette
pub const DEFAULT_OBSTACLE_COLOR: u32 = rgb(0x88, 0x88, 0x88);

pub static TRACKS: [TrackProfile; 4] = [
    TrackProfile {
        id: TrackId::Highway,
        name: "Highway",
        base_speed: 8.0,
        speed_increment: 0.002,
        obstacle_palette: &[
            rgb(0x3a, 0x7b, 0xd5),
            rgb(0xe0, 0xe0, 0xe0),
            rgb(0x2e, 0x2e, 0x2e),
            rgb(0xf2, 0xc1, 0x2e),
        ],
        landmark_kinds: &[LandmarkKind::Tree, LandmarkKind::Lamppost, LandmarkKind::Billboard],
    },
    TrackProfile {
        id: TrackId::Desert,
        name: "Desert",
        base_speed: 9.0,
        speed_increment: 0.0025,
        obstacle_palette: &[
            rgb(0xc9, 0x7b, 0x3c),
            rgb(0x8c, 0x5a, 0x2b),
            rgb(0xe8, 0xd3, 0xa2),
        ],
        landmark_kinds: &[LandmarkKind::Cactus, LandmarkKind::Rock, LandmarkKind::Dune],
    },
    TrackProfile {
        id: TrackId::Forest,
        name: "Forest",
        base_speed: 7.0,
        speed_increment: 0.0018,
        obstacle_palette: &[
            rgb(0x4f, 0x6d, 0x3a),
            rgb(0x7a, 0x4e, 0x2d),
            rgb(0xb5, 0x3d, 0x2a),
        ],
        landmark_kinds: &[LandmarkKind::Pine, LandmarkKind::Tree, LandmarkKind::Rock],
    },
    TrackProfile {
        id: TrackId::NeonCity,
        name: "Neon City",
        base_speed: 10.0,
        speed_increment: 0.003,
        obstacle_palette: &[
            rgb(0xff, 0x2d, 0x95),
            rgb(0x00, 0xf0, 0xff),
            rgb(0xb1, 0x4d, 0xff),
        ],
        landmark_kinds: &[LandmarkKind::NeonSign, LandmarkKind::Building, LandmarkKind::Lamppost],
    },
];
