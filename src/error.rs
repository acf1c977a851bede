//! Error types
//!
//! The simulation itself never fails; these cover configuration handed to it
//! and the storage backends around it.

use thiserror::Error;

/// Configuration rejected before a session starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("track `{track}` permits no landmark kinds")]
    EmptyLandmarkKinds { track: String },
    #[error("track `{track}` speed increment must be positive (got {value})")]
    NonPositiveSpeedIncrement { track: String, value: f32 },
    #[error("track `{track}` base speed must be positive (got {value})")]
    NonPositiveBaseSpeed { track: String, value: f32 },
    #[error("{upgrade} level must be between 0 and {max} (got {value})")]
    UpgradeLevelOutOfRange {
        upgrade: &'static str,
        value: u8,
        max: u8,
    },
    #[error("unknown track `{0}`")]
    UnknownTrack(String),
}

/// Key-value storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}
