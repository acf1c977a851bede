//! Static game configuration
//!
//! Track profiles and the player's car. Both are plain data chosen before a
//! session starts and never mutated while it runs.

pub mod car;
pub mod track;

pub use car::{CarConfig, Chassis, Decal, PaintColor};
pub use track::{LandmarkKind, TRACKS, TrackId, TrackProfile};
