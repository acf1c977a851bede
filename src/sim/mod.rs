//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One call per frame, no internal timers
//! - Randomness only from the injected generator
//! - Hosts read owned snapshots, never the live state

pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod session;
pub mod spawn;
pub mod state;

pub use collision::{Rect, first_collision};
pub use difficulty::{SpeedCurve, speed_increment, starting_speed};
pub use session::{Session, SessionObserver};
pub use spawn::{LANDMARK_POLICY, OBSTACLE_POLICY, SpawnPolicy};
pub use state::{
    LaneDirection, Landmark, Obstacle, ObstacleKind, Phase, Player, SessionSnapshot,
    SessionState, Side,
};
