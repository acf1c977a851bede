//! Session state machine
//!
//! `Idle -> Running -> Terminated`, with restart and reset. One call to
//! [`Session::tick`] per animation frame runs the whole pipeline:
//! difficulty, motion, spawning, collision, score.

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::first_collision;
use super::difficulty::SpeedCurve;
use super::motion;
use super::spawn;
use super::state::{LaneDirection, Phase, SessionSnapshot, SessionState};
use crate::best_score::BestScore;
use crate::config::{CarConfig, TrackId, TrackProfile};
use crate::error::ConfigError;

/// Receives session events (audio, persistence hooks, UI)
///
/// All methods default to no-ops.
pub trait SessionObserver {
    /// A session entered `Running`
    fn on_start(&mut self, _snapshot: &SessionSnapshot) {}
    /// A tick completed without a collision
    fn on_tick(&mut self, _speed: f32, _score: u64) {}
    /// The session ended on a collision. Called exactly once per termination.
    fn on_terminate(&mut self, _final_score: u64, _new_best: bool) {}
    /// The session was sent back to `Idle`
    fn on_reset(&mut self) {}
}

/// Lets a host keep a handle on an observer it also subscribed
impl<T: SessionObserver + ?Sized> SessionObserver for Rc<RefCell<T>> {
    fn on_start(&mut self, snapshot: &SessionSnapshot) {
        self.borrow_mut().on_start(snapshot);
    }

    fn on_tick(&mut self, speed: f32, score: u64) {
        self.borrow_mut().on_tick(speed, score);
    }

    fn on_terminate(&mut self, final_score: u64, new_best: bool) {
        self.borrow_mut().on_terminate(final_score, new_best);
    }

    fn on_reset(&mut self) {
        self.borrow_mut().on_reset();
    }
}

/// Owns and advances one player's sessions
pub struct Session<R: Rng = Pcg32> {
    state: SessionState,
    track: TrackProfile,
    curve: SpeedCurve,
    rng: R,
    best: BestScore,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session<Pcg32> {
    /// Session with a seeded PCG generator
    pub fn with_seed(seed: u64, best: BestScore) -> Self {
        Self::new(Pcg32::seed_from_u64(seed), best)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(rng: R, best: BestScore) -> Self {
        Self {
            state: SessionState::default(),
            track: TrackId::default().profile().clone(),
            curve: SpeedCurve::default(),
            rng,
            best,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn best_score(&self) -> u64 {
        self.best.get()
    }

    /// Active speed curve (last started session)
    pub fn speed_curve(&self) -> SpeedCurve {
        self.curve
    }

    /// Start (or restart) a session. Rejects configuration that breaks the
    /// track/car invariants.
    pub fn start_session(
        &mut self,
        track: &TrackProfile,
        car: &CarConfig,
    ) -> Result<SessionSnapshot, ConfigError> {
        track.validate()?;
        car.validate()?;

        if self.state.phase == Phase::Running {
            log::info!(
                "Restarting running session, discarding score {}",
                self.state.score
            );
        }

        self.curve = SpeedCurve::new(track, car);
        self.track = track.clone();
        self.state = SessionState::start(track.id, self.curve.start, car.paint.rgb());

        log::info!(
            "Session started on {} (speed {:.3}, +{:.4}/tick)",
            track.name,
            self.curve.start,
            self.curve.increment
        );

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_start(&snapshot);
        }
        Ok(snapshot)
    }

    /// Advance one frame. Outside `Running` this only echoes the snapshot.
    pub fn tick(&mut self, delta_ms: f64) -> SessionSnapshot {
        if self.state.phase != Phase::Running {
            return self.snapshot();
        }

        self.state.elapsed_ms += delta_ms.max(0.0);

        // Difficulty
        self.state.speed = self.curve.advance(self.state.speed);
        let speed = self.state.speed;

        // Motion
        motion::advance(&mut self.state.obstacles, speed);
        motion::advance(&mut self.state.landmarks, speed);
        self.state.road_offset = motion::advance_road_offset(self.state.road_offset, speed);

        // Spawning
        spawn::spawn_entities(&mut self.state, &self.track, &mut self.rng);

        // Collision truncates the tick: no score for it
        let hit = first_collision(&self.state.player.rect(), &self.state.obstacles).map(|o| o.id);
        if let Some(obstacle_id) = hit {
            self.terminate(obstacle_id);
            return self.snapshot();
        }

        // Score
        self.state.score += 1;
        let score = self.state.score;
        for observer in &mut self.observers {
            observer.on_tick(speed, score);
        }

        self.snapshot()
    }

    /// Move the player one lane. Ignored unless running. Steering into an
    /// obstacle ends the session on the spot.
    pub fn set_lane(&mut self, direction: LaneDirection) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.state.player.steer(direction);

        let hit = first_collision(&self.state.player.rect(), &self.state.obstacles).map(|o| o.id);
        if let Some(obstacle_id) = hit {
            self.terminate(obstacle_id);
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot(self.best.get())
    }

    /// Back to `Idle`, dropping all entities. The best score is untouched.
    pub fn reset(&mut self) {
        log::info!("Session reset from {:?}", self.state.phase);
        self.state = SessionState::default();
        for observer in &mut self.observers {
            observer.on_reset();
        }
    }

    fn terminate(&mut self, obstacle_id: u32) {
        self.state.phase = Phase::Terminated;
        let final_score = self.state.score;
        let new_best = self.best.submit(final_score);

        log::info!(
            "Crashed into obstacle {} after {} ticks (best {}{})",
            obstacle_id,
            final_score,
            self.best.get(),
            if new_best { ", new record" } else { "" }
        );

        for observer in &mut self.observers {
            observer.on_terminate(final_score, new_best);
        }
    }
}
