//! Audio driven by session events
//!
//! `AudioEngine` subscribes to a session and turns its events into one-shot
//! cues plus a continuous engine tone whose pitch follows speed. The actual
//! sound output is a pluggable `AudioBackend`.

use crate::sim::{SessionObserver, SessionSnapshot};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Session started
    Start,
    /// Collision ended the session
    Crash,
    /// Final score beat the best
    NewBest,
}

/// Engine tone pitch at speed 0 (Hz)
pub const ENGINE_BASE_HZ: f32 = 55.0;
/// Pitch added per unit of speed (Hz)
pub const ENGINE_HZ_PER_SPEED: f32 = 9.0;
/// Pitch ceiling; speed itself is unbounded
pub const ENGINE_MAX_HZ: f32 = 440.0;

/// Engine tone frequency for a given scroll speed
pub fn engine_frequency(speed: f32) -> f32 {
    (ENGINE_BASE_HZ + speed.max(0.0) * ENGINE_HZ_PER_SPEED).min(ENGINE_MAX_HZ)
}

/// Sound output
pub trait AudioBackend {
    /// Play a cue at the given volume (0.0 - 1.0)
    fn play(&mut self, cue: AudioCue, volume: f32);
    /// Start the continuous engine tone
    fn start_engine(&mut self, frequency: f32, volume: f32);
    /// Retune the running engine tone
    fn set_engine(&mut self, frequency: f32, volume: f32);
    fn stop_engine(&mut self);
}

/// Backend that only logs (native builds, headless runs)
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        log::debug!("audio: {:?} at {:.2}", cue, volume);
    }

    fn start_engine(&mut self, frequency: f32, _volume: f32) {
        log::debug!("audio: engine on at {:.1} Hz", frequency);
    }

    fn set_engine(&mut self, _frequency: f32, _volume: f32) {}

    fn stop_engine(&mut self) {
        log::debug!("audio: engine off");
    }
}

/// Audio manager for the game
pub struct AudioEngine<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    engine_volume: f32,
    muted: bool,
    engine_running: bool,
}

impl<B: AudioBackend> AudioEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            engine_volume: 0.5,
            muted: false,
            engine_running: false,
        }
    }

    /// Apply volumes from saved settings
    pub fn with_settings(mut self, settings: &crate::Settings) -> Self {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.engine_volume = settings.engine_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted && self.engine_running {
            self.backend.stop_engine();
            self.engine_running = false;
        }
    }

    pub fn is_engine_running(&self) -> bool {
        self.engine_running
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_engine_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.engine_volume
        }
    }

    fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, vol);
    }

    fn stop_engine(&mut self) {
        if self.engine_running {
            self.backend.stop_engine();
            self.engine_running = false;
        }
    }
}

impl<B: AudioBackend> SessionObserver for AudioEngine<B> {
    fn on_start(&mut self, snapshot: &SessionSnapshot) {
        self.play(AudioCue::Start);
        self.stop_engine();
        let vol = self.effective_engine_volume();
        if vol > 0.0 {
            self.backend.start_engine(engine_frequency(snapshot.speed), vol);
            self.engine_running = true;
        }
    }

    fn on_tick(&mut self, speed: f32, _score: u64) {
        if self.engine_running {
            let vol = self.effective_engine_volume();
            self.backend.set_engine(engine_frequency(speed), vol);
        }
    }

    fn on_terminate(&mut self, _final_score: u64, new_best: bool) {
        self.stop_engine();
        self.play(AudioCue::Crash);
        if new_best {
            self.play(AudioCue::NewBest);
        }
    }

    fn on_reset(&mut self) {
        self.stop_engine();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarConfig, TrackId};
    use crate::sim::{Phase, Session};
    use crate::BestScore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play(AudioCue),
        EngineOn,
        EngineTune(f32),
        EngineOff,
    }

    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
    }

    impl AudioBackend for RecordingBackend {
        fn play(&mut self, cue: AudioCue, _volume: f32) {
            self.calls.push(Call::Play(cue));
        }

        fn start_engine(&mut self, _frequency: f32, _volume: f32) {
            self.calls.push(Call::EngineOn);
        }

        fn set_engine(&mut self, frequency: f32, _volume: f32) {
            self.calls.push(Call::EngineTune(frequency));
        }

        fn stop_engine(&mut self) {
            self.calls.push(Call::EngineOff);
        }
    }

    #[test]
    fn test_engine_frequency_rises_and_caps() {
        assert_eq!(engine_frequency(0.0), ENGINE_BASE_HZ);
        assert!(engine_frequency(9.0) > engine_frequency(8.0));
        assert_eq!(engine_frequency(10_000.0), ENGINE_MAX_HZ);
    }

    #[test]
    fn test_session_drives_audio() {
        let audio = Rc::new(RefCell::new(AudioEngine::new(RecordingBackend::default())));
        let mut session = Session::with_seed(42, BestScore::in_memory(0));
        session.subscribe(Box::new(audio.clone()));

        session
            .start_session(TrackId::Highway.profile(), &CarConfig::default())
            .unwrap();
        assert!(audio.borrow().is_engine_running());

        let mut snap = session.snapshot();
        for _ in 0..100_000 {
            snap = session.tick(16.0);
            if snap.phase == Phase::Terminated {
                break;
            }
        }
        assert_eq!(snap.phase, Phase::Terminated);

        let engine = audio.borrow();
        let calls = &engine.backend().calls;
        assert_eq!(calls[0], Call::Play(AudioCue::Start));
        assert_eq!(calls[1], Call::EngineOn);
        let tunes = calls
            .iter()
            .filter(|c| matches!(c, Call::EngineTune(_)))
            .count() as u64;
        assert_eq!(tunes, snap.score);
        assert!(snap.score > 0);
        assert_eq!(
            calls[calls.len() - 3..],
            [
                Call::EngineOff,
                Call::Play(AudioCue::Crash),
                Call::Play(AudioCue::NewBest),
            ]
        );
        assert!(!engine.is_engine_running());
    }

    #[test]
    fn test_muted_engine_plays_nothing() {
        let mut audio = AudioEngine::new(RecordingBackend::default());
        audio.set_muted(true);
        let mut session = Session::with_seed(7, BestScore::in_memory(0));
        let snap = session
            .start_session(TrackId::Forest.profile(), &CarConfig::default())
            .unwrap();
        audio.on_start(&snap);
        audio.on_tick(9.0, 1);
        audio.on_terminate(1, true);
        assert!(audio.backend().calls.is_empty());
    }

    #[test]
    fn test_reset_stops_engine_once() {
        let mut audio = AudioEngine::new(RecordingBackend::default());
        let mut session = Session::with_seed(8, BestScore::in_memory(0));
        let snap = session
            .start_session(TrackId::Desert.profile(), &CarConfig::default())
            .unwrap();
        audio.on_start(&snap);
        audio.on_reset();
        audio.on_reset();
        let offs = audio
            .backend()
            .calls
            .iter()
            .filter(|c| **c == Call::EngineOff)
            .count();
        assert_eq!(offs, 1);
    }
}
