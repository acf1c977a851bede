//! Web Audio backend
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioBackend, AudioCue};

/// Running engine tone
struct EngineVoice {
    osc: OscillatorNode,
    gain: GainNode,
}

/// Sound output through an `AudioContext`
pub struct WebAudioBackend {
    ctx: Option<AudioContext>,
    engine: Option<EngineVoice>,
}

impl Default for WebAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioBackend {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, engine: None }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn ready_context(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Start - quick rising rev
    fn play_start(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(480.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Crash - low boom with a metallic crack
    fn play_crash(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = Self::create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(1500.0, t).ok();
            osc.frequency().set_value_at_time(700.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(1100.0, t + 0.08).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// New best - celebratory arpeggio
    fn play_new_best(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            // Lands after the crash has died down
            let delay = 0.5 + i as f64 * 0.08;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}

impl AudioBackend for WebAudioBackend {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        let Some(ctx) = self.ready_context() else {
            return;
        };
        match cue {
            AudioCue::Start => Self::play_start(ctx, volume),
            AudioCue::Crash => Self::play_crash(ctx, volume),
            AudioCue::NewBest => Self::play_new_best(ctx, volume),
        }
    }

    fn start_engine(&mut self, frequency: f32, volume: f32) {
        self.stop_engine();
        let Some(ctx) = self.ready_context() else {
            return;
        };
        let Some((osc, gain)) = Self::create_osc(ctx, frequency, OscillatorType::Sawtooth) else {
            return;
        };
        gain.gain().set_value(volume * 0.15);
        if osc.start().is_err() {
            log::warn!("Failed to start engine tone");
            return;
        }
        self.engine = Some(EngineVoice { osc, gain });
    }

    fn set_engine(&mut self, frequency: f32, volume: f32) {
        if let Some(voice) = &self.engine {
            voice.osc.frequency().set_value(frequency);
            voice.gain.gain().set_value(volume * 0.15);
        }
    }

    fn stop_engine(&mut self) {
        if let Some(voice) = self.engine.take() {
            voice.osc.stop().ok();
            voice.osc.disconnect().ok();
        }
    }
}
