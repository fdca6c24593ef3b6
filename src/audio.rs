//! Audio cues
//!
//! Procedurally generated tones - no external files needed! Each cue is a
//! short table of sine tones; [`AudioManager`] plays them through Web Audio,
//! [`CueLog`] records them where there is no browser.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Particle eaten
    Collect,
    /// Played with every toast
    Milestone,
    /// All particles eaten - four-note arpeggio
    Celebration,
}

/// One sine tone of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Seconds
    pub duration: f64,
    pub volume: f32,
    /// Start offset from the cue trigger, milliseconds
    pub delay_ms: u32,
}

const fn tone(freq: f32, duration: f64, volume: f32, delay_ms: u32) -> Tone {
    Tone { freq, duration, volume, delay_ms }
}

const COLLECT: [Tone; 1] = [tone(520.0, 0.12, 0.15, 0)];
const MILESTONE: [Tone; 1] = [tone(880.0, 0.25, 0.25, 0)];
const CELEBRATION: [Tone; 4] = [
    tone(523.0, 0.3, 0.18, 0),
    tone(659.0, 0.3, 0.18, 120),
    tone(784.0, 0.3, 0.18, 240),
    tone(1046.0, 0.3, 0.18, 360),
];

impl SoundCue {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundCue::Collect => &COLLECT,
            SoundCue::Milestone => &MILESTONE,
            SoundCue::Celebration => &CELEBRATION,
        }
    }
}

/// Audio capability used by the session
///
/// Cues while disabled are silent no-ops.
pub trait AudioCues {
    /// Turn sound on; returns whether sound is actually on afterwards
    fn enable(&mut self) -> bool;
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
    fn play(&mut self, cue: SoundCue);

    /// Flip sound on/off; returns the new state
    fn toggle(&mut self) -> bool {
        if self.is_enabled() {
            self.disable();
            false
        } else {
            self.enable()
        }
    }
}

/// Records audible cues instead of playing them
#[derive(Debug, Default)]
pub struct CueLog {
    enabled: bool,
    pub played: Vec<SoundCue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioCues for CueLog {
    fn enable(&mut self) -> bool {
        self.enabled = true;
        true
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn play(&mut self, cue: SoundCue) {
        if self.enabled {
            log::debug!("cue {:?}", cue);
            self.played.push(cue);
        }
    }
}

/// Web Audio cue player
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    enabled: bool,
    /// AudioContext creation failed once; sound stays off for good
    unsupported: bool,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    /// The context is created lazily on first enable (needs a user gesture)
    pub fn new() -> Self {
        Self {
            ctx: None,
            enabled: false,
            unsupported: false,
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.unsupported {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.unsupported = true;
                }
            }
        }
        self.ctx.as_ref()
    }

    /// Schedule one tone on the audio clock
    fn play_tone(ctx: &AudioContext, t: &Tone) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(t.freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let start = ctx.current_time() + t.delay_ms as f64 / 1000.0;
        let end = start + t.duration;
        gain.gain().set_value_at_time(t.volume, start).ok()?;
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok()?;
        osc.start_with_when(start).ok()?;
        osc.stop_with_when(end).ok()?;
        Some(())
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioCues for AudioManager {
    fn enable(&mut self) -> bool {
        let Some(ctx) = self.context() else {
            self.enabled = false;
            return false;
        };
        // Resume context if suspended (browsers require user gesture)
        let _ = ctx.resume();
        self.enabled = true;
        log::info!("Sound on");
        true
    }

    fn disable(&mut self) {
        self.enabled = false;
        log::info!("Sound off");
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn play(&mut self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for t in cue.tones() {
            if Self::play_tone(ctx, t).is_none() {
                log::warn!("Failed to schedule {:?} tone at {} Hz", cue, t.freq);
            }
        }
    }
}
