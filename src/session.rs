//! Session controller
//!
//! Owns the sound prompt, the toast and the audio cues, and reacts to the
//! surface's gameplay events. Timers are not started here: every toast hands
//! a [`ToastTicket`] to [`SessionController::drain_toast_timers`] and the shell
//! redeems it with [`SessionController::hide_toast`] once the delay elapses.

use crate::audio::{AudioCues, SoundCue};
use crate::sim::{SurfaceEvent, SurfaceEvents};
use crate::toast::{Toast, ToastTicket};
use crate::tuning::Tuning;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the enable-sound answer; gameplay not started
    Prompt,
    Playing,
    /// Every particle eaten (terminal)
    Finished,
}

pub struct SessionController<A: AudioCues> {
    phase: SessionPhase,
    eaten_count: usize,
    halfway_shown: bool,
    audio: A,
    toast: Toast,
    pending_timers: Vec<ToastTicket>,
    toast_ms: u32,
    start_message: String,
    halfway_message: String,
}

impl<A: AudioCues> SessionController<A> {
    pub fn new(audio: A, tuning: &Tuning) -> Self {
        Self {
            phase: SessionPhase::Prompt,
            eaten_count: 0,
            halfway_shown: false,
            audio,
            toast: Toast::new(),
            pending_timers: Vec::new(),
            toast_ms: tuning.toast_ms,
            start_message: tuning.start_message.clone(),
            halfway_message: tuning.halfway_message.clone(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn eaten_count(&self) -> usize {
        self.eaten_count
    }

    pub fn halfway_shown(&self) -> bool {
        self.halfway_shown
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn sound_on(&self) -> bool {
        self.audio.is_enabled()
    }

    /// Answer the enable-sound prompt. Returns true if this started the
    /// session; answers after the first are ignored.
    pub fn answer_prompt(&mut self, enable_sound: bool) -> bool {
        if self.phase != SessionPhase::Prompt {
            return false;
        }
        let sound = if enable_sound {
            self.audio.enable()
        } else {
            self.audio.disable();
            false
        };
        log::info!("Sound prompt answered: {} (sound {})", enable_sound, on_off(sound));

        self.phase = SessionPhase::Playing;
        let message = self.start_message.clone();
        self.show_toast(&message);
        true
    }

    /// Flip sound on/off; returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        let on = self.audio.toggle();
        log::info!("Sound toggled {}", on_off(on));
        on
    }

    fn show_toast(&mut self, message: &str) {
        let ticket = self.toast.show(message, self.toast_ms);
        self.pending_timers.push(ticket);
        self.audio.play(SoundCue::Milestone);
    }

    /// Hide timers requested since the last call
    pub fn drain_toast_timers(&mut self) -> Vec<ToastTicket> {
        std::mem::take(&mut self.pending_timers)
    }

    /// A hide timer fired. Returns whether the toast was hidden.
    pub fn hide_toast(&mut self, ticket: ToastTicket) -> bool {
        self.toast.hide(ticket)
    }
}

impl<A: AudioCues> SurfaceEvents for SessionController<A> {
    fn emit(&mut self, event: SurfaceEvent) {
        if self.phase != SessionPhase::Playing {
            log::debug!("Ignoring {:?} in {:?}", event, self.phase);
            return;
        }
        match event {
            SurfaceEvent::Collected => {
                self.eaten_count += 1;
                self.audio.play(SoundCue::Collect);
            }
            SurfaceEvent::HalfwayReached => {
                if !self.halfway_shown {
                    self.halfway_shown = true;
                    let message = self.halfway_message.clone();
                    self.show_toast(&message);
                }
            }
            SurfaceEvent::Completed => {
                self.phase = SessionPhase::Finished;
                log::info!("Session finished with {} collected", self.eaten_count);
                self.audio.play(SoundCue::Celebration);
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
