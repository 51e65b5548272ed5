//! Audio system
//!
//! Sound is optional: the manager forwards effects to whatever backend is
//! available and silently does nothing when there is none.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit an obstacle or the ground
    Crash,
    /// Flyer flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Run ended with a new best
    HighScore,
}

/// Something that can make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start or stop the ambient loop
    fn set_ambient(&mut self, _on: bool) {}
}

/// Rings the terminal bell on a crash. The bell has one voice, so the
/// other effects stay silent rather than doubling up on the crash tick.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Whether `effect` rings the bell
    pub fn rings_for(effect: SoundEffect) -> bool {
        effect == SoundEffect::Crash
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if volume <= 0.0 || !Self::rings_for(effect) {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::debug!("Bell failed: {}", e);
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    muted: bool,
    ambient: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    /// Manager with a backend
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            muted: false,
            ambient: false,
        }
    }

    /// Manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            backend: None,
            master_volume: 0.8,
            muted: false,
            ambient: false,
        }
    }

    /// Pick the backend and volume for the current settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = if settings.sound {
            Self::new(Box::new(TerminalBell::stdout()))
        } else {
            log::info!("Sound disabled in settings - audio disabled");
            Self::silent()
        };
        audio.set_master_volume(settings.volume);
        audio
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.play(effect, vol);
        }
    }

    /// Keep the ambient loop running only while `on`
    pub fn set_ambient(&mut self, on: bool) {
        if self.ambient == on {
            return;
        }
        self.ambient = on;
        if let Some(backend) = self.backend.as_mut() {
            backend.set_ambient(on);
        }
    }

    pub fn ambient(&self) -> bool {
        self.ambient
    }

    /// The sound for a game event, if it has one
    pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::ObstaclePassed => Some(SoundEffect::Score),
            GameEvent::GameOver { new_high: true, .. } => Some(SoundEffect::HighScore),
            _ => None,
        }
    }

    /// Play whatever the tick's events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(Self::effect_for) {
            self.play(effect);
        }
    }
}
