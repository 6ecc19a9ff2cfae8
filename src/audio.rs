//! Audio cues and the playback interface
//!
//! Sample loading and mixing belong to the host. The game only decides which
//! cue plays, whether it loops, and at what volume.

use crate::consts::{HIT_VARIANTS, THEME_COUNT};
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Bird hits the ball (one of `HIT_VARIANTS`)
    Hit(u8),
    /// A point was scored
    Score,
    /// Background theme (one of `THEME_COUNT`)
    Theme(u8),
}

impl SoundCue {
    /// Music cues use the music volume, everything else the sfx volume
    pub fn is_music(&self) -> bool {
        matches!(self, SoundCue::Theme(_))
    }

    /// Asset name the host maps to a sample
    pub fn asset_name(&self) -> String {
        match self {
            SoundCue::Hit(variant) => format!("hit{}", variant % HIT_VARIANTS + 1),
            SoundCue::Score => "score".to_string(),
            SoundCue::Theme(n) => format!("theme{}", n % THEME_COUNT + 1),
        }
    }

    /// Cue for a gameplay event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Hit { variant, .. } => SoundCue::Hit(*variant),
            GameEvent::Goal { .. } => SoundCue::Score,
        }
    }
}

/// Host playback interface
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue, looping: bool, volume: f32);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _cue: SoundCue, _looping: bool, _volume: f32) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, cue: SoundCue, looping: bool, volume: f32) {
        log::debug!(
            "play {} (looping: {}, volume: {:.2})",
            cue.asset_name(),
            looping,
            volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a cue
    pub fn effective_volume(&self, cue: SoundCue) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a cue. Silent cues never reach the backend.
    pub fn play(&mut self, cue: SoundCue, looping: bool) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, looping, vol);
    }

    /// Play the cue for each drained gameplay event
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundCue::for_event(event), false);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
