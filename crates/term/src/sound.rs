//! Sound player for terminals: the only speaker available is the bell.
//!
//! Every request is logged; the clips that signal something the player must
//! notice ring the bell once on the next flush. Music has no output here, so
//! its source volume is only tracked.

use std::io::{self, Write};

use tracing::debug;

use crate::engine::{SoundPlayer, SoundSettings};
use crate::types::SoundClip;

#[derive(Debug, Clone)]
pub struct TerminalSoundPlayer {
    settings: SoundSettings,
    music_source_volume: f32,
    bell_pending: bool,
}

impl TerminalSoundPlayer {
    pub fn new(settings: SoundSettings) -> Self {
        let settings = settings.clamped();
        Self {
            settings,
            music_source_volume: if settings.music_enabled {
                settings.music_volume
            } else {
                0.0
            },
            bell_pending: false,
        }
    }

    pub fn music_source_volume(&self) -> f32 {
        self.music_source_volume
    }

    pub fn bell_pending(&self) -> bool {
        self.bell_pending
    }

    /// Write one BEL if any ringing clip was played since the last call
    pub fn flush_bell(&mut self, out: &mut impl Write) -> io::Result<()> {
        if std::mem::take(&mut self.bell_pending) {
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

fn rings_bell(clip: SoundClip) -> bool {
    matches!(
        clip,
        SoundClip::Error | SoundClip::ClearRow | SoundClip::LevelUpVocal | SoundClip::GameOver
    )
}

impl SoundPlayer for TerminalSoundPlayer {
    fn effects_enabled(&self) -> bool {
        self.settings.effects_enabled
    }

    fn set_effects_enabled(&mut self, enabled: bool) {
        debug!(enabled, "sound effects toggled");
        self.settings.effects_enabled = enabled;
        if !enabled {
            self.bell_pending = false;
        }
    }

    fn effects_volume(&self) -> f32 {
        self.settings.effects_volume
    }

    fn music_volume(&self) -> f32 {
        self.settings.music_volume
    }

    fn set_music_source_volume(&mut self, volume: f32) {
        if !self.settings.music_enabled {
            return;
        }
        debug!(volume, "music volume");
        self.music_source_volume = volume;
    }

    fn play(&mut self, clip: SoundClip, volume: f32) {
        debug!(clip = clip.as_str(), volume, "play");
        if rings_bell(clip) {
            self.bell_pending = true;
        }
    }
}
