use serde::{Deserialize, Serialize};

use crate::collaborators::{SoundId, SoundPlayer};
use crate::storage::Config;

/// Mute switch and master volume applied before anything reaches a
/// [`SoundPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Master volume in `0.0..=1.0`; `None` keeps per-sound defaults.
    pub volume: Option<f32>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: None,
        }
    }
}

impl SoundSettings {
    pub fn from_config(config: &Config) -> Self {
        let mut settings = Self {
            enabled: config.sound.enabled,
            volume: None,
        };
        if let Some(level) = config.volume_level() {
            settings.set_volume(level);
        }
        settings
    }

    /// Clamp `level` into `0.0..=1.0` and apply it to every sound.
    /// Returns the level actually stored.
    pub fn set_volume(&mut self, level: f32) -> f32 {
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        self.volume = Some(level);
        level
    }

    pub fn volume_for(&self, sound: SoundId) -> f32 {
        self.volume.unwrap_or_else(|| sound.default_volume())
    }

    /// Play `sound` unless muted.
    pub fn play(&self, player: &mut dyn SoundPlayer, sound: SoundId) {
        if self.enabled {
            player.play(sound, self.volume_for(sound));
        }
    }
}
