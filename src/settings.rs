//! Game settings and preferences
//!
//! Persisted as a JSON file next to the progress save. Every field has a
//! default, so partial or older files still load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, AudioSink};
use crate::error::StoreError;
use crate::tuning::PhysicsTuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics and match balance
    pub tuning: PhysicsTuning,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Attract mode ===
    /// Seed for the demo bot's aim jitter
    pub attract_seed: u64,
    /// Frame cap for a headless demo match (about 10 minutes at 60 Hz)
    pub attract_max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: PhysicsTuning::default(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            attract_seed: 0x41_48_4f_43,
            attract_max_frames: 60 * 60 * 10,
        }
    }
}

impl Settings {
    /// Load settings from `path`, using defaults when missing or unreadable
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {} ({e})", path.display());
                Self::default()
            }
        }
    }

    /// Read and validate; invalid tuning is an error, not a silent clamp
    pub fn try_load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Push the audio preferences into a manager
    pub fn apply_audio<S: AudioSink>(&self, audio: &mut AudioManager<S>) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_muted(self.muted);
    }
}
