//! Versioned JSON envelope stored on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ProgressStore;
use crate::error::StoreError;

/// Current on-disk format version
pub const SAVE_VERSION: u32 = 1;

/// What actually gets written to the save file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub games_played: u32,
}

impl Envelope {
    pub fn new(games_played: u32) -> Self {
        Self {
            version: SAVE_VERSION,
            games_played,
        }
    }

    pub fn decode(json: &str) -> Result<Self, StoreError> {
        let envelope: Envelope = serde_json::from_str(json)?;
        if envelope.version != SAVE_VERSION {
            return Err(StoreError::VersionMismatch {
                found: envelope.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(envelope)
    }
}

/// File-backed store.
///
/// A save writes `<name>.tmp`, moves the previous file to `<name>.bak` and
/// then renames the temp file into place. Loading falls back to those
/// siblings when the main file is corrupt or missing after an interrupted save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        self.path.with_extension(ext)
    }

    fn read(path: &Path) -> Result<Envelope, StoreError> {
        let json = fs::read_to_string(path)?;
        Envelope::decode(&json)
    }
}

impl ProgressStore for JsonFileStore {
    fn load_games_played(&mut self) -> Result<u32, StoreError> {
        match Self::read(&self.path) {
            Ok(envelope) => Ok(envelope.games_played),
            Err(e) if e.is_not_found() => {
                // Crash between the two renames: newest data is in tmp, previous in bak
                for ext in ["tmp", "bak"] {
                    let sibling = self.sibling(ext);
                    if let Ok(envelope) = Self::read(&sibling) {
                        log::warn!(
                            "Save file {} missing, recovered from {}",
                            self.path.display(),
                            sibling.display()
                        );
                        return Ok(envelope.games_played);
                    }
                }
                Err(e)
            }
            Err(e) => {
                let backup = self.sibling("bak");
                log::warn!("Save file {} unreadable ({e}), trying backup", self.path.display());
                Self::read(&backup).map(|envelope| envelope.games_played)
            }
        }
    }

    fn save_games_played(&mut self, games_played: u32) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&Envelope::new(games_played))?;
        let tmp = self.sibling("tmp");
        fs::write(&tmp, json)?;

        if self.path.exists() {
            fs::rename(&self.path, self.sibling("bak"))?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
