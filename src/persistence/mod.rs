//! Games-played counter persistence
//!
//! Features:
//! - `ProgressStore` contract for the storage collaborator
//! - Versioned JSON envelope on disk
//! - Backup rotation (tmp → save, old save → backup)
//! - Fallback to default difficulty when storage is unavailable

pub mod envelope;

pub use envelope::{Envelope, JsonFileStore, SAVE_VERSION};

use crate::error::StoreError;

/// Storage collaborator for the games-played counter
pub trait ProgressStore {
    fn load_games_played(&mut self) -> Result<u32, StoreError>;
    fn save_games_played(&mut self, games_played: u32) -> Result<(), StoreError>;
}

/// Read the counter, falling back to 0 (first-game difficulty) on any failure
pub fn load_or_default<S: ProgressStore + ?Sized>(store: &mut S) -> u32 {
    match store.load_games_played() {
        Ok(games) => {
            log::info!("Loaded progress: {} games played", games);
            games
        }
        Err(e) if e.is_not_found() => {
            log::info!("No saved progress, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Progress unavailable ({e}), using default difficulty");
            0
        }
    }
}

/// Write the counter; failures are logged and otherwise ignored
pub fn save_or_warn<S: ProgressStore + ?Sized>(store: &mut S, games_played: u32) {
    match store.save_games_played(games_played) {
        Ok(()) => log::info!("Progress saved ({} games played)", games_played),
        Err(e) => log::warn!("Failed to save progress: {e}"),
    }
}

/// In-memory store for tests and hosts without storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub games_played: Option<u32>,
}

impl ProgressStore for MemoryStore {
    fn load_games_played(&mut self) -> Result<u32, StoreError> {
        Ok(self.games_played.unwrap_or(0))
    }

    fn save_games_played(&mut self, games_played: u32) -> Result<(), StoreError> {
        self.games_played = Some(games_played);
        Ok(())
    }
}
