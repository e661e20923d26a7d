//! Error types for the fallible boundaries of the crate
//!
//! Simulation stages never fail: degenerate geometry and out-of-range input
//! are recovered where they happen. Only board construction, tuning validation,
//! storage and explicit state-machine requests report errors.

use thiserror::Error;

use crate::sim::fsm::{MatchPhase, Transition};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

impl StoreError {
    /// A missing file is the normal first-run case, not a failure worth a warning
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("Goal width {goal} must be smaller than board width {width}")]
    GoalWiderThanBoard { goal: f32, width: f32 },

    #[error("Board dimension `{name}` must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },

    #[error("Mallets of radius {radius} do not fit: board `{dimension}` is only {limit}")]
    MalletTooLarge {
        radius: f32,
        dimension: &'static str,
        limit: f32,
    },
}

/// Balance values that would break the physics (NaN speeds, endless matches)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TuningError {
    #[error("`{name}` must be in ({min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("Max speed must stay positive, got {0}")]
    NonPositiveMaxSpeed(f32),

    #[error("Win score must be at least 1")]
    ZeroWinScore,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Illegal transition {transition:?} from {from:?}")]
pub struct TransitionError {
    pub from: MatchPhase,
    pub transition: Transition,
}
