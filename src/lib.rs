//! Air Hockey - puck-and-mallet arcade simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, collisions, opponent, match flow)
//! - `tuning`: Named physics constants and difficulty ramp
//! - `persistence`: Games-played counter storage with a versioned envelope
//! - `session`: Host-facing shell tying the simulation to storage and timing
//! - `audio`: Sound cue contract for the audio collaborator
//! - `settings`: User-facing configuration file

pub mod audio;
pub mod error;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{BoardError, StoreError, TransitionError, TuningError};
pub use session::{EndReason, Session, SessionReport};
pub use settings::Settings;
pub use tuning::{Difficulty, PhysicsTuning};

/// Board and match constants from the classic table layout
pub mod consts {
    /// Lateral extent of the playing surface (x axis)
    pub const BOARD_WIDTH: f32 = 14.0;
    /// Longitudinal extent of the playing surface (z axis)
    pub const BOARD_LENGTH: f32 = 24.0;
    /// Width of the opening in each end wall
    pub const GOAL_WIDTH: f32 = 4.5;

    pub const PUCK_RADIUS: f32 = 0.6;
    pub const MALLET_RADIUS: f32 = 1.0;

    /// First side to reach this many goals wins
    pub const WIN_SCORE: u32 = 7;

    /// Frames the table stays frozen after a goal (1.5 s at 60 Hz)
    pub const GOAL_PAUSE_FRAMES: u32 = 90;

    /// Puck spawn offset from the center line after a goal
    pub const PUCK_RESPAWN_OFFSET: f32 = 2.0;
}
