//! Simulation state
//!
//! Everything a frame reads or writes is held in [`SimulationContext`], which
//! the host owns and lends to [`super::tick`] one frame at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::board::{Board, Side};
use super::fsm::{MatchPhase, MatchState};
use crate::audio::SoundEffect;
use crate::tuning::{Difficulty, PhysicsTuning};

/// The free-moving disc
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Puck {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A kinematically driven paddle
///
/// Mallets carry no velocity of their own. What the collision resolver sees
/// as mallet velocity is the distance covered by the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mallet {
    pub side: Side,
    pos: Vec2,
    prev_pos: Vec2,
}

impl Mallet {
    pub fn new(side: Side, pos: Vec2) -> Self {
        Self {
            side,
            pos,
            prev_pos: pos,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Velocity approximated as the position delta of the last frame.
    ///
    /// For the opponent this lags one frame behind its target seeking.
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Move to `target`, clamped to this mallet's half. Call once per frame.
    pub fn move_to(&mut self, target: Vec2, board: &Board) {
        self.prev_pos = self.pos;
        self.pos = board.clamp_to_half(self.side, target);
    }

    /// Stay in place for a frame (derived velocity becomes zero)
    pub fn hold(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Teleport without producing any velocity
    pub fn place(&mut self, pos: Vec2, board: &Board) {
        self.pos = board.clamp_to_half(self.side, pos);
        self.prev_pos = self.pos;
    }
}

/// Goals for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    pub fn add_goal(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }

    /// Side that has reached `win_score`, if any
    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.opponent >= win_score {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Final result from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Discrete notifications produced by a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Match began; timestamp in host milliseconds
    MatchStarted { at_ms: f64 },
    /// Puck bounced off a side or end wall
    WallHit,
    /// Puck was struck by a mallet
    MalletHit { side: Side },
    /// Puck went through a goal
    Goal { scorer: Side, score: Score },
    /// Pause ended and entities were reset for the next face-off
    FaceOff,
    /// A side reached the win score
    MatchOver {
        outcome: Outcome,
        score: Score,
        duration_secs: u64,
        games_played: u32,
    },
    /// Result screen dismissed, back to the start menu
    Restarted,
}

impl GameEvent {
    /// Sound cue for the audio collaborator, if this event has one
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::MalletHit { .. } => Some(SoundEffect::MalletHit),
            GameEvent::Goal { .. } => Some(SoundEffect::Goal),
            _ => None,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationContext {
    pub board: Board,
    pub tuning: PhysicsTuning,
    pub difficulty: Difficulty,
    /// Completed matches, mirrored from the persistence collaborator
    pub games_played: u32,
    pub puck: Puck,
    pub player: Mallet,
    pub opponent: Mallet,
    pub score: Score,
    pub match_state: MatchState,
    /// Frames left in the current goal pause
    pub pause_frames: u32,
    /// Side that scored the pending goal, consumed by the face-off reset
    pub last_scorer: Option<Side>,
    /// Simulation frame counter (only advances while Playing)
    pub frame: u64,
    /// Host timestamp of the current match start
    pub started_at_ms: Option<f64>,
    /// Host timestamp of the most recent game over
    pub ended_at_ms: Option<f64>,
}

impl SimulationContext {
    pub fn new(board: Board, tuning: PhysicsTuning, games_played: u32) -> Self {
        let difficulty = Difficulty::from_games_played(games_played, &tuning.ramp);
        Self {
            puck: Puck {
                pos: board.puck_spot(None),
                vel: Vec2::ZERO,
            },
            player: Mallet::new(Side::Player, board.mallet_home(Side::Player)),
            opponent: Mallet::new(Side::Opponent, board.mallet_home(Side::Opponent)),
            board,
            tuning,
            difficulty,
            games_played,
            score: Score::default(),
            match_state: MatchState::default(),
            pause_frames: 0,
            last_scorer: None,
            frame: 0,
            started_at_ms: None,
            ended_at_ms: None,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.match_state.phase()
    }

    pub fn mallet(&self, side: Side) -> &Mallet {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Put mallets and puck on their face-off spots with no motion
    pub fn reset_entities(&mut self, scorer: Option<Side>) {
        self.player
            .place(self.board.mallet_home(Side::Player), &self.board);
        self.opponent
            .place(self.board.mallet_home(Side::Opponent), &self.board);
        self.puck = Puck {
            pos: self.board.puck_spot(scorer),
            vel: Vec2::ZERO,
        };
        log::debug!("Entities reset (scorer: {:?})", scorer);
    }

    /// Recompute difficulty from the games-played counter
    pub fn set_games_played(&mut self, games_played: u32) {
        self.games_played = games_played;
        self.difficulty = Difficulty::from_games_played(games_played, &self.tuning.ramp);
    }

    /// Whole seconds between match start and game over
    pub fn match_duration_secs(&self) -> Option<u64> {
        let start = self.started_at_ms?;
        let end = self.ended_at_ms?;
        Some(((end - start).max(0.0) / 1000.0).round() as u64)
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new(Board::default(), PhysicsTuning::default(), 0)
    }
}
