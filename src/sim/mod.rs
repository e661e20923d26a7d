//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame, no wall-clock reads
//! - All state in an explicit `SimulationContext`
//! - No rendering, audio or storage dependencies

pub mod board;
pub mod collision;
pub mod fsm;
pub mod goal;
pub mod integrate;
pub mod opponent;
pub mod state;
pub mod tick;

pub use board::{Board, Side};
pub use collision::{MalletContact, resolve_mallet, resolve_walls};
pub use fsm::{MatchPhase, MatchState, Transition};
pub use goal::{EndLine, check_goal};
pub use integrate::integrate_puck;
pub use opponent::{advance_opponent, opponent_target};
pub use state::{GameEvent, Mallet, Outcome, Puck, Score, SimulationContext};
pub use tick::{TickInput, goal_pause_elapsed, tick};
