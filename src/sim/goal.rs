//! End-line classification: goal or rebound

use serde::{Deserialize, Serialize};

use super::board::{Board, Side};
use super::state::Puck;

/// What happened at the end lines this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndLine {
    /// Puck is still on the table
    Clear,
    /// Puck went through a goal; the side that scored
    Goal(Side),
    /// Puck crossed an end line beside the gap and was bounced back
    Rebound,
}

/// Check the puck against both end lines.
///
/// Crossing the player's end (+z) inside the gap scores for the opponent and
/// vice versa. A crossing outside the gap is handled like a wall bounce.
pub fn check_goal(puck: &mut Puck, board: &Board) -> EndLine {
    let line = board.half_length();

    let (crossed_line, scorer) = if puck.pos.y > line {
        (line, Side::Opponent)
    } else if puck.pos.y < -line {
        (-line, Side::Player)
    } else {
        return EndLine::Clear;
    };

    if board.in_goal_gap(puck.pos.x) {
        EndLine::Goal(scorer)
    } else {
        puck.pos.y = crossed_line;
        puck.vel.y = -puck.vel.y;
        EndLine::Rebound
    }
}
