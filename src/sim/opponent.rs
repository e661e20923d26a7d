//! Opponent mallet controller
//!
//! A simple tracking heuristic: follow the puck sideways, step up to meet it
//! when it enters the opponent half, and sidestep when it slips behind.

use glam::Vec2;

use super::board::{Board, Side};
use super::state::{Mallet, Puck};
use crate::tuning::PhysicsTuning;

/// Where the opponent wants to be this frame
pub fn opponent_target(puck: &Puck, opponent: &Mallet, board: &Board, tuning: &PhysicsTuning) -> Vec2 {
    let mut target = Vec2::new(puck.pos.x, board.mallet_home(Side::Opponent).y);

    if puck.pos.y < 0.0 {
        let r = board.mallet_radius;
        target.y = (puck.pos.y - tuning.opponent_lead).clamp(-board.half_length() + r, -r);

        // Puck behind us: don't swat it into our own goal
        if puck.pos.y < opponent.pos().y {
            target.x = if puck.pos.x > 0.0 {
                puck.pos.x - tuning.own_goal_dodge
            } else {
                puck.pos.x + tuning.own_goal_dodge
            };
        }
    }

    board.clamp_to_half(Side::Opponent, target)
}

/// Close `tracking_gain` of the remaining distance to the target
pub fn advance_opponent(
    opponent: &mut Mallet,
    puck: &Puck,
    board: &Board,
    tuning: &PhysicsTuning,
    tracking_gain: f32,
) -> Vec2 {
    let target = opponent_target(puck, opponent, board, tuning);
    let next = opponent.pos() + (target - opponent.pos()) * tracking_gain;
    opponent.move_to(next, board);
    target
}
