//! Per-frame simulation step
//!
//! The host calls [`tick`] once per display frame. Within a Playing frame the
//! order is fixed: player input, integration, walls, mallets (followed by a
//! second wall pass), end lines, opponent. Nothing outside the Playing phase touches the entities.

use glam::Vec2;

use super::board::Side;
use super::collision::{resolve_mallet, resolve_walls};
use super::fsm::{self, MatchPhase, Transition};
use super::goal::{EndLine, check_goal};
use super::integrate::integrate_puck;
use super::opponent::advance_opponent;
use super::state::{GameEvent, SimulationContext};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Desired player mallet position on the board plane (re-clamped to the player half)
    pub player_target: Option<Vec2>,
    /// Start button pressed
    pub start: bool,
    /// Restart button pressed on the result screen
    pub restart: bool,
    /// Host clock in milliseconds, used for match timing only
    pub now_ms: f64,
}

/// Advance the match by one frame and report what happened
pub fn tick(ctx: &mut SimulationContext, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart && ctx.phase() == MatchPhase::GameOver {
        request(ctx, Transition::Restart, input.now_ms, &mut events);
    }
    if input.start && ctx.phase() == MatchPhase::Start {
        request(ctx, Transition::Begin, input.now_ms, &mut events);
    }

    match ctx.phase() {
        MatchPhase::Playing => step_playing(ctx, input, &mut events),
        MatchPhase::GoalPause => {
            ctx.pause_frames = ctx.pause_frames.saturating_sub(1);
            if ctx.pause_frames == 0 {
                request(ctx, Transition::PauseElapsed, input.now_ms, &mut events);
            }
        }
        MatchPhase::Start | MatchPhase::GameOver => {}
    }

    events
}

/// Fire the goal pause timer from outside the frame loop.
///
/// Safe to call repeatedly: once the match has left GoalPause this does nothing.
pub fn goal_pause_elapsed(ctx: &mut SimulationContext, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if ctx.phase() == MatchPhase::GoalPause {
        request(ctx, Transition::PauseElapsed, now_ms, &mut events);
    }
    events
}

fn step_playing(ctx: &mut SimulationContext, input: &TickInput, events: &mut Vec<GameEvent>) {
    ctx.frame += 1;

    match input.player_target {
        Some(target) => ctx.player.move_to(target, &ctx.board),
        None => ctx.player.hold(),
    }

    integrate_puck(&mut ctx.puck, &ctx.tuning, ctx.difficulty.max_speed);

    let mut wall_hit = resolve_walls(&mut ctx.puck, &ctx.board);
    if wall_hit {
        events.push(GameEvent::WallHit);
    }

    for side in [Side::Player, Side::Opponent] {
        let mallet = *ctx.mallet(side);
        let contact = resolve_mallet(
            &mut ctx.puck,
            mallet.pos(),
            mallet.velocity(),
            &ctx.board,
            &ctx.tuning,
        );
        if contact.impulse_applied {
            events.push(GameEvent::MalletHit { side });
        }
    }

    // A mallet can shove the puck into a wall; keep it on the table
    if resolve_walls(&mut ctx.puck, &ctx.board) && !wall_hit {
        wall_hit = true;
        events.push(GameEvent::WallHit);
    }

    match check_goal(&mut ctx.puck, &ctx.board) {
        EndLine::Goal(scorer) => {
            request(ctx, Transition::GoalScored(scorer), input.now_ms, events);
            // Table is frozen from here on
            return;
        }
        EndLine::Rebound if !wall_hit => events.push(GameEvent::WallHit),
        EndLine::Rebound | EndLine::Clear => {}
    }

    advance_opponent(
        &mut ctx.opponent,
        &ctx.puck,
        &ctx.board,
        &ctx.tuning,
        ctx.difficulty.tracking_gain,
    );
}

/// Transitions requested by the pipeline itself are always legal when the
/// phase checks above hold; a rejection means the stage order is broken.
fn request(
    ctx: &mut SimulationContext,
    transition: Transition,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    let accepted = fsm::apply(ctx, transition, now_ms, events).is_ok();
    debug_assert!(accepted, "frame pipeline requested illegal {transition:?}");
}
