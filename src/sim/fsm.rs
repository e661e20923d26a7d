//! Match state machine
//!
//! The only code allowed to change the match phase. Each legal edge also
//! carries its side effects (score bookkeeping, entity resets, difficulty
//! recomputation), so callers request a [`Transition`] and never poke the
//! phase directly.
//!
//! ```text
//! Start --Begin--> Playing --GoalScored--> GoalPause --PauseElapsed--> Playing
//!                                                    \--PauseElapsed--> GameOver --Restart--> Start
//! ```

use serde::{Deserialize, Serialize};

use super::board::Side;
use super::state::{GameEvent, Outcome, Score, SimulationContext};
use crate::error::TransitionError;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Menu shown, nothing simulated
    #[default]
    Start,
    /// Full simulation active
    Playing,
    /// Simulation frozen while the goal animation runs
    GoalPause,
    /// A side reached the win score
    GameOver,
}

/// Requests accepted by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Explicit start action from the menu
    Begin,
    /// Puck crossed an end line inside the goal gap
    GoalScored(Side),
    /// Goal pause timer fired
    PauseElapsed,
    /// Explicit restart from the result screen
    Restart,
}

/// Phase holder; the phase can only change through [`apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    phase: MatchPhase,
}

impl MatchState {
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    /// Destination of `transition` from the current phase, if the edge exists.
    /// `decided` tells whether the score already has a winner.
    pub fn target(&self, transition: Transition, decided: bool) -> Option<MatchPhase> {
        use MatchPhase::*;
        match (self.phase, transition) {
            (Start, Transition::Begin) => Some(Playing),
            (Playing, Transition::GoalScored(_)) => Some(GoalPause),
            (GoalPause, Transition::PauseElapsed) if decided => Some(GameOver),
            (GoalPause, Transition::PauseElapsed) => Some(Playing),
            (GameOver, Transition::Restart) => Some(Start),
            _ => None,
        }
    }
}

/// Apply `transition` to the match, pushing resulting events.
///
/// Illegal requests leave `ctx` untouched and return an error.
pub fn apply(
    ctx: &mut SimulationContext,
    transition: Transition,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> Result<MatchPhase, TransitionError> {
    let decided = ctx.score.winner(ctx.tuning.win_score).is_some();
    let Some(next) = ctx.match_state.target(transition, decided) else {
        let err = TransitionError {
            from: ctx.match_state.phase,
            transition,
        };
        log::warn!("{err}");
        return Err(err);
    };

    match transition {
        Transition::Begin => {
            ctx.score = Score::default();
            ctx.reset_entities(None);
            ctx.pause_frames = 0;
            ctx.last_scorer = None;
            ctx.started_at_ms = Some(now_ms);
            ctx.ended_at_ms = None;
            log::info!(
                "Match started (games played: {}, max speed: {:.2}, tracking gain: {:.2})",
                ctx.games_played,
                ctx.difficulty.max_speed,
                ctx.difficulty.tracking_gain
            );
            events.push(GameEvent::MatchStarted { at_ms: now_ms });
        }
        Transition::GoalScored(scorer) => {
            ctx.score.add_goal(scorer);
            ctx.last_scorer = Some(scorer);
            ctx.pause_frames = ctx.tuning.goal_pause_frames;
            log::debug!(
                "Goal by {:?}: {} - {}",
                scorer,
                ctx.score.player,
                ctx.score.opponent
            );
            events.push(GameEvent::Goal {
                scorer,
                score: ctx.score,
            });
        }
        Transition::PauseElapsed if next == MatchPhase::Playing => {
            ctx.pause_frames = 0;
            let scorer = ctx.last_scorer.take();
            ctx.reset_entities(scorer);
            events.push(GameEvent::FaceOff);
        }
        Transition::PauseElapsed => {
            ctx.pause_frames = 0;
            ctx.last_scorer = None;
            ctx.ended_at_ms = Some(now_ms);
            let games_played = ctx.games_played.saturating_add(1);
            ctx.set_games_played(games_played);

            let outcome = match ctx.score.winner(ctx.tuning.win_score) {
                Some(Side::Player) => Outcome::Win,
                _ => Outcome::Lose,
            };
            let duration_secs = ctx.match_duration_secs().unwrap_or(0);
            log::info!(
                "Match over: {:?} {} - {} after {}s",
                outcome,
                ctx.score.player,
                ctx.score.opponent,
                duration_secs
            );
            events.push(GameEvent::MatchOver {
                outcome,
                score: ctx.score,
                duration_secs,
                games_played,
            });
        }
        Transition::Restart => {
            ctx.score = Score::default();
            ctx.reset_entities(None);
            events.push(GameEvent::Restarted);
        }
    }

    ctx.match_state.phase = next;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing() -> SimulationContext {
        let mut ctx = SimulationContext::default();
        let mut events = Vec::new();
        apply(&mut ctx, Transition::Begin, 0.0, &mut events).expect("start is legal");
        ctx
    }

    #[test]
    fn test_begin_resets_match() {
        let mut ctx = SimulationContext::default();
        ctx.score.player = 3;
        ctx.puck.vel = Vec2::new(1.0, 1.0);
        let mut events = Vec::new();

        let phase = apply(&mut ctx, Transition::Begin, 500.0, &mut events);
        assert_eq!(phase, Ok(MatchPhase::Playing));
        assert_eq!(ctx.score, Score::default());
        assert_eq!(ctx.puck.vel, Vec2::ZERO);
        assert_eq!(ctx.started_at_ms, Some(500.0));
        assert_eq!(events, vec![GameEvent::MatchStarted { at_ms: 500.0 }]);
    }

    #[test]
    fn test_goal_from_start_is_rejected() {
        let mut ctx = SimulationContext::default();
        let mut events = Vec::new();

        let err = apply(&mut ctx, Transition::GoalScored(Side::Player), 0.0, &mut events)
            .unwrap_err();
        assert_eq!(err.from, MatchPhase::Start);
        assert_eq!(ctx.phase(), MatchPhase::Start);
        assert_eq!(ctx.score, Score::default());
        assert!(events.is_empty());
    }

    #[test]
    fn test_goal_then_face_off() {
        let mut ctx = playing();
        let mut events = Vec::new();

        apply(&mut ctx, Transition::GoalScored(Side::Player), 0.0, &mut events).unwrap();
        assert_eq!(ctx.phase(), MatchPhase::GoalPause);
        assert_eq!(ctx.score.player, 1);
        assert_eq!(ctx.pause_frames, ctx.tuning.goal_pause_frames);

        apply(&mut ctx, Transition::PauseElapsed, 0.0, &mut events).unwrap();
        assert_eq!(ctx.phase(), MatchPhase::Playing);
        // Conceding side gets the puck
        assert!(ctx.puck.pos.y < 0.0);
        assert_eq!(events.last(), Some(&GameEvent::FaceOff));
    }

    #[test]
    fn test_pause_elapsed_twice_is_noop() {
        let mut ctx = playing();
        let mut events = Vec::new();
        apply(&mut ctx, Transition::GoalScored(Side::Opponent), 0.0, &mut events).unwrap();
        apply(&mut ctx, Transition::PauseElapsed, 0.0, &mut events).unwrap();
        let snapshot = ctx.clone();

        assert!(apply(&mut ctx, Transition::PauseElapsed, 0.0, &mut events).is_err());
        assert_eq!(ctx.phase(), snapshot.phase());
        assert_eq!(ctx.puck, snapshot.puck);
    }

    #[test]
    fn test_win_moves_to_game_over_and_ramps_difficulty() {
        let mut ctx = playing();
        ctx.score.opponent = ctx.tuning.win_score - 1;
        let before = ctx.difficulty;
        let mut events = Vec::new();

        apply(&mut ctx, Transition::GoalScored(Side::Opponent), 0.0, &mut events).unwrap();
        apply(&mut ctx, Transition::PauseElapsed, 30_000.0, &mut events).unwrap();

        assert_eq!(ctx.phase(), MatchPhase::GameOver);
        assert_eq!(ctx.games_played, 1);
        assert!(ctx.difficulty.max_speed > before.max_speed);
        assert!(matches!(
            events.last(),
            Some(GameEvent::MatchOver {
                outcome: Outcome::Lose,
                duration_secs: 30,
                games_played: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut ctx = playing();
        let mut events = Vec::new();
        assert!(apply(&mut ctx, Transition::Restart, 0.0, &mut events).is_err());

        ctx.score.player = ctx.tuning.win_score - 1;
        apply(&mut ctx, Transition::GoalScored(Side::Player), 0.0, &mut events).unwrap();
        apply(&mut ctx, Transition::PauseElapsed, 0.0, &mut events).unwrap();
        assert_eq!(
            apply(&mut ctx, Transition::Restart, 0.0, &mut events),
            Ok(MatchPhase::Start)
        );
        assert_eq!(ctx.score, Score::default());
    }

    #[test]
    fn test_edge_table() {
        use MatchPhase::*;
        let phases = [Start, Playing, GoalPause, GameOver];
        let transitions = [
            Transition::Begin,
            Transition::GoalScored(Side::Player),
            Transition::PauseElapsed,
            Transition::Restart,
        ];

        for phase in phases {
            for transition in transitions {
                for decided in [false, true] {
                    let expected = match (phase, transition) {
                        (Start, Transition::Begin) => Some(Playing),
                        (Playing, Transition::GoalScored(_)) => Some(GoalPause),
                        (GoalPause, Transition::PauseElapsed) if decided => Some(GameOver),
                        (GoalPause, Transition::PauseElapsed) => Some(Playing),
                        (GameOver, Transition::Restart) => Some(Start),
                        _ => None,
                    };
                    let state = MatchState { phase };
                    assert_eq!(
                        state.target(transition, decided),
                        expected,
                        "{phase:?} --{transition:?}--> (decided: {decided})"
                    );
                }
            }
        }

        let state = MatchState { phase: Playing };
        assert_eq!(
            state.target(Transition::GoalScored(Side::Opponent), false),
            Some(GoalPause)
        );
    }

    #[test]
    fn test_illegal_requests_leave_context_untouched() {
        let transitions = [
            Transition::Begin,
            Transition::GoalScored(Side::Opponent),
            Transition::PauseElapsed,
            Transition::Restart,
        ];
        let mut contexts = vec![SimulationContext::default(), playing()];
        let mut paused = playing();
        apply(&mut paused, Transition::GoalScored(Side::Player), 0.0, &mut Vec::new()).unwrap();
        contexts.push(paused);

        for ctx in contexts {
            for transition in transitions {
                let mut attempt = ctx.clone();
                let mut events = Vec::new();
                let decided = ctx.score.winner(ctx.tuning.win_score).is_some();
                if ctx.match_state.target(transition, decided).is_some() {
                    continue;
                }
                let err = apply(&mut attempt, transition, 99.0, &mut events).unwrap_err();
                assert_eq!(err.transition, transition);
                assert_eq!(attempt.phase(), ctx.phase());
                assert_eq!(attempt.score, ctx.score);
                assert_eq!(attempt.puck, ctx.puck);
                assert!(events.is_empty());
            }
        }
    }
}
