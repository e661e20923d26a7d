//! Host-facing session shell
//!
//! Owns the [`SimulationContext`] together with the progress store. Reads the
//! games-played counter once at startup, writes it back whenever a match ends,
//! and keeps the timing the analytics collaborator asks for.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, ProgressStore};
use crate::sim::{self, Board, GameEvent, SimulationContext, TickInput};
use crate::tuning::PhysicsTuning;

/// Why the host is tearing the session down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Page or app went to the background
    Background,
    /// Page or app is closing
    TabClose,
}

/// One-shot summary for the analytics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionReport {
    /// Seconds since the first match of the session started
    Duration { secs: u64, reason: EndReason },
    /// The player left without ever starting a match
    ExitBeforeGame,
}

pub struct Session<S: ProgressStore> {
    ctx: SimulationContext,
    store: S,
    first_start_ms: Option<f64>,
    report_sent: bool,
}

impl<S: ProgressStore> Session<S> {
    pub fn new(board: Board, tuning: PhysicsTuning, mut store: S) -> Self {
        let games_played = persistence::load_or_default(&mut store);
        Self {
            ctx: SimulationContext::new(board, tuning, games_played),
            store,
            first_start_ms: None,
            report_sent: false,
        }
    }

    /// Read-only view for rendering and UI
    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    /// Direct access for tools and scripted scenarios
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.ctx
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one frame
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let events = sim::tick(&mut self.ctx, input);
        self.observe(&events);
        events
    }

    /// Goal pause timer fired outside the frame loop
    pub fn goal_pause_elapsed(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let events = sim::goal_pause_elapsed(&mut self.ctx, now_ms);
        self.observe(&events);
        events
    }

    /// Host timestamp of the current match start
    pub fn match_started_at_ms(&self) -> Option<f64> {
        self.ctx.started_at_ms
    }

    /// Final duration of the last finished match
    pub fn match_duration_secs(&self) -> Option<u64> {
        self.ctx.match_duration_secs()
    }

    /// Produce the session report, at most once per session
    pub fn end_session(&mut self, reason: EndReason, now_ms: f64) -> Option<SessionReport> {
        if self.report_sent {
            return None;
        }
        let report = match self.first_start_ms {
            Some(start) => SessionReport::Duration {
                secs: ((now_ms - start).max(0.0) / 1000.0).round() as u64,
                reason,
            },
            None if reason == EndReason::TabClose => SessionReport::ExitBeforeGame,
            None => return None,
        };
        self.report_sent = true;
        log::info!("Session report: {:?}", report);
        Some(report)
    }

    fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::MatchStarted { at_ms } if self.first_start_ms.is_none() => {
                    self.first_start_ms = Some(at_ms);
                    self.report_sent = false;
                }
                GameEvent::MatchOver { games_played, .. } => {
                    persistence::save_or_warn(&mut self.store, games_played);
                }
                _ => {}
            }
        }
    }
}
