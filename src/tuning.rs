//! Data-driven game balance
//!
//! Every numeric knob of the simulation lives here so it can be tweaked from
//! the settings file instead of hunting for literals in the physics code.

use serde::{Deserialize, Serialize};

use crate::consts::{GOAL_PAUSE_FRAMES, WIN_SCORE};
use crate::error::{StoreError, TuningError};

/// Physics and match constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Per-frame velocity multiplier applied to the puck (< 1 slows it down)
    pub friction: f32,
    /// Bounciness of mallet hits: fraction of the approach speed returned
    pub restitution: f32,
    /// Fraction of the mallet's own velocity added to the puck on a hit.
    /// Makes deliberate swings feel stronger than a pure elastic bounce.
    pub momentum_transfer: f32,
    /// Puck speeds below this snap to zero so it never creeps forever
    pub rest_epsilon: f32,
    /// How far in front of the puck the opponent tries to stand
    pub opponent_lead: f32,
    /// Lateral sidestep the opponent takes when the puck is behind it
    pub own_goal_dodge: f32,
    /// Frames the table stays frozen after a goal
    pub goal_pause_frames: u32,
    /// Goals needed to win the match
    pub win_score: u32,
    /// Difficulty ramp, see [`Difficulty::from_games_played`]
    pub ramp: DifficultyRamp,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            friction: 0.995,
            restitution: 0.8,
            momentum_transfer: 0.8,
            rest_epsilon: 0.01,
            opponent_lead: 1.5,
            own_goal_dodge: 2.0,
            goal_pause_frames: GOAL_PAUSE_FRAMES,
            win_score: WIN_SCORE,
            ramp: DifficultyRamp::default(),
        }
    }
}

impl PhysicsTuning {
    /// Parse tuning overrides from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::OutOfRange {
                name: "friction",
                value: self.friction,
                min: 0.0,
                max: 1.0,
            });
        }
        for (name, value) in [
            ("restitution", self.restitution),
            ("momentum_transfer", self.momentum_transfer),
            ("rest_epsilon", self.rest_epsilon),
            ("opponent_lead", self.opponent_lead),
            ("own_goal_dodge", self.own_goal_dodge),
            ("ramp.max_speed_per_game", self.ramp.max_speed_per_game),
        ] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { name, value });
            }
        }
        // The ramp never lowers the ceiling, so the first game is the minimum
        if !(self.ramp.base_max_speed > 0.0) {
            return Err(TuningError::NonPositiveMaxSpeed(self.ramp.base_max_speed));
        }
        if self.win_score == 0 {
            return Err(TuningError::ZeroWinScore);
        }
        Ok(())
    }
}

/// Linear difficulty growth over the first few completed matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyRamp {
    pub base_max_speed: f32,
    pub max_speed_per_game: f32,
    pub base_tracking_gain: f32,
    pub tracking_gain_per_game: f32,
    /// Matches after which difficulty stops increasing
    pub games_cap: u32,
}

impl Default for DifficultyRamp {
    fn default() -> Self {
        Self {
            base_max_speed: 0.8,
            max_speed_per_game: 0.04,
            base_tracking_gain: 0.05,
            tracking_gain_per_game: 0.01,
            games_cap: 15,
        }
    }
}

/// Parameters derived from the persisted games-played counter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Puck speed ceiling in board units per frame
    pub max_speed: f32,
    /// Fraction of the distance to its target the opponent closes per frame
    pub tracking_gain: f32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_games_played(0, &DifficultyRamp::default())
    }
}

impl Difficulty {
    pub fn from_games_played(games_played: u32, ramp: &DifficultyRamp) -> Self {
        let games = games_played.min(ramp.games_cap) as f32;
        Self {
            max_speed: ramp.base_max_speed + games * ramp.max_speed_per_game,
            tracking_gain: (ramp.base_tracking_gain + games * ramp.tracking_gain_per_game)
                .clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_game_difficulty() {
        let d = Difficulty::from_games_played(0, &DifficultyRamp::default());
        assert!((d.max_speed - 0.8).abs() < 1e-6);
        assert!((d.tracking_gain - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_caps() {
        let ramp = DifficultyRamp::default();
        let capped = Difficulty::from_games_played(15, &ramp);
        assert_eq!(capped, Difficulty::from_games_played(500, &ramp));
        assert!((capped.max_speed - 1.4).abs() < 1e-5);
        assert!((capped.tracking_gain - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_tuning_partial_json() {
        let tuning = PhysicsTuning::from_json(r#"{ "restitution": 0.5, "win_score": 3 }"#)
            .expect("valid tuning json");
        assert_eq!(tuning.restitution, 0.5);
        assert_eq!(tuning.win_score, 3);
        assert_eq!(tuning.friction, 0.995);
        assert_eq!(tuning.ramp, DifficultyRamp::default());
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(PhysicsTuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_max_speed() {
        let err = PhysicsTuning::from_json(r#"{ "ramp": { "base_max_speed": -0.5 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Tuning(TuningError::NonPositiveMaxSpeed(v)) if v == -0.5
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut tuning = PhysicsTuning::default();
        tuning.friction = 1.2;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfRange { name: "friction", .. })
        ));

        let mut tuning = PhysicsTuning::default();
        tuning.friction = 0.0;
        assert!(tuning.validate().is_err());

        let mut tuning = PhysicsTuning::default();
        tuning.restitution = -0.1;
        assert_eq!(
            tuning.validate(),
            Err(TuningError::Negative {
                name: "restitution",
                value: -0.1
            })
        );

        let mut tuning = PhysicsTuning::default();
        tuning.win_score = 0;
        assert_eq!(tuning.validate(), Err(TuningError::ZeroWinScore));

        let mut tuning = PhysicsTuning::default();
        tuning.ramp.base_max_speed = f32::NAN;
        assert!(tuning.validate().is_err());
    }
}
