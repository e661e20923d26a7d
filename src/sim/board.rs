//! Static table geometry
//!
//! The board is centered on the origin. `x` runs across the table, the
//! longitudinal axis is stored in `Vec2::y`. The player defends the +z end
//! and the opponent the -z end.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::BoardError;

/// Which half of the table a mallet or goal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Immutable table dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub length: f32,
    pub goal_width: f32,
    pub puck_radius: f32,
    pub mallet_radius: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            length: BOARD_LENGTH,
            goal_width: GOAL_WIDTH,
            puck_radius: PUCK_RADIUS,
            mallet_radius: MALLET_RADIUS,
        }
    }
}

impl Board {
    pub fn new(
        width: f32,
        length: f32,
        goal_width: f32,
        puck_radius: f32,
        mallet_radius: f32,
    ) -> Result<Self, BoardError> {
        for (name, value) in [
            ("width", width),
            ("length", length),
            ("goal_width", goal_width),
            ("puck_radius", puck_radius),
            ("mallet_radius", mallet_radius),
        ] {
            if !(value > 0.0) {
                return Err(BoardError::NonPositiveDimension { name, value });
            }
        }
        if goal_width >= width {
            return Err(BoardError::GoalWiderThanBoard {
                goal: goal_width,
                width,
            });
        }
        for (dimension, limit) in [("half_length", length / 2.0), ("width", width)] {
            if 2.0 * mallet_radius >= limit {
                return Err(BoardError::MalletTooLarge {
                    radius: mallet_radius,
                    dimension,
                    limit,
                });
            }
        }
        Ok(Self {
            width,
            length,
            goal_width,
            puck_radius,
            mallet_radius,
        })
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_length(&self) -> f32 {
        self.length / 2.0
    }

    #[inline]
    pub fn goal_half_width(&self) -> f32 {
        self.goal_width / 2.0
    }

    /// True when a lateral offset lies inside the goal opening
    #[inline]
    pub fn in_goal_gap(&self, x: f32) -> bool {
        x.abs() < self.goal_half_width()
    }

    /// Clamp a position into the legal area of a mallet on `side`
    pub fn clamp_to_half(&self, side: Side, pos: Vec2) -> Vec2 {
        let r = self.mallet_radius;
        let x = pos.x.clamp(-self.half_width() + r, self.half_width() - r);
        let z = match side {
            Side::Player => pos.y.clamp(r, self.half_length() - r),
            Side::Opponent => pos.y.clamp(-self.half_length() + r, -r),
        };
        Vec2::new(x, z)
    }

    /// Kick-off spot of a mallet
    pub fn mallet_home(&self, side: Side) -> Vec2 {
        match side {
            Side::Player => Vec2::new(0.0, self.length / 4.0),
            Side::Opponent => Vec2::new(0.0, -self.length / 4.0),
        }
    }

    /// Puck spot after a goal by `scorer` (the conceding side receives it),
    /// or the center spot when nobody scored yet
    pub fn puck_spot(&self, scorer: Option<Side>) -> Vec2 {
        match scorer {
            Some(Side::Player) => Vec2::new(0.0, -PUCK_RESPAWN_OFFSET),
            Some(Side::Opponent) => Vec2::new(0.0, PUCK_RESPAWN_OFFSET),
            None => Vec2::ZERO,
        }
    }
}
