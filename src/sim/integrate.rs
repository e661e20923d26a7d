//! Puck motion integration
//!
//! One call per Playing frame: friction, speed clamp, rest snap, advance.

use super::state::Puck;
use crate::tuning::PhysicsTuning;

/// Advance the puck by one frame
pub fn integrate_puck(puck: &mut Puck, tuning: &PhysicsTuning, max_speed: f32) {
    puck.vel *= tuning.friction;

    let speed = puck.vel.length();
    if speed > max_speed {
        puck.vel = puck.vel / speed * max_speed;
    } else if speed < tuning.rest_epsilon {
        puck.vel = glam::Vec2::ZERO;
    }

    puck.pos += puck.vel;
}
