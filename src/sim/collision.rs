//! Collision detection and response
//!
//! Walls reflect the puck perfectly. Mallets are treated as infinitely heavy
//! circles: the puck gets pushed out, bounced with restitution and then
//! handed part of the mallet's swing.

use glam::Vec2;

use super::board::Board;
use super::state::Puck;
use crate::tuning::PhysicsTuning;

/// Result of a mallet/puck overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MalletContact {
    /// Whether the circles overlapped
    pub hit: bool,
    /// Unit vector from mallet center toward puck center
    pub normal: Vec2,
    /// Overlap removed by the position correction
    pub penetration: f32,
    /// Whether an impulse was applied (false when already separating)
    pub impulse_applied: bool,
}

impl MalletContact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
            impulse_applied: false,
        }
    }
}

/// Reflect the puck off the side walls and the solid parts of the end walls.
///
/// The end walls have an opening of `goal_width`; a puck inside it is left
/// alone for the goal detector. Returns true if any reflection happened.
pub fn resolve_walls(puck: &mut Puck, board: &Board) -> bool {
    let mut hit = false;
    let max_x = board.half_width() - board.puck_radius;
    let max_z = board.half_length() - board.puck_radius;

    if puck.pos.x > max_x {
        puck.pos.x = max_x;
        puck.vel.x = -puck.vel.x;
        hit = true;
    } else if puck.pos.x < -max_x {
        puck.pos.x = -max_x;
        puck.vel.x = -puck.vel.x;
        hit = true;
    }

    if !board.in_goal_gap(puck.pos.x) {
        if puck.pos.y > max_z {
            puck.pos.y = max_z;
            puck.vel.y = -puck.vel.y;
            hit = true;
        } else if puck.pos.y < -max_z {
            puck.pos.y = -max_z;
            puck.vel.y = -puck.vel.y;
            hit = true;
        }
    }

    hit
}

/// Resolve contact between the puck and one mallet.
///
/// Position correction always happens before the impulse, and no impulse is
/// applied while the bodies already move apart.
pub fn resolve_mallet(
    puck: &mut Puck,
    mallet_pos: Vec2,
    mallet_vel: Vec2,
    board: &Board,
    tuning: &PhysicsTuning,
) -> MalletContact {
    let delta = puck.pos - mallet_pos;
    let min_dist = board.puck_radius + board.mallet_radius;
    let dist_sq = delta.length_squared();

    if dist_sq >= min_dist * min_dist {
        return MalletContact::miss();
    }

    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        // Exactly coincident: no usable normal this frame
        return MalletContact::miss();
    }

    let normal = delta / dist;
    let penetration = min_dist - dist;
    puck.pos += normal * penetration;

    let vel_along_normal = (puck.vel - mallet_vel).dot(normal);
    if vel_along_normal >= 0.0 {
        return MalletContact {
            hit: true,
            normal,
            penetration,
            impulse_applied: false,
        };
    }

    let j = -(1.0 + tuning.restitution) * vel_along_normal;
    puck.vel += normal * j;
    puck.vel += mallet_vel * tuning.momentum_transfer;

    // A retreating mallet must not pull the puck back into itself
    let residual = (puck.vel - mallet_vel).dot(normal);
    if residual < 0.0 {
        puck.vel -= normal * residual;
    }

    MalletContact {
        hit: true,
        normal,
        penetration,
        impulse_applied: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_right_wall_reflection() {
        let board = Board::default();
        let mut puck = Puck {
            pos: Vec2::new(6.7, 3.0),
            vel: Vec2::new(5.0, 0.0),
        };
        assert!(resolve_walls(&mut puck, &board));
        assert_eq!(puck.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(puck.pos, Vec2::new(7.0 - 0.6, 3.0));
    }

    #[test]
    fn test_no_wall_hit_in_open_table() {
        let board = Board::default();
        let mut puck = Puck {
            pos: Vec2::new(1.0, 1.0),
            vel: Vec2::new(0.3, 0.3),
        };
        assert!(!resolve_walls(&mut puck, &board));
    }

    #[test]
    fn test_end_wall_outside_gap_reflects() {
        let board = Board::default();
        let mut puck = Puck {
            pos: Vec2::new(4.0, 11.8),
            vel: Vec2::new(0.0, 0.5),
        };
        assert!(resolve_walls(&mut puck, &board));
        assert_eq!(puck.pos.y, 12.0 - 0.6);
        assert_eq!(puck.vel.y, -0.5);
    }

    #[test]
    fn test_end_wall_inside_gap_passes() {
        let board = Board::default();
        let mut puck = Puck {
            pos: Vec2::new(0.5, -11.8),
            vel: Vec2::new(0.0, -0.5),
        };
        assert!(!resolve_walls(&mut puck, &board));
        assert_eq!(puck.vel.y, -0.5);
    }

    #[test]
    fn test_coincident_mallet_is_skipped() {
        let board = Board::default();
        let tuning = PhysicsTuning::default();
        let mut puck = Puck {
            pos: Vec2::new(1.0, 2.0),
            vel: Vec2::new(0.1, 0.0),
        };
        let before = puck;
        let contact = resolve_mallet(&mut puck, Vec2::new(1.0, 2.0), Vec2::ZERO, &board, &tuning);
        assert!(!contact.hit);
        assert_eq!(puck, before);
    }

    #[test]
    fn test_separating_contact_only_corrects_position() {
        let board = Board::default();
        let tuning = PhysicsTuning::default();
        let mut puck = Puck {
            pos: Vec2::new(0.0, 1.0),
            vel: Vec2::new(0.0, 0.4),
        };
        let contact = resolve_mallet(&mut puck, Vec2::ZERO, Vec2::ZERO, &board, &tuning);
        assert!(contact.hit);
        assert!(!contact.impulse_applied);
        assert!((puck.pos.y - 1.6).abs() < 1e-6);
        assert_eq!(puck.vel, Vec2::new(0.0, 0.4));
    }

    #[test]
    fn test_struck_resting_puck() {
        // Mallet swinging in -z into a resting puck just ahead of it
        let board = Board::default();
        let tuning = PhysicsTuning::default();
        let mut puck = Puck {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        };
        let mallet_pos = Vec2::new(0.0, 1.5);
        let contact = resolve_mallet(&mut puck, mallet_pos, Vec2::new(0.0, -2.0), &board, &tuning);

        assert!(contact.impulse_applied);
        let expected = -((1.0 + 0.8) * 2.0 + 0.8 * 2.0);
        assert!(puck.vel.x.abs() < 1e-6);
        assert!((puck.vel.y - expected).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_wall_reflection_lands_on_boundary(
            x in -20.0f32..20.0,
            vx in -3.0f32..3.0,
            vz in -3.0f32..3.0,
        ) {
            let board = Board::default();
            let mut puck = Puck { pos: Vec2::new(x, 0.0), vel: Vec2::new(vx, vz) };
            let max_x = board.half_width() - board.puck_radius;
            let hit = resolve_walls(&mut puck, &board);

            prop_assert!(puck.pos.x.abs() <= max_x);
            if x.abs() > max_x {
                prop_assert!(hit);
                prop_assert_eq!(puck.pos.x.abs(), max_x);
                prop_assert_eq!(puck.vel.x, -vx);
            } else {
                prop_assert_eq!(puck.vel.x, vx);
            }
            prop_assert_eq!(puck.vel.y, vz);
        }

        #[test]
        fn prop_end_wall_reflection_outside_gap(
            frac in 0.0f32..0.99,
            depth in 0.01f32..3.0,
            left in any::<bool>(),
            far_end in any::<bool>(),
            vx in -3.0f32..3.0,
            vz in -3.0f32..3.0,
        ) {
            let board = Board::default();
            let max_x = board.half_width() - board.puck_radius;
            let max_z = board.half_length() - board.puck_radius;
            let gap = board.goal_half_width();
            let x = (gap + frac * (max_x - gap)) * if left { -1.0 } else { 1.0 };
            let z = (max_z + depth) * if far_end { -1.0 } else { 1.0 };
            let mut puck = Puck { pos: Vec2::new(x, z), vel: Vec2::new(vx, vz) };

            let hit = resolve_walls(&mut puck, &board);

            prop_assert!(hit);
            prop_assert_eq!(puck.pos.y.abs(), max_z);
            prop_assert_eq!(puck.vel.y, -vz);
            prop_assert_eq!(puck.pos.x, x);
            prop_assert_eq!(puck.vel.x, vx);
        }

        #[test]
        fn prop_approaching_contact_separates(
            angle in 0.0f32..std::f32::consts::TAU,
            gap in 0.05f32..1.5,
            pvx in -1.5f32..1.5,
            pvz in -1.5f32..1.5,
            mvx in -1.5f32..1.5,
            mvz in -1.5f32..1.5,
        ) {
            let board = Board::default();
            let tuning = PhysicsTuning::default();
            let dir = Vec2::new(angle.cos(), angle.sin());
            let mallet_pos = Vec2::ZERO;
            let mallet_vel = Vec2::new(mvx, mvz);
            let mut puck = Puck { pos: dir * gap, vel: Vec2::new(pvx, pvz) };

            let approach = (puck.vel - mallet_vel).dot(dir);
            let contact = resolve_mallet(&mut puck, mallet_pos, mallet_vel, &board, &tuning);
            prop_assert!(contact.hit);

            let min_dist = board.puck_radius + board.mallet_radius;
            prop_assert!(((puck.pos - mallet_pos).length() - min_dist).abs() < 1e-4);

            if approach < 0.0 {
                prop_assert!(contact.impulse_applied);
                let after = (puck.vel - mallet_vel).dot(contact.normal);
                prop_assert!(after >= -1e-4, "still approaching: {}", after);
            }
        }
    }
}
