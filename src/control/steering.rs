//! Inter-junction steering lookups.
//!
//! Pure functions from a sensor pattern to a differential duty.  The
//! wheel on the side the line drifted towards slows down, so the chassis
//! turns back over it; the further off-centre, the bigger the gap.
//!
//! Maze table (middle three sensors, `MidLeft Middle MidRight`):
//!
//! | pattern | left   | right  |
//! |---------|--------|--------|
//! | `010`   | cruise | cruise |
//! | `110`   | soft   | cruise |
//! | `011`   | cruise | soft   |
//! | `100`   | hard   | cruise |
//! | `001`   | cruise | hard   |
//!
//! Anything else returns `None` and the previous command stays in force.

use super::MotorCommand;
use crate::config::{FollowProfile, SteeringProfile};
use crate::sensors::SensorVector;

/// Steering used while exploring and replaying the maze.
pub fn maze_steer(v: SensorVector, p: &SteeringProfile) -> Option<MotorCommand> {
    let (l, r) = match (v.mid_left, v.middle, v.mid_right) {
        (false, true, false) => (p.cruise, p.cruise),
        (true, true, false) => (p.soft, p.cruise),
        (false, true, true) => (p.cruise, p.soft),
        (true, false, false) => (p.hard, p.cruise),
        (false, false, true) => (p.cruise, p.hard),
        _ => return None,
    };
    Some(MotorCommand::from_duties(l, r))
}

/// Steering for plain line-follow mode (all five sensors).
pub fn follow_steer(v: SensorVector, p: &FollowProfile) -> Option<MotorCommand> {
    let (l, r) = match v.bits() {
        0b00100 => (p.cruise, p.cruise),
        0b01100 => (p.soft, p.cruise),
        0b00110 => (p.cruise, p.soft),
        0b01000 => (p.medium, p.cruise),
        0b00010 => (p.cruise, p.medium),
        0b11000 => (p.hard, p.cruise),
        0b00011 => (p.cruise, p.hard),
        0b10000 => (p.spin, p.cruise),
        0b00001 => (p.cruise, p.spin),
        _ => return None,
    };
    Some(MotorCommand::from_duties(l, r))
}
