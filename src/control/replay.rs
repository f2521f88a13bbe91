//! Replay engine: retrace the maze using the simplified path as a turn
//! oracle.
//!
//! The full decision rules are not re-run.  Each tick only checks:
//!
//! 1. goal pattern → stop, replay complete (whatever the cursor says);
//! 2. `Left || Right` with moves left → execute `path[index]`, advance.
//!
//! | recorded | action                                   |
//! |----------|------------------------------------------|
//! | `Left`   | approach, pivot left                     |
//! | `Right`  | approach, pivot right                    |
//! | `Straight` | crawl across until both outers clear   |
//! | `Back`   | never produced by the simplifier; crossed like `Straight` |

use log::{debug, warn};

use super::maneuver::{Pivot, approach, cross_junction, pivot};
use crate::app::ports::Robot;
use crate::config::RobotConfig;
use crate::error::ManeuverError;
use crate::path::{Move, PathBuffer};

/// Position within the frozen path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayCursor {
    index: usize,
    total: usize,
}

impl ReplayCursor {
    pub fn new(total: usize) -> Self {
        Self { index: 0, total }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Every recorded junction has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.total
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    /// No junction this tick.
    Cruise,
    /// Junction `index` handled with the recorded move.
    Turn { index: usize, mv: Move },
    /// Goal reached after `junctions` recorded junctions.
    Complete { junctions: usize },
}

pub fn step<R: Robot, const N: usize>(
    robot: &mut R,
    cursor: &mut ReplayCursor,
    path: &PathBuffer<N>,
    cfg: &RobotConfig,
) -> Result<ReplayStep, ManeuverError> {
    let v = robot.read_sensors();

    if v.all_active() {
        robot.stop();
        return Ok(ReplayStep::Complete {
            junctions: cursor.index,
        });
    }

    if !v.any_outer() || cursor.is_exhausted() {
        return Ok(ReplayStep::Cruise);
    }
    let Some(mv) = path.get(cursor.index) else {
        return Ok(ReplayStep::Cruise);
    };

    debug!("replay: junction {} -> {}", cursor.index, mv.code());
    match mv {
        Move::Left => {
            approach(robot, cfg);
            pivot(robot, Pivot::Left, cfg)?;
        }
        Move::Right => {
            approach(robot, cfg);
            pivot(robot, Pivot::Right, cfg)?;
        }
        Move::Straight => cross_junction(robot, cfg)?,
        Move::Back => {
            warn!("replay: recorded Back at {}, crossing instead", cursor.index);
            cross_junction(robot, cfg)?;
        }
    }

    let index = cursor.index;
    cursor.index += 1;
    Ok(ReplayStep::Turn { index, mv })
}
