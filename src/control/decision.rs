//! Junction decision engine (exploration).
//!
//! Four rules, checked in a fixed order every scan tick.  Each rule takes
//! its own fresh sensor sample: a maneuver performed by an earlier rule
//! moves the chassis, so a later rule may see something entirely
//! different.  The rules are deliberately *not* an `else if` chain.
//!
//! 1. **Right probe** (`Right && !Left`): crawl forward up to
//!    `probe_window_ticks` looking for a left branch.  If none shows up,
//!    stop and look at `Middle`: line ahead means `Straight`, no line
//!    means pivot right and `Right`.
//! 2. **Left** (`Left`): approach, pivot left, `Left`.
//! 3. **Dead end** (nothing seen): stop, pivot right, `Back`.
//! 4. **Goal** (everything seen): stop.  A move decided earlier in the
//!    same tick is discarded.
//!
//! When several rules fire, the last one to decide a move wins.

use log::debug;

use super::maneuver::{Pivot, approach, pivot, probe_left, stop_and_settle};
use crate::app::ports::Robot;
use crate::config::RobotConfig;
use crate::error::ManeuverError;
use crate::path::Move;

/// Result of one pass over the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    /// No rule fired; steering keeps control.
    None,
    /// A move was decided and is ready for the simplifier.
    Move(Move),
    /// Goal box reached.  `discarded` is a move decided earlier in the
    /// same tick, which is never recorded.
    Goal { discarded: Option<Move> },
}

pub fn evaluate<R: Robot>(robot: &mut R, cfg: &RobotConfig) -> Result<Junction, ManeuverError> {
    let mut decided: Option<Move> = None;

    // Rule 1: right branch or a glimpse of one.
    let v = robot.read_sensors();
    if v.right && !v.left {
        if probe_left(robot, cfg) {
            debug!("rule 1: left branch inside probe window");
        } else {
            stop_and_settle(robot, cfg);
            if robot.read_sensors().middle {
                debug!("rule 1: line continues ahead");
                decided = Some(Move::Straight);
            } else {
                pivot(robot, Pivot::Right, cfg)?;
                decided = Some(Move::Right);
            }
        }
    }

    // Rule 2: left branch.
    if robot.read_sensors().left {
        approach(robot, cfg);
        pivot(robot, Pivot::Left, cfg)?;
        decided = Some(Move::Left);
    }

    // Rule 3: dead end.
    if robot.read_sensors().all_inactive() {
        stop_and_settle(robot, cfg);
        pivot(robot, Pivot::Right, cfg)?;
        decided = Some(Move::Back);
    }

    // Rule 4: goal.
    if robot.read_sensors().all_active() {
        robot.stop();
        if let Some(mv) = decided {
            debug!("rule 4: goal reached, dropping {}", mv.code());
        }
        return Ok(Junction::Goal { discarded: decided });
    }

    Ok(decided.map_or(Junction::None, Junction::Move))
}
