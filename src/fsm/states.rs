//! Concrete phase handler functions and table builder.
//!
//! Each phase is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──[maze button]──▶ EXPLORING ──[goal]──▶ REPLAYING ◀─┐
//!   │ ▲                                             │        │
//!   │ │                                     [maze button]: rerun
//!   │ └──────────────[reset / fault]─────────────────┘────────┘
//!   │
//!   └──[line button]──▶ LINE FOLLOWING ──[reset]──▶ IDLE
//! ```
//!
//! Operator commands and faults drive every transition except the goal;
//! those are forced by [`AppService`](crate::app::service::AppService).

use log::{debug, info, warn};

use super::context::FsmContext;
use super::{RunPhase, StateDescriptor};
use crate::app::events::AppEvent;
use crate::app::ports::Robot;
use crate::control::decision::{self, Junction};
use crate::control::replay::{self, ReplayCursor, ReplayStep};
use crate::control::steering::{follow_steer, maze_steer};
use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table.  Called once at startup.
pub fn build_state_table<R: Robot>() -> [StateDescriptor<R>; RunPhase::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: RunPhase::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: Exploring
        StateDescriptor {
            id: RunPhase::Exploring,
            name: "Exploring",
            on_enter: Some(exploring_enter),
            on_exit: Some(halt),
            on_update: exploring_update,
        },
        // Index 2: Replaying
        StateDescriptor {
            id: RunPhase::Replaying,
            name: "Replaying",
            on_enter: Some(replaying_enter),
            on_exit: Some(halt),
            on_update: replaying_update,
        },
        // Index 3: LineFollowing
        StateDescriptor {
            id: RunPhase::LineFollowing,
            name: "LineFollowing",
            on_enter: Some(line_following_enter),
            on_exit: Some(halt),
            on_update: line_following_update,
        },
    ]
}

fn halt<R: Robot>(_ctx: &mut FsmContext, robot: &mut R) {
    robot.stop();
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE: motors off, waiting for the operator
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter<R: Robot>(ctx: &mut FsmContext, robot: &mut R) {
    robot.stop();
    info!(
        "IDLE: waiting for operator (path {} / {} moves)",
        ctx.path.codes(),
        ctx.path.len()
    );
}

fn idle_update<R: Robot>(_ctx: &mut FsmContext, _robot: &mut R) -> Result<Option<RunPhase>> {
    Ok(None)
}

// ═══════════════════════════════════════════════════════════════════════════
//  EXPLORING: steer, decide at junctions, record and simplify
// ═══════════════════════════════════════════════════════════════════════════

fn exploring_enter<R: Robot>(ctx: &mut FsmContext, _robot: &mut R) {
    ctx.clear_run();
    info!(
        "EXPLORING: fresh run, capacity {} moves, {:?} reduction",
        ctx.path.capacity(),
        ctx.simplifier.policy()
    );
}

fn exploring_update<R: Robot>(ctx: &mut FsmContext, robot: &mut R) -> Result<Option<RunPhase>> {
    if let Some(cmd) = maze_steer(robot.read_sensors(), &ctx.config.maze_steering) {
        robot.drive(cmd);
    }

    match decision::evaluate(robot, &ctx.config)? {
        Junction::None => Ok(None),
        Junction::Move(mv) => {
            debug!("EXPLORING: junction -> {}", mv.code());
            ctx.record(mv)?;
            Ok(None)
        }
        Junction::Goal { discarded } => {
            if let Some(mv) = discarded {
                debug!("EXPLORING: {} decided on the goal line, not recorded", mv.code());
            }
            if ctx.simplifier.is_reducing() {
                warn!("EXPLORING: goal reached with a reduction window still open");
            }
            let total = ctx.path.len();
            ctx.path_total = Some(total);
            ctx.publish(AppEvent::GoalReached { path_total: total });
            info!(
                "EXPLORING: goal reached, path {} ({} of {} raw moves)",
                ctx.path.codes(),
                total,
                ctx.raw_moves
            );
            Ok(Some(RunPhase::Replaying))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  REPLAYING: retrace the frozen path on each resume signal
// ═══════════════════════════════════════════════════════════════════════════

fn replaying_enter<R: Robot>(ctx: &mut FsmContext, robot: &mut R) {
    robot.stop();
    let total = ctx.path_total.unwrap_or(ctx.path.len());
    ctx.cursor = ReplayCursor::new(total);
    ctx.replay_armed = false;
    info!("REPLAYING: {} junctions frozen, waiting for start", total);
}

fn replaying_update<R: Robot>(ctx: &mut FsmContext, robot: &mut R) -> Result<Option<RunPhase>> {
    if !ctx.replay_armed {
        return Ok(None);
    }

    if let Some(cmd) = maze_steer(robot.read_sensors(), &ctx.config.maze_steering) {
        robot.drive(cmd);
    }

    match replay::step(robot, &mut ctx.cursor, &ctx.path, &ctx.config)? {
        ReplayStep::Cruise => {}
        ReplayStep::Turn { index, mv } => {
            ctx.publish(AppEvent::ReplayTurn { index, mv });
        }
        ReplayStep::Complete { junctions } => {
            ctx.replay_armed = false;
            ctx.publish(AppEvent::ReplayComplete { junctions });
            info!(
                "REPLAYING: goal reached after {} of {} junctions",
                junctions,
                ctx.cursor.total()
            );
        }
    }
    Ok(None)
}

// ═══════════════════════════════════════════════════════════════════════════
//  LINE FOLLOWING: plain follower, nothing recorded
// ═══════════════════════════════════════════════════════════════════════════

fn line_following_enter<R: Robot>(_ctx: &mut FsmContext, _robot: &mut R) {
    info!("LINE: following");
}

fn line_following_update<R: Robot>(
    ctx: &mut FsmContext,
    robot: &mut R,
) -> Result<Option<RunPhase>> {
    if let Some(cmd) = follow_steer(robot.read_sensors(), &ctx.config.follow_steering) {
        robot.drive(cmd);
    }
    Ok(None)
}
