//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, draw the path on a
//! character display, and so on.

use crate::error::Error;
use crate::fsm::RunPhase;
use crate::path::Move;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial phase).
    Started(RunPhase),

    /// The FSM moved between phases.
    PhaseChanged { from: RunPhase, to: RunPhase },

    /// The decision engine produced a move, before simplification.
    MoveEmitted(Move),

    /// A move was committed to the path at `index`.
    MoveCommitted { index: usize, mv: Move },

    /// A backtrack popped `popped`, previously committed at `index`.
    Backtracked { index: usize, popped: Move },

    /// Exploration reached the goal; the path is frozen at `path_total`.
    GoalReached { path_total: usize },

    /// A replay run was armed from the start of the frozen path.
    ReplayStarted { path_total: usize },

    /// Replay handled junction `index` with the recorded move.
    ReplayTurn { index: usize, mv: Move },

    /// Replay reached the goal.
    ReplayComplete { junctions: usize },

    /// A tick failed; motors stopped and the FSM was forced to Idle.
    Fault(Error),
}
