//! Inbound commands to the application service.
//!
//! These represent actions requested by the operator (the two buttons on
//! the chassis, or a test harness) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use crate::events::Event;
use crate::fsm::RunPhase;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Begin a fresh exploration run (Idle only).
    StartExploration,

    /// Enter plain line-follow mode (Idle only).
    StartLineFollow,

    /// Start, or restart, a replay of the frozen path (Replaying only).
    StartReplay,

    /// Stop, forget the path, and return to Idle from any phase.
    Reset,
}

impl AppCommand {
    /// Translate a button event into a command for the current phase.
    ///
    /// | event         | Idle              | Replaying     | other  |
    /// |---------------|-------------------|---------------|--------|
    /// | `MazeButton`  | `StartExploration`| `StartReplay` | –      |
    /// | `LineButton`  | `StartLineFollow` | –             | –      |
    /// | `ResetButton` | `Reset`           | `Reset`       | `Reset`|
    pub fn from_event(event: Event, phase: RunPhase) -> Option<Self> {
        match (event, phase) {
            (Event::MazeButton, RunPhase::Idle) => Some(Self::StartExploration),
            (Event::MazeButton, RunPhase::Replaying) => Some(Self::StartReplay),
            (Event::LineButton, RunPhase::Idle) => Some(Self::StartLineFollow),
            (Event::ResetButton, _) => Some(Self::Reset),
            _ => None,
        }
    }
}
