//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event as one
//! tagged line to the ESP-IDF logger (UART / USB-CDC in production).
//! Moves are rendered by their one-character code.  A character LCD
//! adapter would implement the same trait.

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(phase) => {
                info!("PHASE | started in {:?}", phase);
            }
            AppEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            AppEvent::MoveEmitted(mv) => {
                info!("MOVE  | {}", mv.code());
            }
            AppEvent::MoveCommitted { index, mv } => {
                info!("PATH  | [{}] = {}", index, mv.code());
            }
            AppEvent::Backtracked { index, popped } => {
                info!("PATH  | [{}] {} popped", index, popped.code());
            }
            AppEvent::GoalReached { path_total } => {
                info!("GOAL  | path_total={}", path_total);
            }
            AppEvent::ReplayStarted { path_total } => {
                info!("REPLAY| start over {} junctions", path_total);
            }
            AppEvent::ReplayTurn { index, mv } => {
                info!("REPLAY| [{}] {}", index, mv.code());
            }
            AppEvent::ReplayComplete { junctions } => {
                info!("REPLAY| goal after {} junctions", junctions);
            }
            AppEvent::Fault(e) => {
                error!("FAULT | {}", e);
            }
        }
    }
}
