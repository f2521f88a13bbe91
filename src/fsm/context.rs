//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the "blackboard": configuration, the path memory and
//! its simplifier, the frozen path length, the replay cursor, and an
//! outbox of [`AppEvent`]s that the service drains after each call
//! into the FSM.

use heapless::Deque;
use log::{info, warn};

use crate::app::events::AppEvent;
use crate::config::RobotConfig;
use crate::control::replay::ReplayCursor;
use crate::error::PathError;
use crate::path::{Move, PathBuffer, Simplifier, Step};

/// Events a single tick can queue before the service drains them.
pub const OUTBOX_CAP: usize = 16;

pub struct FsmContext {
    // -- Configuration --
    pub config: RobotConfig,

    // -- Path memory --
    pub path: PathBuffer,
    pub simplifier: Simplifier,
    /// Committed length frozen at the goal.  `None` until the goal is seen.
    pub path_total: Option<usize>,
    /// Moves emitted by the decision engine this run, before reduction.
    pub raw_moves: usize,

    // -- Replay --
    pub cursor: ReplayCursor,
    /// A replay run is in progress (set by a resume signal, cleared at goal).
    pub replay_armed: bool,

    // -- Outbound --
    outbox: Deque<AppEvent, OUTBOX_CAP>,
}

impl FsmContext {
    pub fn new(config: RobotConfig) -> Self {
        let simplifier = Simplifier::new(config.reduction_policy);
        Self {
            config,
            path: PathBuffer::new(),
            simplifier,
            path_total: None,
            raw_moves: 0,
            cursor: ReplayCursor::default(),
            replay_armed: false,
            outbox: Deque::new(),
        }
    }

    /// Queue an event for the service to forward to its sink.
    pub fn publish(&mut self, event: AppEvent) {
        if let Err(dropped) = self.outbox.push_back(event) {
            warn!("event outbox full, dropping {:?}", dropped);
        }
    }

    pub fn take_event(&mut self) -> Option<AppEvent> {
        self.outbox.pop_front()
    }

    /// Feed one emitted move through the simplifier into the path.
    ///
    /// On error the path and the reduction window are exactly as they
    /// were before the call.
    pub fn record(&mut self, mv: Move) -> Result<Step, PathError> {
        self.raw_moves += 1;
        self.publish(AppEvent::MoveEmitted(mv));

        let step = self.simplifier.feed(mv, &mut self.path)?;
        match step {
            Step::Committed { index, mv } => {
                info!("PATH: {} committed at {}", mv.code(), index);
                self.publish(AppEvent::MoveCommitted { index, mv });
            }
            Step::Resolved {
                a,
                m,
                result,
                index,
            } => {
                info!(
                    "PATH: {}B{} reduced to {} at {}",
                    a.code(),
                    m.code(),
                    result.code(),
                    index
                );
                self.publish(AppEvent::MoveCommitted { index, mv: result });
            }
            Step::Opened { popped } | Step::Chained { popped, .. } => {
                self.publish(AppEvent::Backtracked {
                    index: self.path.len(),
                    popped,
                });
            }
        }
        Ok(step)
    }

    /// Forget everything about the current run.
    pub fn clear_run(&mut self) {
        self.path.clear();
        self.simplifier = Simplifier::new(self.config.reduction_policy);
        self.path_total = None;
        self.raw_moves = 0;
        self.cursor = ReplayCursor::default();
        self.replay_armed = false;
    }

    /// Begin a replay from the first recorded junction.
    pub fn arm_replay(&mut self) {
        self.cursor.rewind();
        self.replay_armed = true;
        self.publish(AppEvent::ReplayStarted {
            path_total: self.cursor.total(),
        });
    }
}
