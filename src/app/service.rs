//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the phase FSM and its shared context.  It exposes a
//! clean, hardware-agnostic API.  All I/O flows through port traits
//! injected at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                 │       AppService         │
//!   MotorPort ◀── │  FSM · Path · Replay     │
//!   ClockPort ◀── └─────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::config::RobotConfig;
use crate::control::replay::ReplayCursor;
use crate::error::Error;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, RunPhase};
use crate::path::{PathBuffer, SimplifierState};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, Robot};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService<R: Robot> {
    fsm: Fsm<R>,
    ctx: FsmContext,
    tick_count: u64,
    last_fault: Option<Error>,
}

impl<R: Robot> AppService<R> {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: RobotConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), RunPhase::Idle);
        Self {
            fsm,
            ctx,
            tick_count: 0,
            last_fault: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Idle with the motors stopped.
    pub fn start(&mut self, robot: &mut R, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx, robot);
        sink.emit(&AppEvent::Started(self.fsm.current_phase()));
        info!("AppService started in {:?}", self.fsm.current_phase());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one scan tick of the current phase.
    ///
    /// A failing tick stops the motors, reports the fault and drops the
    /// FSM back to Idle.  The recorded path is left as it was so it can
    /// be inspected; the next exploration clears it.
    pub fn tick(&mut self, robot: &mut R, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev = self.fsm.current_phase();

        if let Err(e) = self.fsm.tick(&mut self.ctx, robot) {
            robot.stop();
            error!("{:?} tick {} failed: {}", prev, self.tick_count, e);
            self.flush(sink);
            sink.emit(&AppEvent::Fault(e));
            self.last_fault = Some(e);
            self.ctx.replay_armed = false;
            self.fsm.force_transition(RunPhase::Idle, &mut self.ctx, robot);
        }

        self.flush(sink);
        self.emit_phase_change(prev, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an operator command.  Returns `false` when the command is
    /// not valid in the current phase and was ignored.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        robot: &mut R,
        sink: &mut impl EventSink,
    ) -> bool {
        let prev = self.fsm.current_phase();

        let accepted = match (cmd, prev) {
            (AppCommand::StartExploration, RunPhase::Idle) => {
                self.last_fault = None;
                self.fsm
                    .force_transition(RunPhase::Exploring, &mut self.ctx, robot);
                true
            }
            (AppCommand::StartLineFollow, RunPhase::Idle) => {
                self.last_fault = None;
                self.fsm
                    .force_transition(RunPhase::LineFollowing, &mut self.ctx, robot);
                true
            }
            (AppCommand::StartReplay, RunPhase::Replaying) if self.ctx.replay_armed => {
                warn!(
                    "StartReplay ignored: run in progress at junction {}",
                    self.ctx.cursor.index()
                );
                false
            }
            (AppCommand::StartReplay, RunPhase::Replaying) => {
                self.ctx.arm_replay();
                info!("Replay run armed over {} junctions", self.ctx.cursor.total());
                true
            }
            (AppCommand::Reset, _) => {
                self.fsm.force_transition(RunPhase::Idle, &mut self.ctx, robot);
                self.ctx.clear_run();
                self.last_fault = None;
                robot.stop();
                info!("Reset from {:?}: path cleared", prev);
                true
            }
            _ => {
                warn!("{:?} ignored in {:?}", cmd, prev);
                false
            }
        };

        self.flush(sink);
        self.emit_phase_change(prev, sink);

        if accepted && matches!(cmd, AppCommand::StartExploration | AppCommand::StartReplay) {
            robot.delay_ms(self.ctx.config.start_delay_ms);
        }
        accepted
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current run phase.
    pub fn phase(&self) -> RunPhase {
        self.fsm.current_phase()
    }

    /// The committed (simplified) path.
    pub fn path(&self) -> &PathBuffer {
        &self.ctx.path
    }

    /// Length frozen at the goal, `None` before the goal is reached.
    pub fn path_total(&self) -> Option<usize> {
        self.ctx.path_total
    }

    pub fn simplifier_state(&self) -> SimplifierState {
        self.ctx.simplifier.state()
    }

    /// Moves emitted by the decision engine this run, before reduction.
    pub fn raw_moves(&self) -> usize {
        self.ctx.raw_moves
    }

    pub fn cursor(&self) -> ReplayCursor {
        self.ctx.cursor
    }

    pub fn is_replay_armed(&self) -> bool {
        self.ctx.replay_armed
    }

    pub fn config(&self) -> &RobotConfig {
        &self.ctx.config
    }

    /// Total scan ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The fault that last sent the robot back to Idle, if any.
    pub fn last_fault(&self) -> Option<Error> {
        self.last_fault
    }

    // ── Internal ──────────────────────────────────────────────

    fn flush(&mut self, sink: &mut impl EventSink) {
        while let Some(event) = self.ctx.take_event() {
            sink.emit(&event);
        }
    }

    fn emit_phase_change(&self, prev: RunPhase, sink: &mut impl EventSink) {
        let now = self.fsm.current_phase();
        if now != prev {
            sink.emit(&AppEvent::PhaseChanged { from: prev, to: now });
        }
    }
}
