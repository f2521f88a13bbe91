//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                        │
//! │  ┌───────────────┬────────────┬────────────┬─────────────────────┐ │
//! │  │ RunPhase      │ on_enter   │ on_exit    │ on_update           │ │
//! │  ├───────────────┼────────────┼────────────┼─────────────────────┤ │
//! │  │ Idle          │ fn(ctx,hw) │ –          │ fn(ctx,hw)->Result  │ │
//! │  │ Exploring     │ fn(ctx,hw) │ fn(ctx,hw) │ fn(ctx,hw)->Result  │ │
//! │  │ Replaying     │ fn(ctx,hw) │ fn(ctx,hw) │ fn(ctx,hw)->Result  │ │
//! │  │ LineFollowing │ fn(ctx,hw) │ fn(ctx,hw) │ fn(ctx,hw)->Result  │ │
//! │  └───────────────┴────────────┴────────────┴─────────────────────┘ │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Ok(Some(next))`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the current
//! pointer.  An `Err` is handed back to the caller untouched; the FSM
//! stays where it was.  All handlers receive the shared [`FsmContext`]
//! and the robot capability bundle.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

use crate::app::ports::Robot;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Run phases.  Exploration flows one way, Idle → Exploring → Replaying;
/// line-follow is a side branch off Idle.  Only a reset leaves a phase
/// other than Exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunPhase {
    Idle = 0,
    Exploring = 1,
    Replaying = 2,
    LineFollowing = 3,
}

impl RunPhase {
    /// Total number of phases, used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a table index back to `RunPhase`.  Out-of-range indices
    /// assert in debug builds and fall back to `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Exploring,
            2 => Self::Replaying,
            3 => Self::LineFollowing,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each transition.
pub type StateActionFn<R> = fn(&mut FsmContext, &mut R);

/// Signature for the per-tick update handler.
/// Returns `Ok(Some(next))` to trigger a transition, `Ok(None)` to stay.
pub type StateUpdateFn<R> = fn(&mut FsmContext, &mut R) -> Result<Option<RunPhase>>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor<R> {
    pub id: RunPhase,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<R>>,
    pub on_exit: Option<StateActionFn<R>>,
    pub on_update: StateUpdateFn<R>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm<R> {
    /// Fixed-size table indexed by `RunPhase as usize`.
    table: [StateDescriptor<R>; RunPhase::COUNT],
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current phase was entered.
    state_entry_tick: u64,
}

impl<R: Robot> Fsm<R> {
    pub fn new(table: [StateDescriptor<R>; RunPhase::COUNT], initial: RunPhase) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting phase.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext, robot: &mut R) {
        info!("FSM starting in phase: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, robot);
        }
    }

    /// Advance the FSM by one scan tick.
    pub fn tick(&mut self, ctx: &mut FsmContext, robot: &mut R) -> Result<()> {
        self.tick_count += 1;

        if let Some(next) = (self.table[self.current].on_update)(ctx, robot)? {
            self.transition(next, ctx, robot);
        }
        Ok(())
    }

    /// Jump straight to `next` (operator commands, fault recovery).
    /// A no-op when already there.
    pub fn force_transition(&mut self, next: RunPhase, ctx: &mut FsmContext, robot: &mut R) {
        if next as usize != self.current {
            self.transition(next, ctx, robot);
        }
    }

    pub fn current_phase(&self) -> RunPhase {
        RunPhase::from_index(self.current)
    }

    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    fn transition(&mut self, next: RunPhase, ctx: &mut FsmContext, robot: &mut R) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx, robot);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, robot);
        }
    }
}
