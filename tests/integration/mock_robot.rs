//! Mock robot for integration tests.
//!
//! Plays back a script of sensor frames, one per read.  When the script
//! is empty every read returns the `rest` frame (a centred line unless a
//! test says otherwise).  Rotations get their own scripts: each spin
//! command pushes the next queued pivot script to the front of the frame
//! queue, so a test describes what the robot sees while it turns without
//! counting the reads that come before.
//!
//! Time only moves inside `delay_ms`, and every motor command is kept.

use std::collections::VecDeque;

use mazebot::app::events::AppEvent;
use mazebot::app::ports::{ClockPort, EventSink, MotorPort, SensorPort};
use mazebot::control::MotorCommand;
use mazebot::sensors::SensorVector;

// ── MockRobot ─────────────────────────────────────────────────

pub struct MockRobot {
    frames: VecDeque<SensorVector>,
    pivots: VecDeque<Vec<SensorVector>>,
    rest: SensorVector,
    pub drives: Vec<MotorCommand>,
    pub reads: usize,
    pub now: u64,
}

#[allow(dead_code)]
impl MockRobot {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            pivots: VecDeque::new(),
            rest: SensorVector::CENTRED,
            drives: Vec::new(),
            reads: 0,
            now: 0,
        }
    }

    /// Frame returned once the script runs dry.
    pub fn rest(&mut self, bits: u8) {
        self.rest = SensorVector::from_bits(bits);
    }

    pub fn script(&mut self, bits: &[u8]) {
        self.frames
            .extend(bits.iter().map(|&b| SensorVector::from_bits(b)));
    }

    pub fn hold(&mut self, bits: u8, reads: usize) {
        self.frames
            .extend(std::iter::repeat(SensorVector::from_bits(bits)).take(reads));
    }

    /// Frames seen during the next rotation.
    pub fn on_spin(&mut self, bits: &[u8]) {
        self.pivots
            .push_back(bits.iter().map(|&b| SensorVector::from_bits(b)).collect());
    }

    pub fn script_is_empty(&self) -> bool {
        self.frames.is_empty() && self.pivots.is_empty()
    }

    /// In-place rotations commanded so far, in order.
    pub fn spins(&self) -> Vec<MotorCommand> {
        self.drives.iter().copied().filter(is_spin).collect()
    }

    pub fn last_drive(&self) -> Option<MotorCommand> {
        self.drives.last().copied()
    }

    pub fn clear_history(&mut self) {
        self.drives.clear();
        self.reads = 0;
    }
}

impl Default for MockRobot {
    fn default() -> Self {
        Self::new()
    }
}

fn is_spin(cmd: &MotorCommand) -> bool {
    (cmd.left > 0 && cmd.right < 0) || (cmd.left < 0 && cmd.right > 0)
}

impl SensorPort for MockRobot {
    fn read_sensors(&mut self) -> SensorVector {
        self.reads += 1;
        self.frames.pop_front().unwrap_or(self.rest)
    }
}

impl MotorPort for MockRobot {
    fn drive(&mut self, cmd: MotorCommand) {
        if is_spin(&cmd) {
            if let Some(pivot) = self.pivots.pop_front() {
                for v in pivot.into_iter().rev() {
                    self.frames.push_front(v);
                }
            }
        }
        self.drives.push(cmd);
    }
}

impl ClockPort for MockRobot {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Junction scripts ──────────────────────────────────────────
//
// One exploring tick reads the sensors once for steering, then once per
// decision rule plus whatever the maneuvers poll.

/// Right-only branch with no line ahead: 1 steering read, the rule-1
/// trigger, 200 probe polls, the post-probe re-read and the Middle check.
pub fn script_right_turn(robot: &mut MockRobot) {
    robot.hold(0b00001, 1 + 1 + 200 + 1 + 1);
    robot.on_spin(&[0b00001, 0b00010]);
}

/// Right branch with the line continuing: the same reads as a right
/// turn, but Middle stays lit so no pivot is made.
pub fn script_straight(robot: &mut MockRobot) {
    robot.hold(0b00111, 1 + 1 + 200 + 1 + 1);
}

/// Left branch: steering read, rule-1 read, rule-2 trigger.
pub fn script_left_turn(robot: &mut MockRobot) {
    robot.script(&[0b11100, 0b11100, 0b11100]);
    robot.on_spin(&[0b10000, 0b01000]);
}

/// Line ends: steering read plus rules 1-3 all see nothing.
pub fn script_dead_end(robot: &mut MockRobot) {
    robot.hold(0b00000, 4);
    robot.on_spin(&[0b00001, 0b00010]);
}
