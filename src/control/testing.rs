//! Scripted in-crate robot for unit tests.

use std::collections::VecDeque;

use super::MotorCommand;
use crate::app::ports::{ClockPort, MotorPort, SensorPort};
use crate::sensors::SensorVector;

/// Each read pops the next scripted frame; once the script runs dry the
/// last frame keeps being returned.  Time only moves inside `delay_ms`.
pub struct ScriptedRobot {
    frames: VecDeque<SensorVector>,
    current: SensorVector,
    pub drives: Vec<MotorCommand>,
    pub reads: usize,
    pub now: u64,
}

impl ScriptedRobot {
    pub fn new(initial: SensorVector) -> Self {
        Self {
            frames: VecDeque::new(),
            current: initial,
            drives: Vec::new(),
            reads: 0,
            now: 0,
        }
    }

    pub fn script(&mut self, bits: &[u8]) {
        self.frames
            .extend(bits.iter().map(|&b| SensorVector::from_bits(b)));
    }

    pub fn hold(&mut self, bits: u8, reads: usize) {
        self.frames
            .extend(std::iter::repeat_n(SensorVector::from_bits(bits), reads));
    }
}

impl SensorPort for ScriptedRobot {
    fn read_sensors(&mut self) -> SensorVector {
        if let Some(v) = self.frames.pop_front() {
            self.current = v;
        }
        self.reads += 1;
        self.current
    }
}

impl MotorPort for ScriptedRobot {
    fn drive(&mut self, cmd: MotorCommand) {
        self.drives.push(cmd);
    }
}

impl ClockPort for ScriptedRobot {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}
