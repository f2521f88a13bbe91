//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the line sensor array, the differential drive and the clock,
//! exposing them through [`SensorPort`], [`MotorPort`] and [`ClockPort`]
//! (and therefore [`Robot`](crate::app::ports::Robot)).  This is the only
//! module in the system that touches actual hardware.
//!
//! Driver errors never reach the domain: a failed sensor read falls back
//! to the last good sample, a failed motor write is logged and dropped.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::{ClockPort, MotorPort, SensorPort};
use crate::control::MotorCommand;
use crate::drivers::motor::{DifferentialDrive, Wheel};
use crate::sensors::SensorVector;
use crate::sensors::line_array::LineSensorArray;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, L, R, C> {
    sensors: LineSensorArray<P>,
    drive: DifferentialDrive<L, R>,
    clock: C,
    max_duty: u8,
    last_good: SensorVector,
    sensor_faults: u32,
    motor_faults: u32,
}

impl<P, L, R, C> HardwareAdapter<P, L, R, C>
where
    P: InputPin,
    L: Wheel,
    R: Wheel,
    C: ClockPort,
{
    pub fn new(
        sensors: LineSensorArray<P>,
        drive: DifferentialDrive<L, R>,
        clock: C,
        max_duty: u8,
    ) -> Self {
        Self {
            sensors,
            drive,
            clock,
            max_duty,
            last_good: SensorVector::NONE,
            sensor_faults: 0,
            motor_faults: 0,
        }
    }

    /// Sensor reads that failed and were served from the last good sample.
    pub fn sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    /// Motor writes that failed and were dropped.
    pub fn motor_faults(&self) -> u32 {
        self.motor_faults
    }

    /// Last command the drive accepted.
    pub fn last_command(&self) -> MotorCommand {
        self.drive.last()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: InputPin, L: Wheel, R: Wheel, C: ClockPort> SensorPort for HardwareAdapter<P, L, R, C> {
    fn read_sensors(&mut self) -> SensorVector {
        match self.sensors.read() {
            Ok(v) => {
                self.last_good = v;
                v
            }
            Err(e) => {
                self.sensor_faults = self.sensor_faults.wrapping_add(1);
                warn!("sensors: {}, reusing {}", e, self.last_good);
                self.last_good
            }
        }
    }
}

// ── MotorPort implementation ──────────────────────────────────

impl<P: InputPin, L: Wheel, R: Wheel, C: ClockPort> MotorPort for HardwareAdapter<P, L, R, C> {
    fn drive(&mut self, cmd: MotorCommand) {
        let cmd = cmd.clamped(self.max_duty);
        if let Err(e) = self.drive.apply(cmd) {
            self.motor_faults = self.motor_faults.wrapping_add(1);
            warn!("motors: {} while applying {}", e, cmd);
        }
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<P: InputPin, L: Wheel, R: Wheel, C: ClockPort> ClockPort for HardwareAdapter<P, L, R, C> {
    fn now_ms(&mut self) -> u64 {
        self.clock.now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
