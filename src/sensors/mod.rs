//! Line sensor subsystem.
//!
//! Five reflective sensors sit in a row across the front of the chassis.
//! The core only ever sees them as a [`SensorVector`], sampled fresh at
//! every decision point; [`line_array::LineSensorArray`] is the GPIO
//! driver that produces it.
//!
//! ```text
//!   Left  MidLeft  Middle  MidRight  Right
//!    ●       ●       ●        ●        ●
//!   bit4   bit3    bit2     bit1     bit0
//! ```

pub mod line_array;

use core::fmt;

/// One position in the sensor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Left,
    MidLeft,
    Middle,
    MidRight,
    Right,
}

impl Sensor {
    /// Left to right.
    pub const ALL: [Sensor; 5] = [
        Sensor::Left,
        Sensor::MidLeft,
        Sensor::Middle,
        Sensor::MidRight,
        Sensor::Right,
    ];

    /// Bit position in [`SensorVector::bits`] (Left is the MSB).
    pub const fn bit(self) -> u8 {
        match self {
            Self::Left => 4,
            Self::MidLeft => 3,
            Self::Middle => 2,
            Self::MidRight => 1,
            Self::Right => 0,
        }
    }
}

/// A single atomic sample of all five sensors.  `true` = line seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorVector {
    pub left: bool,
    pub mid_left: bool,
    pub middle: bool,
    pub mid_right: bool,
    pub right: bool,
}

impl SensorVector {
    pub const NONE: Self = Self::from_bits(0b00000);
    pub const ALL: Self = Self::from_bits(0b11111);
    /// Line centred under the middle sensor only.
    pub const CENTRED: Self = Self::from_bits(0b00100);

    /// Build from a 5-bit pattern written left to right, e.g. `0b00110`.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & 0b10000 != 0,
            mid_left: bits & 0b01000 != 0,
            middle: bits & 0b00100 != 0,
            mid_right: bits & 0b00010 != 0,
            right: bits & 0b00001 != 0,
        }
    }

    pub const fn bits(self) -> u8 {
        (self.left as u8) << 4
            | (self.mid_left as u8) << 3
            | (self.middle as u8) << 2
            | (self.mid_right as u8) << 1
            | self.right as u8
    }

    pub const fn get(self, sensor: Sensor) -> bool {
        match sensor {
            Sensor::Left => self.left,
            Sensor::MidLeft => self.mid_left,
            Sensor::Middle => self.middle,
            Sensor::MidRight => self.mid_right,
            Sensor::Right => self.right,
        }
    }

    pub fn set(&mut self, sensor: Sensor, active: bool) {
        match sensor {
            Sensor::Left => self.left = active,
            Sensor::MidLeft => self.mid_left = active,
            Sensor::Middle => self.middle = active,
            Sensor::MidRight => self.mid_right = active,
            Sensor::Right => self.right = active,
        }
    }

    /// Goal box: every sensor on the line.
    pub const fn all_active(self) -> bool {
        self.bits() == 0b11111
    }

    /// Dead end: the line has vanished.
    pub const fn all_inactive(self) -> bool {
        self.bits() == 0
    }

    /// Either outer sensor sees a branch.
    pub const fn any_outer(self) -> bool {
        self.left || self.right
    }
}

impl fmt::Display for SensorVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05b}", self.bits())
    }
}
