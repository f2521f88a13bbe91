//! Motion control: steering between junctions, blocking maneuvers, the
//! junction decision rules and the replay oracle.
//!
//! ```text
//!           ┌──────────┐  no trigger   ┌──────────┐
//!  sensors ─┤ steering ├──────────────▶│  drive   │
//!           └────┬─────┘               └──────────┘
//!                │ junction
//!       ┌────────┴─────────┐
//!       ▼                  ▼
//!   decision (explore)   replay (turn oracle)
//!       │                  │
//!       └──── maneuver ────┘   pivots, approach, crossing
//! ```
//!
//! Everything here is generic over [`Robot`](crate::app::ports::Robot),
//! so the same code drives the real chassis and the host mocks.

pub mod decision;
pub mod maneuver;
pub mod replay;
pub mod steering;

#[cfg(test)]
pub(crate) mod testing;

use core::fmt;

/// Signed differential duty in percent.  Sign is direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorCommand {
    pub left: i8,
    pub right: i8,
}

impl MotorCommand {
    pub const STOP: Self = Self::new(0, 0);

    pub const fn new(left: i8, right: i8) -> Self {
        Self { left, right }
    }

    /// Build from unsigned percent duties, saturating at 100.
    pub fn from_duties(left: u8, right: u8) -> Self {
        Self::new(percent(left), percent(right))
    }

    pub fn forward(duty: u8) -> Self {
        Self::from_duties(duty, duty)
    }

    /// Rotate in place, clockwise seen from above.
    pub fn spin_right(duty: u8) -> Self {
        Self::new(percent(duty), -percent(duty))
    }

    /// Rotate in place, counter-clockwise seen from above.
    pub fn spin_left(duty: u8) -> Self {
        Self::new(-percent(duty), percent(duty))
    }

    /// Limit both magnitudes to `max` percent, keeping direction.
    pub fn clamped(self, max: u8) -> Self {
        let max = percent(max);
        Self::new(self.left.clamp(-max, max), self.right.clamp(-max, max))
    }
}

impl fmt::Display for MotorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}

fn percent(duty: u8) -> i8 {
    duty.min(100) as i8
}
