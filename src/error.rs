//! Unified error types for the maze robot firmware.
//!
//! `Error` is what the control loop can fault with: path memory and
//! maneuver failures.  All variants are `Copy` so they can be carried
//! through the FSM and into [`AppEvent::Fault`] without allocation.
//!
//! Peripheral failures stay in their own enums ([`SensorError`],
//! [`ActuatorError`]) and are absorbed by the hardware adapter, which
//! logs them and falls back to a safe reading or a stop.
//!
//! [`AppEvent::Fault`]: crate::app::events::AppEvent::Fault

use core::fmt;

use crate::path::Move;
use crate::sensors::Sensor;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Faults the control loop can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The path buffer or its reduction automaton rejected a move.
    Path(PathError),
    /// A blocking maneuver gave up waiting for a sensor transition.
    Maneuver(ManeuverError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(e) => write!(f, "path: {e}"),
            Self::Maneuver(e) => write!(f, "maneuver: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Path errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Append attempted on a full buffer.
    Exhausted { capacity: usize },
    /// Pop attempted on an empty buffer.
    Underflow,
    /// A window `(a, Back, m)` with no entry in the reduction table.
    UnhandledReductionCase { a: Move, m: Move },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { capacity } => write!(f, "path buffer exhausted ({capacity} moves)"),
            Self::Underflow => write!(f, "path buffer underflow"),
            Self::UnhandledReductionCase { a, m } => {
                write!(f, "no reduction for {}B{}", a.code(), m.code())
            }
        }
    }
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

// ---------------------------------------------------------------------------
// Maneuver errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManeuverError {
    /// The awaited sensor never became active within the configured limit.
    /// Only raised when `RobotConfig::wait_timeout_ms` is set.
    Timeout { waiting_for: Sensor, elapsed_ms: u64 },
}

impl fmt::Display for ManeuverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout {
                waiting_for,
                elapsed_ms,
            } => write!(f, "timed out after {elapsed_ms}ms waiting for {waiting_for:?}"),
        }
    }
}

impl From<ManeuverError> for Error {
    fn from(e: ManeuverError) -> Self {
        Self::Maneuver(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// GPIO read returned an error.
    GpioReadFailed(Sensor),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed(s) => write!(f, "GPIO read failed on {s:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// Direction pin write failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
