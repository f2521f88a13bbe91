//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (line sensors, motors, clock, event sinks, storage)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! and everything under [`control`](crate::control) consume them via
//! generics, so the domain core never touches pin state directly.

use crate::config::RobotConfig;
use crate::control::MotorCommand;
use crate::sensors::SensorVector;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this at every decision point.
pub trait SensorPort {
    /// Sample all five line sensors.  Never cached by the caller: a
    /// maneuver between two reads changes what the robot sees.
    fn read_sensors(&mut self) -> SensorVector;
}

// ───────────────────────────────────────────────────────────────
// Motor port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: differential drive.
pub trait MotorPort {
    /// Apply a signed (left, right) duty.  The adapter clamps magnitudes
    /// to its configured maximum.  Write-only, no readback.
    fn drive(&mut self, cmd: MotorCommand);

    fn stop(&mut self) {
        self.drive(MotorCommand::STOP);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: time source + suspension point)
// ───────────────────────────────────────────────────────────────

/// Monotonic time and blocking delays.
///
/// Every timed window and blocking wait in the controller goes through
/// this port, so tests can substitute a fake clock that advances only
/// when `delay_ms` is called.
pub trait ClockPort {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> u64;

    /// Block the control loop for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// The full capability bundle the controller drives each tick.
pub trait Robot: SensorPort + MotorPort + ClockPort {}

impl<T: SensorPort + MotorPort + ClockPort> Robot for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / status display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, LCD,
/// telemetry link).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists robot configuration.
///
/// Implementations MUST validate before persisting; out-of-range values
/// are rejected with [`ConfigError::ValidationFailed`], never clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ConfigError::NotFound`] on first boot.
    fn load(&self) -> Result<RobotConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &RobotConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
