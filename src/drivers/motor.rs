//! Differential drive motor driver (dual H-bridge).
//!
//! Each wheel has one PWM input for speed and two direction inputs:
//!
//! | A    | B    | wheel    |
//! |------|------|----------|
//! | HIGH | LOW  | forward  |
//! | LOW  | HIGH | reverse  |
//! | LOW  | LOW  | coast    |
//!
//! Generic over the `embedded-hal` 1.0 PWM and digital traits, so the
//! same driver runs on `LedcDriver`/`PinDriver` and on host mocks.  This
//! is a dumb actuator: clamping to the configured maximum happens in the
//! hardware adapter.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::control::MotorCommand;
use crate::error::ActuatorError;

/// A single driven wheel taking a signed duty in percent.
pub trait Wheel {
    fn set(&mut self, duty: i8) -> Result<(), ActuatorError>;
}

/// One wheel: PWM speed plus an A/B direction pair.
pub struct MotorChannel<PWM, A, B> {
    pwm: PWM,
    a: A,
    b: B,
    duty: i8,
}

impl<PWM: SetDutyCycle, A: OutputPin, B: OutputPin> MotorChannel<PWM, A, B> {
    pub fn new(pwm: PWM, a: A, b: B) -> Self {
        Self { pwm, a, b, duty: 0 }
    }

    /// Last duty successfully applied.
    pub fn duty(&self) -> i8 {
        self.duty
    }
}

impl<PWM: SetDutyCycle, A: OutputPin, B: OutputPin> Wheel for MotorChannel<PWM, A, B> {
    /// Apply a signed duty in percent.  Zero coasts with both direction
    /// inputs low.
    fn set(&mut self, duty: i8) -> Result<(), ActuatorError> {
        let magnitude = duty.unsigned_abs().min(100);

        // Duty is zero whenever the direction pins change.
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;

        let (a, b) = match duty.signum() {
            1 => (true, false),
            -1 => (false, true),
            _ => (false, false),
        };
        self.a
            .set_state(a.into())
            .map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.b
            .set_state(b.into())
            .map_err(|_| ActuatorError::GpioWriteFailed)?;

        if magnitude > 0 {
            self.pwm
                .set_duty_cycle_percent(magnitude)
                .map_err(|_| ActuatorError::PwmWriteFailed)?;
        }
        self.duty = duty;
        Ok(())
    }
}

/// Left and right wheels driven as a pair.
pub struct DifferentialDrive<L, R> {
    left: L,
    right: R,
    last: MotorCommand,
}

impl<L: Wheel, R: Wheel> DifferentialDrive<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self {
            left,
            right,
            last: MotorCommand::STOP,
        }
    }

    /// Apply both wheel duties.  On failure the other wheel is still
    /// written, and the first error is returned.
    pub fn apply(&mut self, cmd: MotorCommand) -> Result<(), ActuatorError> {
        let left = self.left.set(cmd.left);
        let right = self.right.set(cmd.right);
        left.and(right)?;
        self.last = cmd;
        Ok(())
    }

    /// Last command applied without error.
    pub fn last(&self) -> MotorCommand {
        self.last
    }
}
