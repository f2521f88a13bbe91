//! Blocking motion primitives.
//!
//! Every primitive here suspends the control loop until a sensor
//! transition or a timed delay completes.  All suspension goes through
//! [`ClockPort`](crate::app::ports::ClockPort): blocking waits poll the
//! sensors every `wait_poll_ms` and, when `wait_timeout_ms` is set, give
//! up with [`ManeuverError::Timeout`].  With the default `None` they spin
//! until the transition arrives.
//!
//! ```text
//!  pivot right:  spin(+t,-t) ─▶ wait Right ─▶ wait MidRight ─▶ stop ─▶ settle
//!  pivot left:   spin(-t,+t) ─▶ wait Left  ─▶ wait MidLeft  ─▶ stop ─▶ settle
//!  approach:     fwd(t) ─▶ approach_ms ─▶ stop ─▶ settle
//!  crossing:     fwd(t) ─▶ wait !Left && !Right
//! ```

use log::debug;

use super::MotorCommand;
use crate::app::ports::Robot;
use crate::config::RobotConfig;
use crate::error::ManeuverError;
use crate::sensors::{Sensor, SensorVector};

/// Direction of an in-place rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    Left,
    Right,
}

impl Pivot {
    /// Sensor that re-acquires the line edge first.
    pub const fn outer(self) -> Sensor {
        match self {
            Self::Left => Sensor::Left,
            Self::Right => Sensor::Right,
        }
    }

    /// Sensor that signals the line is centred again.
    pub const fn inner(self) -> Sensor {
        match self {
            Self::Left => Sensor::MidLeft,
            Self::Right => Sensor::MidRight,
        }
    }

    pub fn command(self, duty: u8) -> MotorCommand {
        match self {
            Self::Left => MotorCommand::spin_left(duty),
            Self::Right => MotorCommand::spin_right(duty),
        }
    }
}

/// Block until `sensor` reads active.
pub fn wait_until<R: Robot>(
    robot: &mut R,
    sensor: Sensor,
    cfg: &RobotConfig,
) -> Result<(), ManeuverError> {
    wait_for(robot, cfg, |v| (!v.get(sensor)).then_some(sensor))
}

/// Poll until `pending` returns `None`.  While it returns `Some(s)`, `s`
/// is the sensor still being waited on, reported if the wait times out.
fn wait_for<R: Robot>(
    robot: &mut R,
    cfg: &RobotConfig,
    mut pending: impl FnMut(SensorVector) -> Option<Sensor>,
) -> Result<(), ManeuverError> {
    let start = robot.now_ms();
    loop {
        let Some(waiting_for) = pending(robot.read_sensors()) else {
            return Ok(());
        };
        if let Some(limit) = cfg.wait_timeout_ms {
            let elapsed_ms = robot.now_ms().saturating_sub(start);
            if elapsed_ms >= u64::from(limit) {
                return Err(ManeuverError::Timeout {
                    waiting_for,
                    elapsed_ms,
                });
            }
        }
        robot.delay_ms(cfg.wait_poll_ms);
    }
}

pub fn stop_and_settle<R: Robot>(robot: &mut R, cfg: &RobotConfig) {
    robot.stop();
    robot.delay_ms(cfg.settle_ms);
}

/// Short forward nudge so the axle sits over the junction before a pivot.
pub fn approach<R: Robot>(robot: &mut R, cfg: &RobotConfig) {
    robot.drive(MotorCommand::forward(cfg.turn_duty));
    robot.delay_ms(cfg.approach_ms);
    stop_and_settle(robot, cfg);
}

/// Blind in-place rotation: spin until the outer sensor finds the line
/// edge, keep spinning until the inner sensor re-centres, then stop.
pub fn pivot<R: Robot>(
    robot: &mut R,
    dir: Pivot,
    cfg: &RobotConfig,
) -> Result<(), ManeuverError> {
    debug!("maneuver: pivot {:?}", dir);
    robot.drive(dir.command(cfg.turn_duty));
    let spun = wait_until(robot, dir.outer(), cfg).and_then(|()| wait_until(robot, dir.inner(), cfg));
    // Never leave the wheels spinning, even when a wait gave up.
    stop_and_settle(robot, cfg);
    spun
}

/// Drive straight through a junction until both outer sensors clear.
pub fn cross_junction<R: Robot>(robot: &mut R, cfg: &RobotConfig) -> Result<(), ManeuverError> {
    debug!("maneuver: crossing junction");
    robot.drive(MotorCommand::forward(cfg.turn_duty));
    wait_for(robot, cfg, |v| {
        if v.left {
            Some(Sensor::Left)
        } else if v.right {
            Some(Sensor::Right)
        } else {
            None
        }
    })
}

/// Crawl forward for up to `probe_window_ticks` polls looking for a left
/// branch, then report whether Left reads active on a fresh sample.
pub fn probe_left<R: Robot>(robot: &mut R, cfg: &RobotConfig) -> bool {
    robot.drive(MotorCommand::forward(cfg.turn_duty));
    for _ in 0..cfg.probe_window_ticks {
        if robot.read_sensors().left {
            break;
        }
        robot.delay_ms(cfg.probe_tick_ms);
    }
    robot.read_sensors().left
}
