//! Robot configuration parameters
//!
//! All tunable parameters for the maze robot.  Defaults suit the stock
//! two-wheel chassis; values can be overridden via NVS.

use serde::{Deserialize, Serialize};

use crate::path::ReductionPolicy;

/// Maze steering duties (middle three sensors only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringProfile {
    /// Both wheels when the line is centred.
    pub cruise: u8,
    /// Inner wheel when the line sits under Middle plus one neighbour.
    pub soft: u8,
    /// Inner wheel when only a neighbour sees the line.
    pub hard: u8,
}

impl Default for SteeringProfile {
    fn default() -> Self {
        Self {
            cruise: 70,
            soft: 40,
            hard: 30,
        }
    }
}

/// Line-follow steering duties (all five sensors), from gentle to spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowProfile {
    pub cruise: u8,
    pub soft: u8,
    pub medium: u8,
    pub hard: u8,
    pub spin: u8,
}

impl Default for FollowProfile {
    fn default() -> Self {
        Self {
            cruise: 80,
            soft: 40,
            medium: 30,
            hard: 10,
            spin: 0,
        }
    }
}

/// Core robot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    // --- Steering ---
    pub maze_steering: SteeringProfile,
    pub follow_steering: FollowProfile,

    // --- Motors ---
    /// Duty for pivots, the right-probe crawl and junction approach (0-100%)
    pub turn_duty: u8,
    /// Magnitude clamp applied by the motor adapter (0-100%)
    pub max_duty: u8,

    // --- Junction timing ---
    /// Number of polls in the right-probe window
    pub probe_window_ticks: u16,
    /// Delay between probe polls (ms)
    pub probe_tick_ms: u32,
    /// Forward nudge before a pivot (ms)
    pub approach_ms: u32,
    /// Stop-and-settle pause after stops and pivots (ms)
    pub settle_ms: u32,
    /// Pause after a start command before the first tick (ms)
    pub start_delay_ms: u32,

    // --- Blocking waits ---
    /// Delay between sensor polls inside a blocking wait (ms)
    pub wait_poll_ms: u32,
    /// Give up on a blocking wait after this long.  `None` waits forever.
    pub wait_timeout_ms: Option<u32>,

    // --- Main loop ---
    /// Scan tick period (ms)
    pub scan_interval_ms: u32,

    // --- Path ---
    pub reduction_policy: ReductionPolicy,

    // --- Sensors ---
    /// GPIO level that means "line seen"
    pub line_active_high: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            maze_steering: SteeringProfile::default(),
            follow_steering: FollowProfile::default(),

            turn_duty: 30,
            max_duty: 80,

            probe_window_ticks: 200,
            probe_tick_ms: 1,
            approach_ms: 200,
            settle_ms: 200,
            start_delay_ms: 1000,

            wait_poll_ms: 1,
            wait_timeout_ms: None, // spin until seen

            scan_interval_ms: 1,

            reduction_policy: ReductionPolicy::Strict,

            line_active_high: true,
        }
    }
}

impl RobotConfig {
    /// Range-check every field.  Called before persisting and after loading.
    pub fn validate(&self) -> Result<(), &'static str> {
        let s = &self.maze_steering;
        let f = &self.follow_steering;
        let duties = [
            s.cruise, s.soft, s.hard, f.cruise, f.soft, f.medium, f.hard, f.spin,
            self.turn_duty, self.max_duty,
        ];
        if duties.iter().any(|&d| d > 100) {
            return Err("duty above 100%");
        }
        if self.turn_duty == 0 {
            return Err("turn_duty must be non-zero");
        }
        if s.cruise == 0 || f.cruise == 0 {
            return Err("cruise duty must be non-zero");
        }
        if duties.iter().any(|&d| d > self.max_duty) {
            return Err("max_duty below a configured duty");
        }
        if self.probe_window_ticks == 0 {
            return Err("probe_window_ticks must be non-zero");
        }
        if self.wait_timeout_ms == Some(0) {
            return Err("wait_timeout_ms must be non-zero when set");
        }
        Ok(())
    }
}
