//! GPIO / peripheral pin assignments for the maze robot main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  `main` must hand the matching
//! `peripherals.pins.gpioN` objects to the drivers that take typed pins.

// ---------------------------------------------------------------------------
// Line sensor array (five digital IR reflectance sensors, left to right)
// ---------------------------------------------------------------------------

pub const SENSOR_LEFT_GPIO: i32 = 4;
pub const SENSOR_MID_LEFT_GPIO: i32 = 5;
pub const SENSOR_MIDDLE_GPIO: i32 = 6;
pub const SENSOR_MID_RIGHT_GPIO: i32 = 7;
pub const SENSOR_RIGHT_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Differential drive (dual H-bridge, one PWM + two direction pins per side)
// ---------------------------------------------------------------------------

/// LEDC PWM output for the left wheel.
pub const MOTOR_LEFT_PWM_GPIO: i32 = 16;
/// Left bridge input A: HIGH with B LOW = forward.
pub const MOTOR_LEFT_A_GPIO: i32 = 17;
pub const MOTOR_LEFT_B_GPIO: i32 = 18;

/// LEDC PWM output for the right wheel.
pub const MOTOR_RIGHT_PWM_GPIO: i32 = 9;
pub const MOTOR_RIGHT_A_GPIO: i32 = 10;
pub const MOTOR_RIGHT_B_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  10-bit gives 0 – 1023 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 10;
/// LEDC base frequency for both drive motors (20 kHz, above audible range).
pub const MOTOR_PWM_FREQ_HZ: u32 = 20_000;

// ---------------------------------------------------------------------------
// Operator buttons (active-low with external pull-up)
// ---------------------------------------------------------------------------

/// SW1: maze explore / replay; long press resets.
pub const MAZE_BUTTON_GPIO: i32 = 1;
/// SW2: plain line-follow mode.
pub const LINE_BUTTON_GPIO: i32 = 2;
