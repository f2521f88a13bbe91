//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the run orchestration for the maze robot: the
//! phase FSM, operator command handling, and event fan-out.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
