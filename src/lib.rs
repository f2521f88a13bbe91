//! Mazebot firmware library.
//!
//! A maze-solving line robot: explore a line maze with a left-hand-style
//! junction policy, simplify the recorded route on the fly, then replay
//! the shortest route on demand.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod fsm;
pub mod path;
pub mod pins;
pub mod sensors;

// Hardware-facing modules; the real implementations are guarded by cfg
// attributes inside and fall back to host stubs.
pub mod adapters;
pub mod drivers;
