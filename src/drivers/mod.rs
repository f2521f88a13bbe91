//! Actuator drivers, operator buttons, and one-shot hardware initialisation.

pub mod button;
pub mod hw_init;
pub mod motor;
