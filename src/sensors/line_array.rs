//! Five-channel digital line sensor driver.
//!
//! Each channel is a comparator output wired to a GPIO input.  Boards
//! differ in polarity: some pull the pin high over the
//! line, others pull it low.  `active_high` normalises both to
//! "`true` = line seen".
//!
//! Generic over [`embedded_hal::digital::InputPin`] so the same driver
//! runs on `esp_idf_hal::gpio::PinDriver` and on host mocks.

use embedded_hal::digital::InputPin;

use super::{Sensor, SensorVector};
use crate::error::SensorError;

pub struct LineSensorArray<P> {
    /// Indexed left to right, matching [`Sensor::ALL`].
    pins: [P; 5],
    active_high: bool,
}

impl<P: InputPin> LineSensorArray<P> {
    pub fn new(pins: [P; 5], active_high: bool) -> Self {
        Self { pins, active_high }
    }

    /// Sample every channel once.  Fails on the first pin that errors.
    pub fn read(&mut self) -> Result<SensorVector, SensorError> {
        let mut v = SensorVector::NONE;
        for (pin, sensor) in self.pins.iter_mut().zip(Sensor::ALL) {
            let high = pin
                .is_high()
                .map_err(|_| SensorError::GpioReadFailed(sensor))?;
            v.set(sensor, high == self.active_high);
        }
        Ok(v)
    }
}
