//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] for the controller.
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` for monotonic
//!   time.  Short delays busy-wait in the ROM delay loop (the FreeRTOS
//!   tick is far coarser than the 1 ms polls the maneuvers use); longer
//!   ones yield to the scheduler.  After `IDLE_FEED_MS` of back-to-back
//!   busy-waiting one tick is yielded so the idle task can feed the
//!   task watchdog.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` and
//!   `std::thread::sleep` for host-side runs.

use crate::app::ports::ClockPort;

/// Delays at or above this yield to FreeRTOS instead of busy-waiting.
#[cfg(target_os = "espidf")]
const YIELD_THRESHOLD_MS: u32 = 10;

#[cfg(target_os = "espidf")]
const IDLE_FEED_MS: u32 = 500;

pub struct Esp32Clock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    #[cfg(target_os = "espidf")]
    busy_ms: u32,
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            #[cfg(target_os = "espidf")]
            busy_ms: 0,
        }
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time is a read of the high-resolution timer.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since the adapter was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl ClockPort for Esp32Clock {
    fn now_ms(&mut self) -> u64 {
        self.uptime_ms()
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        use esp_idf_svc::hal::delay::{Ets, FreeRtos};
        if ms >= YIELD_THRESHOLD_MS {
            FreeRtos::delay_ms(ms);
            self.busy_ms = 0;
            return;
        }
        Ets::delay_ms(ms);
        self.busy_ms += ms;
        if self.busy_ms >= IDLE_FEED_MS {
            FreeRtos::delay_ms(1);
            self.busy_ms = 0;
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
