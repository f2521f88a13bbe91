//! One-shot hardware peripheral initialization.
//!
//! Configures the operator button inputs and the GPIO ISR service using
//! raw ESP-IDF sys calls.  Line sensors and motors go through typed
//! `esp-idf-hal` drivers built in `main`.  Called once from `main()`
//! before the scan loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

use crate::drivers::button::ButtonId;
#[cfg(target_os = "espidf")]
use crate::drivers::button::button_isr_handler;

const BUTTONS: [ButtonId; 2] = [ButtonId::Maze, ButtonId::Line];

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the scan loop; single-threaded.
    unsafe {
        init_button_inputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {} button inputs skipped", BUTTONS.len());
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_button_inputs() -> Result<(), HwInitError> {
    for id in BUTTONS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << id.gpio(),
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: button inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host: buttons idle high (released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn isr_now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    (unsafe { esp_timer_get_time() } / 1_000) as u32
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn maze_button_isr(_arg: *mut core::ffi::c_void) {
    button_isr_handler(ButtonId::Maze, isr_now_ms());
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn line_button_isr(_arg: *mut core::ffi::c_void) {
    button_isr_handler(ButtonId::Line, isr_now_ms());
}

/// Install the per-pin GPIO ISR service and register the button handlers.
/// Call after init_peripherals() and before the scan loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The handlers below are
    // static functions that only store into lock-free atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for id in BUTTONS {
            let handler: unsafe extern "C" fn(*mut core::ffi::c_void) = match id {
                ButtonId::Maze => maze_button_isr,
                ButtonId::Line => line_button_isr,
            };
            gpio_set_intr_type(id.gpio(), gpio_int_type_t_GPIO_INTR_NEGEDGE);
            let ret = gpio_isr_handler_add(id.gpio(), Some(handler), core::ptr::null_mut());
            if ret != ESP_OK {
                return Err(HwInitError::IsrInstallFailed(ret));
            }
            gpio_intr_enable(id.gpio());
        }

        info!("hw_init: ISR service installed (SW1, SW2)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
