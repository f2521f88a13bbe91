//! Mazebot Firmware: Main Entry Point
//!
//! Hexagonal architecture around a single blocking scan loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter         LogEventSink   NvsAdapter  Esp32Clock │
//! │  (Sensor+Motor+Clock)    (EventSink)    (Config)    (Clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FSM · Decision · Simplifier · Replay                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Buttons (ISR + gesture FSM) ──▶ event queue ──▶ AppCommand    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::gpio::{IOPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{info, warn};

use mazebot::adapters::hardware::HardwareAdapter;
use mazebot::adapters::log_sink::LogEventSink;
use mazebot::adapters::nvs::NvsAdapter;
use mazebot::adapters::time::Esp32Clock;
use mazebot::app::commands::AppCommand;
use mazebot::app::ports::ClockPort;
use mazebot::app::service::AppService;
use mazebot::config::RobotConfig;
use mazebot::drivers::button::{ButtonDriver, ButtonId};
use mazebot::drivers::motor::{DifferentialDrive, MotorChannel};
use mazebot::events::{self, push_event};
use mazebot::pins;
use mazebot::sensors::line_array::LineSensorArray;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Mazebot v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Buttons and their ISRs ─────────────────────────────
    mazebot::drivers::hw_init::init_peripherals()?;
    if let Err(e) = mazebot::drivers::hw_init::init_isr_service() {
        log::error!("ISR service init failed: {}; buttons are dead", e);
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new() {
        Ok(nvs) => nvs.load_or_default(),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            RobotConfig::default()
        }
    };
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config: not printable ({})", e),
    }

    // ── 4. Construct drivers ──────────────────────────────────
    let p = Peripherals::take()?;

    let sensors = LineSensorArray::new(
        [
            PinDriver::input(p.pins.gpio4.downgrade())?,
            PinDriver::input(p.pins.gpio5.downgrade())?,
            PinDriver::input(p.pins.gpio6.downgrade())?,
            PinDriver::input(p.pins.gpio7.downgrade())?,
            PinDriver::input(p.pins.gpio15.downgrade())?,
        ],
        config.line_active_high,
    );
    info!(
        "Line sensors on GPIO {} {} {} {} {}",
        pins::SENSOR_LEFT_GPIO,
        pins::SENSOR_MID_LEFT_GPIO,
        pins::SENSOR_MIDDLE_GPIO,
        pins::SENSOR_MID_RIGHT_GPIO,
        pins::SENSOR_RIGHT_GPIO
    );

    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::MOTOR_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits10),
    )?;
    let left = MotorChannel::new(
        LedcDriver::new(p.ledc.channel0, &timer, p.pins.gpio16)?,
        PinDriver::output(p.pins.gpio17)?,
        PinDriver::output(p.pins.gpio18)?,
    );
    let right = MotorChannel::new(
        LedcDriver::new(p.ledc.channel1, &timer, p.pins.gpio9)?,
        PinDriver::output(p.pins.gpio10)?,
        PinDriver::output(p.pins.gpio11)?,
    );

    let mut hw = HardwareAdapter::new(
        sensors,
        DifferentialDrive::new(left, right),
        Esp32Clock::new(),
        config.max_duty,
    );
    let mut log_sink = LogEventSink::new();
    let mut buttons = [
        ButtonDriver::new(ButtonId::Maze),
        ButtonDriver::new(ButtonId::Line),
    ];

    // ── 5. Construct app service ──────────────────────────────
    let scan_interval_ms = config.scan_interval_ms;
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. SW1: explore / replay, SW2: line follow, hold SW1: reset.");

    // ── 6. Scan loop ──────────────────────────────────────────
    loop {
        // Button gesture detection feeds the event queue.
        let now_ms = hw.now_ms() as u32;
        for button in &mut buttons {
            if let Some(event) = button.tick(now_ms) {
                if !push_event(event) {
                    warn!("Event queue full, {:?} dropped", event);
                }
            }
        }

        // Operator commands first, so a reset wins over the next tick.
        events::drain_events(|event| match AppCommand::from_event(event, app.phase()) {
            Some(cmd) => {
                app.handle_command(cmd, &mut hw, &mut log_sink);
            }
            None => info!("{:?} ignored in {:?}", event, app.phase()),
        });

        app.tick(&mut hw, &mut log_sink);
        hw.delay_ms(scan_interval_ms);
    }
}
