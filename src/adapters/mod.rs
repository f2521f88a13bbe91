//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                   |
//! |-------------|--------------|-------------------------------|
//! | `hardware`  | SensorPort   | Line sensor GPIO inputs       |
//! |             | MotorPort    | LEDC PWM + H-bridge GPIO      |
//! |             | ClockPort    | delegates to `time`           |
//! | `log_sink`  | EventSink    | Serial log output             |
//! | `nvs`       | ConfigPort   | NVS / in-memory store         |
//! | `time`      | ClockPort    | ESP32 system timer            |

pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
