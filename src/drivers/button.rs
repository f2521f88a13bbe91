//! ISR-debounced operator buttons with short and long press detection.
//!
//! ## Hardware
//!
//! Two active-low momentary switches (SW1, SW2) with external pull-ups.
//! Each GPIO fires on the falling edge; the ISR records the raw timestamp
//! into a per-button atomic, and [`ButtonDriver::tick`] (called from the
//! main loop every scan tick) runs the debounce + gesture state machine.
//!
//! ## Gestures
//!
//! | Button | Gesture     | Condition          | Event           |
//! |--------|-------------|--------------------|-----------------|
//! | SW1    | Short press | released < 2 s     | `MazeButton`    |
//! | SW2    | Short press | released < 2 s     | `LineButton`    |
//! | SW1    | Long press  | held >= 2 s        | `ResetButton`   |
//! | SW2    | Long press  | held >= 2 s        | none            |

use core::sync::atomic::{AtomicU32, Ordering};

use crate::events::Event;

const DEBOUNCE_MS: u32 = 50;
const LONG_PRESS_MS: u32 = 2000;

/// Raw ISR timestamps (milliseconds since boot, truncated to u32), one
/// per button.  Zero means "never pressed".
static BUTTON_ISR_TIMESTAMPS: [AtomicU32; 2] = [AtomicU32::new(0), AtomicU32::new(0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonId {
    /// SW1
    Maze = 0,
    /// SW2
    Line = 1,
}

impl ButtonId {
    pub const fn gpio(self) -> i32 {
        match self {
            Self::Maze => crate::pins::MAZE_BUTTON_GPIO,
            Self::Line => crate::pins::LINE_BUTTON_GPIO,
        }
    }
}

/// Button gestures after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    ShortPress,
    LongPress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    DebounceWait { since_ms: u32 },
    Pressed { since_ms: u32 },
}

pub struct ButtonDriver {
    id: ButtonId,
    state: GestureState,
    last_isr_ms: u32,
}

impl ButtonDriver {
    pub fn new(id: ButtonId) -> Self {
        Self {
            id,
            state: GestureState::Idle,
            last_isr_ms: 0,
        }
    }

    /// Call from the main loop at each scan tick and translate any
    /// gesture into an operator [`Event`].
    pub fn tick(&mut self, now_ms: u32) -> Option<Event> {
        let isr_ms = BUTTON_ISR_TIMESTAMPS[self.id as usize].load(Ordering::Acquire);
        let pressed = Self::is_pressed_hw(self.id);
        self.poll(now_ms, isr_ms, pressed)
            .and_then(|gesture| Self::event_for(self.id, gesture))
    }

    /// Advance the gesture state machine.  `isr_ms` is the latest edge
    /// timestamp, `pressed` the raw pin level right now.
    pub fn poll(&mut self, now_ms: u32, isr_ms: u32, pressed: bool) -> Option<ButtonEvent> {
        let new_press = isr_ms != self.last_isr_ms && isr_ms != 0;

        match self.state {
            GestureState::Idle => {
                if new_press {
                    self.last_isr_ms = isr_ms;
                    self.state = GestureState::DebounceWait { since_ms: now_ms };
                }
                None
            }

            GestureState::DebounceWait { since_ms } => {
                if now_ms.wrapping_sub(since_ms) >= DEBOUNCE_MS {
                    self.state = if pressed {
                        GestureState::Pressed { since_ms }
                    } else {
                        // Bounce or glitch.
                        GestureState::Idle
                    };
                }
                None
            }

            GestureState::Pressed { since_ms } => {
                if now_ms.wrapping_sub(since_ms) >= LONG_PRESS_MS {
                    self.state = GestureState::Idle;
                    return Some(ButtonEvent::LongPress);
                }
                if !pressed {
                    self.state = GestureState::Idle;
                    return Some(ButtonEvent::ShortPress);
                }
                None
            }
        }
    }

    /// Only the maze button's long press resets.
    pub fn event_for(id: ButtonId, gesture: ButtonEvent) -> Option<Event> {
        match (id, gesture) {
            (ButtonId::Maze, ButtonEvent::LongPress) => Some(Event::ResetButton),
            (ButtonId::Maze, ButtonEvent::ShortPress) => Some(Event::MazeButton),
            (ButtonId::Line, ButtonEvent::ShortPress) => Some(Event::LineButton),
            (ButtonId::Line, ButtonEvent::LongPress) => None,
        }
    }

    #[cfg(target_os = "espidf")]
    fn is_pressed_hw(id: ButtonId) -> bool {
        !crate::drivers::hw_init::gpio_read(id.gpio())
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_pressed_hw(_id: ButtonId) -> bool {
        false
    }
}

/// ISR handler: register this on each button's falling edge.
/// Safe to call from interrupt context (lock-free atomic store).
pub fn button_isr_handler(id: ButtonId, now_ms: u32) {
    BUTTON_ISR_TIMESTAMPS[id as usize].store(now_ms.max(1), Ordering::Release);
}
