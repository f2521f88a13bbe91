//! Path recording and online simplification.
//!
//! ```text
//!  Decision engine ──Move──▶ Simplifier ──append/pop──▶ PathBuffer
//!                                                         │
//!                                  Replay engine ◀──read──┘
//! ```
//!
//! Moves are fed one at a time as the robot discovers them.  A `Back`
//! opens a reduction window over the last committed move; the next move
//! closes it through the rewrite table in [`simplifier`].

pub mod buffer;
pub mod simplifier;

pub use buffer::{PATH_CAPACITY, PathBuffer};
pub use simplifier::{ReductionPolicy, Simplifier, SimplifierState, Step};

/// A directional decision taken at a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Straight,
    Right,
    Back,
}

impl Move {
    /// Every move, in display order.
    pub const ALL: [Move; 4] = [Move::Left, Move::Straight, Move::Right, Move::Back];

    /// One-character status code (`L`, `S`, `R`, `B`).
    pub const fn code(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Straight => 'S',
            Self::Right => 'R',
            Self::Back => 'B',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::Left),
            'S' => Some(Self::Straight),
            'R' => Some(Self::Right),
            'B' => Some(Self::Back),
            _ => None,
        }
    }

    /// Clockwise rotation, in degrees, relative to the current heading.
    pub const fn heading_deg(self) -> u16 {
        match self {
            Self::Straight => 0,
            Self::Right => 90,
            Self::Back => 180,
            Self::Left => 270,
        }
    }

    /// Inverse of [`heading_deg`](Self::heading_deg); any angle is taken mod 360.
    pub const fn from_heading_deg(deg: u16) -> Self {
        match deg % 360 {
            0..=44 | 315..=359 => Self::Straight,
            45..=134 => Self::Right,
            135..=224 => Self::Back,
            _ => Self::Left,
        }
    }
}
