//! Online path simplifier: a two-state rewrite automaton.
//!
//! ```text
//!            m ≠ B: append m
//!           ┌──────────┐
//!           ▼          │
//!        NORMAL ───────┘
//!           │  ▲
//!   m = B:  │  │ reduce(A,B,m) ≠ B: append result
//!   pop A   ▼  │
//!       REDUCING(A) ──┐
//!           ▲         │ reduce(A,B,m) = B: pop next as A
//!           └─────────┘
//! ```
//!
//! Rewrite table (`A B m → result`):
//!
//! | A | m | result |
//! |---|---|--------|
//! | L | L | S |
//! | L | R | B |
//! | L | S | R |
//! | R | L | B |
//! | S | L | R |
//! | S | S | B |
//!
//! Any other window is resolved by [`ReductionPolicy`].

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Move, PathBuffer};
use crate::error::PathError;

/// What to do with a window the reduction table has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReductionPolicy {
    /// Fail with [`PathError::UnhandledReductionCase`], leaving buffer and
    /// window untouched.
    #[default]
    Strict,
    /// Sum the three headings mod 360.  Agrees with every table entry and
    /// gives `RBR=S`, `RBS=L`, `SBR=L`, `ABB=A`.
    HeadingSum,
}

/// Automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimplifierState {
    #[default]
    Normal,
    /// Holding the partial window `(a, Back)`.
    Reducing { a: Move },
}

/// Observable effect of feeding one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Appended verbatim at `index`.
    Committed { index: usize, mv: Move },
    /// A `Back` popped `popped` and opened the window `(popped, Back)`.
    Opened { popped: Move },
    /// The window `(a, Back, m)` collapsed to `result`, committed at `index`.
    Resolved {
        a: Move,
        m: Move,
        result: Move,
        index: usize,
    },
    /// The window `(a, Back, m)` collapsed to `Back`; `popped` is the new `a`.
    Chained { a: Move, m: Move, popped: Move },
}

/// Look up the window `(a, Back, m)`.
pub fn reduce(a: Move, m: Move, policy: ReductionPolicy) -> Result<Move, PathError> {
    use Move::{Back, Left, Right, Straight};

    let tabulated = match (a, m) {
        (Left, Left) => Some(Straight),
        (Left, Right) => Some(Back),
        (Left, Straight) => Some(Right),
        (Right, Left) => Some(Back),
        (Straight, Left) => Some(Right),
        (Straight, Straight) => Some(Back),
        _ => None,
    };

    match (tabulated, policy) {
        (Some(result), _) => Ok(result),
        (None, ReductionPolicy::Strict) => Err(PathError::UnhandledReductionCase { a, m }),
        (None, ReductionPolicy::HeadingSum) => Ok(Move::from_heading_deg(
            a.heading_deg() + Back.heading_deg() + m.heading_deg(),
        )),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    state: SimplifierState,
    policy: ReductionPolicy,
}

impl Simplifier {
    pub fn new(policy: ReductionPolicy) -> Self {
        Self {
            state: SimplifierState::Normal,
            policy,
        }
    }

    pub fn state(&self) -> SimplifierState {
        self.state
    }

    pub fn policy(&self) -> ReductionPolicy {
        self.policy
    }

    pub fn is_reducing(&self) -> bool {
        matches!(self.state, SimplifierState::Reducing { .. })
    }

    /// Feed one emitted move.  On error neither `buf` nor the window changes.
    pub fn feed<const N: usize>(
        &mut self,
        m: Move,
        buf: &mut PathBuffer<N>,
    ) -> Result<Step, PathError> {
        match self.state {
            SimplifierState::Normal if m == Move::Back => {
                let popped = buf.pop()?;
                self.state = SimplifierState::Reducing { a: popped };
                debug!("simplifier: opened window {}B", popped.code());
                Ok(Step::Opened { popped })
            }
            SimplifierState::Normal => {
                buf.push(m)?;
                Ok(Step::Committed {
                    index: buf.len() - 1,
                    mv: m,
                })
            }
            SimplifierState::Reducing { a } => {
                let result = reduce(a, m, self.policy)?;
                debug!(
                    "simplifier: {}B{} -> {}",
                    a.code(),
                    m.code(),
                    result.code()
                );
                if result == Move::Back {
                    let popped = buf.pop()?;
                    self.state = SimplifierState::Reducing { a: popped };
                    Ok(Step::Chained { a, m, popped })
                } else {
                    // `a` was popped on entry, so there is room for `result`.
                    buf.push(result)?;
                    self.state = SimplifierState::Normal;
                    Ok(Step::Resolved {
                        a,
                        m,
                        result,
                        index: buf.len() - 1,
                    })
                }
            }
        }
    }
}
