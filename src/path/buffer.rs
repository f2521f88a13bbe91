//! Fixed-capacity move buffer.
//!
//! Stack-allocated via `heapless::Vec`.  Append-only while exploring (apart
//! from the pops the simplifier performs), read-only while replaying.
//! Overflow and underflow are typed errors, never wrap-around.

use heapless::Vec;

use super::Move;
use crate::error::PathError;

/// Capacity of the on-robot path memory.
pub const PATH_CAPACITY: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuffer<const N: usize = PATH_CAPACITY> {
    moves: Vec<Move, N>,
}

impl<const N: usize> PathBuffer<N> {
    pub const fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Build a buffer from a literal sequence (replay tests, manual paths).
    pub fn from_moves(moves: &[Move]) -> Result<Self, PathError> {
        let mut buf = Self::new();
        for &mv in moves {
            buf.push(mv)?;
        }
        Ok(buf)
    }

    pub fn push(&mut self, mv: Move) -> Result<(), PathError> {
        self.moves
            .push(mv)
            .map_err(|_| PathError::Exhausted { capacity: N })
    }

    pub fn pop(&mut self) -> Result<Move, PathError> {
        self.moves.pop().ok_or(PathError::Underflow)
    }

    pub fn get(&self, index: usize) -> Option<Move> {
        self.moves.get(index).copied()
    }

    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    /// The path as its one-character codes, e.g. `"SRL"`.
    pub fn codes(&self) -> heapless::String<N> {
        let mut s = heapless::String::new();
        for mv in self.iter() {
            // Cannot fail: one ASCII byte per move and at most N moves.
            let _ = s.push(mv.code());
        }
        s
    }
}
