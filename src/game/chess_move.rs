//! Move value type and the bounded move buffer.

use std::fmt;

use crate::board::square::Square;
use crate::utils::fixed_buffer::FixedBuffer;

/// Upper bound on the moves one side can have in any position.
///
/// Every destination square is reachable from at most eight ray/adjacent
/// sources and eight knight sources, so `64 * 16` can never be exceeded.
pub const MAX_MOVES_PER_PLY: usize = 1024;

pub type MoveBuffer = FixedBuffer<Move, MAX_MOVES_PER_PLY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same squares with `from` and `to` swapped.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
