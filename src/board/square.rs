//! Board coordinates and the square <-> bit index mapping.
//!
//! A square index packs the row into the upper three bits and the column into
//! the lower three bits (`row << 3 | col`), which is the same as
//! `row * 8 + col`. The index doubles as the bit position in every bitboard.

use std::fmt;

use crate::errors::{GameError, GameResult};

/// Size of either board dimension.
pub const BOARD_WIDTH: usize = 8;
/// Total number of squares.
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_WIDTH;
/// Bits used per dimension in a square index (`8 == 1 << 3`).
pub const DIM_BITS: usize = 3;

const DIM_MASK: usize = (1 << DIM_BITS) - 1;

/// Bit position of a square, on `[0, 64)`.
pub type SquareIndex = usize;

/// A `(row, col)` coordinate with both components on `[0, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Panics if either coordinate lies outside `[0, 8)`.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            (row as usize) < BOARD_WIDTH && (col as usize) < BOARD_WIDTH,
            "square coordinates out of range"
        );
        Self { row, col }
    }

    /// Fallible constructor for externally supplied coordinates.
    pub fn try_new(row: i64, col: i64) -> GameResult<Self> {
        if is_valid_dims(row, col) {
            Ok(Self::new(row as u8, col as u8))
        } else {
            Err(GameError::InvalidSquare { row, col })
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn index(self) -> SquareIndex {
        square_to_index(self)
    }

    /// The square displaced by `(d_row, d_col)`, if it is still on the board.
    #[inline]
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i64 + d_row as i64;
        let col = self.col as i64 + d_col as i64;
        if is_valid_dims(row, col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Every square in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).map(index_to_square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// True iff `(row, col)` names a square on the board.
///
/// Takes wide signed integers so that out-of-range or negative values are
/// rejected before any narrowing conversion can wrap them into range.
#[inline]
pub const fn is_valid_dims(row: i64, col: i64) -> bool {
    row >= 0 && col >= 0 && (row as u64) < BOARD_WIDTH as u64 && (col as u64) < BOARD_WIDTH as u64
}

#[inline]
pub const fn square_to_index(square: Square) -> SquareIndex {
    ((square.row as usize) << DIM_BITS) | square.col as usize
}

/// `index` must lie on `[0, 64)`.
#[inline]
pub const fn index_to_square(index: SquareIndex) -> Square {
    assert!(index < BOARD_SIZE, "square index out of range");
    Square {
        row: (index >> DIM_BITS) as u8,
        col: (index & DIM_MASK) as u8,
    }
}
