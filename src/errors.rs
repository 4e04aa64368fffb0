//! Recoverable errors surfaced to the game orchestration layer.
//!
//! Broken internal contracts (occupancy preconditions, out-of-range squares
//! built in code, buffer overflow) panic instead; they indicate engine bugs
//! rather than bad input. `GameError` covers what a caller can act on:
//! rejected moves, malformed console input, I/O and configuration problems.

use thiserror::Error;

use crate::board::piece::Color;
use crate::game::chess_move::Move;

#[derive(Debug, Error)]
pub enum GameError {
    /// The move is not in the legal move set of the side that tried it.
    #[error("invalid move: {0}")]
    InvalidMove(Move),

    #[error("square out of range: row {row}, col {col}")]
    InvalidSquare { row: i64, col: i64 },

    /// A console line could not be parsed as a move.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("input stream closed")]
    InputClosed,

    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),

    #[error("{color} gave {attempts} invalid moves in a row")]
    TooManyInvalidMoves { color: Color, attempts: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GameResult<T> = Result<T, GameError>;
