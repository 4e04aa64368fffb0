//! Player abstraction used by the game orchestration.
//!
//! Human and computer players are selected at runtime behind this single
//! capability: given a board and the color to play, produce a move.

use crate::board::board::Board;
use crate::board::piece::Color;
use crate::errors::GameResult;
use crate::game::chess_move::Move;

pub trait Player {
    fn name(&self) -> &str;

    /// Proposes a move for `color`. The caller validates it before applying.
    fn get_move(&mut self, board: &Board, color: Color) -> GameResult<Move>;
}
