//! Static board evaluation used at search leaves.
//!
//! Scores are always from the perspective of the `color` argument: larger is
//! better for `color`, whichever side is to move.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceType};

pub type BoardScore = i64;

pub trait BoardScorer: Send + Sync {
    fn score(&self, board: &Board, color: Color) -> BoardScore;
}

/// Negative count of the opponent's pieces: more enemies is worse.
pub fn basic_heuristic(board: &Board, color: Color) -> BoardScore {
    -(board.count_pieces(color.opposite()) as BoardScore)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicScorer;

impl BoardScorer for BasicScorer {
    #[inline]
    fn score(&self, board: &Board, color: Color) -> BoardScore {
        basic_heuristic(board, color)
    }
}

/// Own weighted material minus the opponent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceType) -> BoardScore {
        match kind {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20_000,
        }
    }

    fn material(board: &Board, color: Color) -> BoardScore {
        let own = board.color_occupancy(color);
        PieceType::ALL
            .iter()
            .map(|kind| {
                let count = (board.kind_occupancy(*kind) & own).count_ones() as BoardScore;
                count * Self::piece_value(*kind)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, color: Color) -> BoardScore {
        Self::material(board, color) - Self::material(board, color.opposite())
    }
}
