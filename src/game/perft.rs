//! Leaf-node counting over the move tree.
//!
//! Walks every line to `depth` plies with make/unmake on a single board, so
//! it doubles as a consistency check of move generation and of the hash
//! restoration done by `unmake_move`.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceType};
use crate::game::chess_move::MoveBuffer;
use crate::game::move_application::{make_move, unmake_move};
use crate::game::move_generation::all_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub king_captures: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.king_captures += rhs.king_captures;
    }
}

/// Counts leaf nodes `depth` plies below `board` with `color` to move.
pub fn perft(board: &Board, color: Color, depth: u8) -> PerftCounts {
    let mut scratch = board.clone();
    let counts = perft_recurse(&mut scratch, color, depth);
    debug_assert_eq!(&scratch, board, "perft left the board modified");
    counts
}

fn perft_recurse(board: &mut Board, color: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut moves = MoveBuffer::new();
    all_moves(board, color, &mut moves);

    let mut total = PerftCounts::default();
    for &mv in moves.iter() {
        let captured = make_move(board, mv);
        if depth == 1 {
            total.nodes += 1;
            if let Some(piece) = captured {
                total.captures += 1;
                if piece.kind == PieceType::King {
                    total.king_captures += 1;
                }
            }
        } else {
            total.merge(perft_recurse(board, color.opposite(), depth - 1));
        }
        unmake_move(board, mv, captured);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::Piece;
    use crate::board::square::Square;
    use crate::game::starting_position::standard_board;

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&standard_board(), Color::Black, 0).nodes, 1);
    }

    #[test]
    fn starting_position_shallow_counts() {
        let board = standard_board();
        assert_eq!(perft(&board, Color::Black, 1).nodes, 26);
        // The two sides do not interact after one ply each.
        assert_eq!(perft(&board, Color::Black, 2).nodes, 26 * 26);
        let after = perft(&board, Color::Black, 3);
        assert!(after.nodes > 26 * 26);
        assert_eq!(after.king_captures, 0);
    }

    #[test]
    fn adjacent_kings_count_captures() {
        let board = Board::from_placements([
            (Square::new(0, 0), Piece::new(PieceType::King, Color::Black)),
            (Square::new(1, 1), Piece::new(PieceType::King, Color::White)),
        ]);
        let counts = perft(&board, Color::Black, 1);
        assert_eq!(counts.nodes, 3);
        assert_eq!(counts.captures, 1);
        assert_eq!(counts.king_captures, 1);
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let board = standard_board();
        let hash = board.zob_hash();
        perft(&board, Color::White, 3);
        assert_eq!(board.zob_hash(), hash);
    }
}
