//! Make/unmake pairs used by the search, and validated application for
//! externally supplied moves.

use crate::board::board::Board;
use crate::board::piece::{Color, Piece};
use crate::errors::{GameError, GameResult};
use crate::game::chess_move::Move;
use crate::game::move_generation::is_valid_move;

/// Moves the piece on `mv.from` to `mv.to` and returns the captured piece.
///
/// `mv.from` must be occupied and `mv.to` must not hold a piece of the same
/// color.
pub fn make_move(board: &mut Board, mv: Move) -> Option<Piece> {
    let mover = board.get_piece_color(mv.from);
    assert!(
        !board.square_is_occupied_by_color(mv.to, mover),
        "{mv} captures its own piece"
    );
    let captured = board.piece_at(mv.to);
    board.move_piece_overwrite(mv.from, mv.to);
    captured
}

/// Exact inverse of `make_move`: moves the piece back and restores
/// `replacement` (the value `make_move` returned) on `mv.to`.
pub fn unmake_move(board: &mut Board, mv: Move, replacement: Option<Piece>) {
    board.move_piece(mv.to, mv.from);
    if let Some(piece) = replacement {
        board.set_piece(piece, mv.to);
    }
}

/// Applies `mv` for `color` permanently if it is legal.
pub fn apply_validated_move(board: &mut Board, color: Color, mv: Move) -> GameResult<Option<Piece>> {
    if !is_valid_move(board, color, mv) {
        return Err(GameError::InvalidMove(mv));
    }
    Ok(make_move(board, mv))
}

#[cfg(test)]
mod tests {
    use rand::{prelude::IndexedRandom, rngs::StdRng, SeedableRng};

    use super::*;
    use crate::board::piece::PieceType;
    use crate::board::square::Square;
    use crate::game::chess_move::MoveBuffer;
    use crate::game::move_generation::all_moves;
    use crate::game::starting_position::standard_board;

    #[test]
    fn make_then_unmake_restores_capture() {
        let from = Square::new(3, 3);
        let to = Square::new(3, 6);
        let mut board = Board::from_placements([
            (from, Piece::new(PieceType::Rook, Color::White)),
            (to, Piece::new(PieceType::Pawn, Color::Black)),
        ]);
        let before = board.clone();
        let mv = Move::new(from, to);

        let captured = make_move(&mut board, mv);
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(board.get_piece(to), Piece::new(PieceType::Rook, Color::White));
        assert_ne!(board.zob_hash(), before.zob_hash());

        unmake_move(&mut board, mv, captured);
        assert_eq!(board, before);
    }

    #[test]
    fn quiet_move_returns_no_capture() {
        let from = Square::new(0, 0);
        let mut board = Board::from_placements([(from, Piece::new(PieceType::King, Color::Black))]);
        let before = board.zob_hash();
        let mv = Move::new(from, Square::new(1, 0));
        assert_eq!(make_move(&mut board, mv), None);
        unmake_move(&mut board, mv, None);
        assert_eq!(board.zob_hash(), before);
    }

    #[test]
    #[should_panic(expected = "captures its own piece")]
    fn make_move_rejects_own_capture() {
        let mut board = Board::from_placements([
            (Square::new(0, 0), Piece::new(PieceType::King, Color::Black)),
            (Square::new(0, 1), Piece::new(PieceType::Rook, Color::Black)),
        ]);
        make_move(&mut board, Move::new(Square::new(0, 0), Square::new(0, 1)));
    }

    #[test]
    fn validated_move_reports_offending_move() {
        let mut board = standard_board();
        let illegal = Move::new(Square::new(0, 0), Square::new(4, 0));
        match apply_validated_move(&mut board, Color::Black, illegal) {
            Err(GameError::InvalidMove(mv)) => assert_eq!(mv, illegal),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(board, standard_board());

        let legal = Move::new(Square::new(1, 0), Square::new(2, 0));
        assert_eq!(apply_validated_move(&mut board, Color::Black, legal).unwrap(), None);
        assert!(board.square_is_occupied(Square::new(2, 0)));
    }

    #[test]
    fn random_playout_unwinds_to_the_start() {
        let mut rng = StdRng::seed_from_u64(2021);
        let mut board = standard_board();
        let start = board.clone();
        let mut history = Vec::new();
        let mut color = Color::Black;

        for _ in 0..120 {
            let mut buffer = MoveBuffer::new();
            all_moves(&board, color, &mut buffer);
            let Some(mv) = buffer.as_slice().choose(&mut rng).copied() else {
                break;
            };
            let before = board.zob_hash();
            let captured = make_move(&mut board, mv);
            assert_ne!(board.zob_hash(), before);
            history.push((mv, captured));
            color = color.opposite();
        }

        while let Some((mv, captured)) = history.pop() {
            unmake_move(&mut board, mv, captured);
        }
        assert_eq!(board, start);
    }
}
