//! Standard opening layout: black on rows 0-1, white on rows 6-7.

use std::sync::Arc;

use crate::board::board::Board;
use crate::board::piece::{Color, Piece, PieceType};
use crate::board::square::{Square, BOARD_WIDTH};
use crate::board::zobrist::ZobristHasher;

const BACK_RANK: [PieceType; BOARD_WIDTH] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

pub fn standard_placements() -> Vec<(Square, Piece)> {
    let mut placements = Vec::with_capacity(4 * BOARD_WIDTH);
    for (color, back_row, pawn_row) in [(Color::Black, 0u8, 1u8), (Color::White, 7, 6)] {
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            placements.push((Square::new(back_row, col), Piece::new(*kind, color)));
            placements.push((Square::new(pawn_row, col), Piece::new(PieceType::Pawn, color)));
        }
    }
    placements
}

pub fn standard_board() -> Board {
    Board::from_placements(standard_placements())
}

pub fn standard_board_with_hasher(hasher: Arc<ZobristHasher>) -> Board {
    Board::from_placements_with_hasher(standard_placements(), hasher)
}
