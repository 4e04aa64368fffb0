//! Plain-text board renderer.
//!
//! Row/column grid with one character per square: upper case for black
//! pieces, lower case for white pieces, `·` for empty squares.

use std::fmt;

use crate::board::board::Board;
use crate::board::square::{Square, BOARD_WIDTH};

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4 5 6 7\n");
    for row in 0..BOARD_WIDTH as u8 {
        out.push(char::from(b'0' + row));
        for col in 0..BOARD_WIDTH as u8 {
            out.push(' ');
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => out.push(piece.symbol()),
                None => out.push('·'),
            }
        }
        out.push('\n');
    }

    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{Color, Piece, PieceType};

    #[test]
    fn renders_pieces_by_color_case() {
        let board = Board::from_placements([
            (Square::new(0, 0), Piece::new(PieceType::King, Color::Black)),
            (Square::new(7, 7), Piece::new(PieceType::King, Color::White)),
        ]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[1], "0 K · · · · · · ·");
        assert_eq!(lines[8], "7 · · · · · · · k");
    }
}
