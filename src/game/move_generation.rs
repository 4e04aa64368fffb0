//! Per-piece destination enumeration.
//!
//! The ruleset is deliberately simplified: kings and pawns both step one
//! square in any of the eight directions, there is no check, castling,
//! en passant or promotion, and capturing the enemy king is legal. A
//! destination is valid when it is on the board and not held by a piece of
//! the mover's color.
//!
//! Step pieces (king/pawn, knight) read precomputed destination tables;
//! sliders (rook, bishop, queen) walk each ray until they leave the board,
//! hit their own piece, or capture the first enemy piece on the ray.
//!
//! Every generator appends to a caller-owned `MoveBuffer` and returns the
//! number of moves it wrote.

use crate::board::bitops::{pop_lowest_bit, Bitboard};
use crate::board::board::{Board, SquareBuffer};
use crate::board::piece::{Color, PieceType};
use crate::board::square::{index_to_square, Square, BOARD_SIZE, BOARD_WIDTH};
use crate::game::chess_move::{Move, MoveBuffer};

type Delta = (i8, i8);

pub const KING_PAWN_STEPS: [Delta; 8] = [
    (1, 0),
    (0, 1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

pub const KNIGHT_JUMPS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const ROOK_DIRECTIONS: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRECTIONS: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_DIRECTIONS: [Delta; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Reachable squares for a king or pawn on each square.
pub const KING_PAWN_TARGETS: [Bitboard; BOARD_SIZE] = generate_step_targets(&KING_PAWN_STEPS);

/// Reachable squares for a knight on each square.
pub const KNIGHT_TARGETS: [Bitboard; BOARD_SIZE] = generate_step_targets(&KNIGHT_JUMPS);

const fn generate_step_targets(deltas: &[Delta; 8]) -> [Bitboard; BOARD_SIZE] {
    let mut table = [0u64; BOARD_SIZE];
    let mut index = 0usize;

    while index < BOARD_SIZE {
        let row = (index / BOARD_WIDTH) as i32;
        let col = (index % BOARD_WIDTH) as i32;
        let mut targets = 0u64;

        let mut d = 0usize;
        while d < deltas.len() {
            targets |= set_if_valid(row + deltas[d].0 as i32, col + deltas[d].1 as i32);
            d += 1;
        }

        table[index] = targets;
        index += 1;
    }

    table
}

const fn set_if_valid(row: i32, col: i32) -> u64 {
    if row < 0 || row >= BOARD_WIDTH as i32 || col < 0 || col >= BOARD_WIDTH as i32 {
        return 0;
    }
    1u64 << (row as usize * BOARD_WIDTH + col as usize)
}

fn step_moves(
    board: &Board,
    color: Color,
    from: Square,
    targets: Bitboard,
    buffer: &mut MoveBuffer,
) -> usize {
    let mut targets = targets & !board.color_occupancy(color);
    let mut written = 0;
    while targets != 0 {
        let to = index_to_square(pop_lowest_bit(&mut targets));
        buffer.push(Move::new(from, to));
        written += 1;
    }
    written
}

fn sliding_moves(
    board: &Board,
    color: Color,
    from: Square,
    directions: &[Delta],
    buffer: &mut MoveBuffer,
) -> usize {
    let mut written = 0;
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            if board.square_is_occupied(next) {
                if !board.square_is_occupied_by_color(next, color) {
                    buffer.push(Move::new(from, next));
                    written += 1;
                }
                break;
            }
            buffer.push(Move::new(from, next));
            written += 1;
            current = next;
        }
    }
    written
}

pub fn king_pawn_moves(board: &Board, color: Color, from: Square, buffer: &mut MoveBuffer) -> usize {
    step_moves(board, color, from, KING_PAWN_TARGETS[from.index()], buffer)
}

pub fn knight_moves(board: &Board, color: Color, from: Square, buffer: &mut MoveBuffer) -> usize {
    step_moves(board, color, from, KNIGHT_TARGETS[from.index()], buffer)
}

pub fn rook_moves(board: &Board, color: Color, from: Square, buffer: &mut MoveBuffer) -> usize {
    sliding_moves(board, color, from, &ROOK_DIRECTIONS, buffer)
}

pub fn bishop_moves(board: &Board, color: Color, from: Square, buffer: &mut MoveBuffer) -> usize {
    sliding_moves(board, color, from, &BISHOP_DIRECTIONS, buffer)
}

pub fn queen_moves(board: &Board, color: Color, from: Square, buffer: &mut MoveBuffer) -> usize {
    sliding_moves(board, color, from, &QUEEN_DIRECTIONS, buffer)
}

/// Moves of the piece on `square`, which must belong to `color`.
pub fn piece_moves(board: &Board, color: Color, square: Square, buffer: &mut MoveBuffer) -> usize {
    assert!(
        board.square_is_occupied_by_color(square, color),
        "no {color} piece at {square}"
    );
    match board.get_piece_type(square) {
        PieceType::King | PieceType::Pawn => king_pawn_moves(board, color, square, buffer),
        PieceType::Knight => knight_moves(board, color, square, buffer),
        PieceType::Rook => rook_moves(board, color, square, buffer),
        PieceType::Bishop => bishop_moves(board, color, square, buffer),
        PieceType::Queen => queen_moves(board, color, square, buffer),
    }
}

/// Moves of every piece of `color`, concatenated.
pub fn all_moves(board: &Board, color: Color, buffer: &mut MoveBuffer) -> usize {
    let mut squares = SquareBuffer::new();
    board.occupied_squares_by_color(color, &mut squares);
    squares
        .iter()
        .map(|square| piece_moves(board, color, *square, buffer))
        .sum()
}

/// Whether `mv` is among `color`'s generated moves.
pub fn is_valid_move(board: &Board, color: Color, mv: Move) -> bool {
    let mut buffer = MoveBuffer::new();
    all_moves(board, color, &mut buffer);
    buffer.contains(&mv)
}
