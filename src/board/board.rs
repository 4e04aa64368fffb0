//! Bitboard board state.
//!
//! A `Board` keeps one bitboard per piece type and one per color, plus a
//! Zobrist hash that is updated incrementally by every mutator. Invariants:
//! - an occupied square has its bit set in exactly one type bitboard and
//!   exactly one color bitboard;
//! - the union of the color bitboards equals the union of the type bitboards;
//! - `zob_hash` equals the XOR of the keys of every occupied square.
//!
//! Occupancy preconditions of the mutators/accessors are programmer contracts
//! and panic when violated. The full invariant sweep runs after every
//! mutation in debug builds.
//!
//! Public methods take `Square`s and convert each one to an index exactly
//! once; the private `*_index` methods do the actual work so chained calls
//! (e.g. `move_piece` -> remove + set) reuse the index.

use std::sync::Arc;

use crate::board::bitops::{get_bit, pop_highest_bit, set_bit, Bitboard};
use crate::board::piece::{Color, Piece, PieceType};
use crate::board::square::{index_to_square, Square, SquareIndex, BOARD_SIZE};
use crate::board::zobrist::{ZobHash, ZobristHasher, ZOB_INIT};
use crate::utils::fixed_buffer::FixedBuffer;

/// Enough room for every square on the board.
pub type SquareBuffer = FixedBuffer<Square, BOARD_SIZE>;

#[derive(Clone)]
pub struct Board {
    kind_bitboards: [Bitboard; PieceType::COUNT],
    color_bitboards: [Bitboard; Color::COUNT],
    zob_hash: ZobHash,
    hasher: Arc<ZobristHasher>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_hasher(ZobristHasher::shared())
    }
}

impl Board {
    /// An empty board hashed with the shared default key table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hasher(hasher: Arc<ZobristHasher>) -> Self {
        Self {
            kind_bitboards: [0; PieceType::COUNT],
            color_bitboards: [0; Color::COUNT],
            zob_hash: ZOB_INIT,
            hasher,
        }
    }

    /// Builds a board from `(square, piece)` pairs; every square must be
    /// named at most once.
    pub fn from_placements<I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        Self::from_placements_with_hasher(placements, ZobristHasher::shared())
    }

    pub fn from_placements_with_hasher<I>(placements: I, hasher: Arc<ZobristHasher>) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Self::with_hasher(hasher);
        for (square, piece) in placements {
            board.set_piece(piece, square);
        }
        board
    }

    #[inline]
    pub fn hasher(&self) -> &Arc<ZobristHasher> {
        &self.hasher
    }

    #[inline]
    pub fn zob_hash(&self) -> ZobHash {
        self.zob_hash
    }

    /// Every occupied square.
    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.color_bitboards[Color::Black.index()] | self.color_bitboards[Color::White.index()]
    }

    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Bitboard {
        self.color_bitboards[color.index()]
    }

    #[inline]
    pub fn kind_occupancy(&self, kind: PieceType) -> Bitboard {
        self.kind_bitboards[kind.index()]
    }

    #[inline]
    pub fn count_pieces(&self, color: Color) -> usize {
        self.color_occupancy(color).count_ones() as usize
    }

    #[inline]
    pub fn square_is_occupied(&self, square: Square) -> bool {
        self.square_is_occupied_index(square.index())
    }

    #[inline]
    pub fn square_is_occupied_by_color(&self, square: Square, color: Color) -> bool {
        get_bit(self.color_occupancy(color), square.index())
    }

    /// `square` must be empty.
    pub fn set_piece(&mut self, piece: Piece, square: Square) {
        self.set_piece_index(piece, square.index());
        self.debug_check_invariants();
    }

    /// Places `piece` on `square`, evicting any previous occupant.
    pub fn set_piece_overwrite(&mut self, piece: Piece, square: Square) {
        self.set_piece_overwrite_index(piece, square.index());
        self.debug_check_invariants();
    }

    /// `square` must be occupied.
    pub fn get_piece(&self, square: Square) -> Piece {
        self.get_piece_index(square.index())
    }

    /// `square` must be occupied.
    pub fn get_piece_type(&self, square: Square) -> PieceType {
        self.get_piece_type_index(square.index())
    }

    /// `square` must be occupied.
    pub fn get_piece_color(&self, square: Square) -> Color {
        self.get_piece_color_index(square.index())
    }

    /// The occupant of `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let index = square.index();
        if self.square_is_occupied_index(index) {
            Some(self.get_piece_index(index))
        } else {
            None
        }
    }

    /// Removes and returns the occupant of `square`, which must be occupied.
    pub fn remove_piece(&mut self, square: Square) -> Piece {
        let piece = self.remove_piece_index(square.index());
        self.debug_check_invariants();
        piece
    }

    /// `from` must be occupied and `to` empty.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        self.move_piece_index(from.index(), to.index());
        self.debug_check_invariants();
    }

    /// Like `move_piece`, but evicts whatever occupies `to`.
    pub fn move_piece_overwrite(&mut self, from: Square, to: Square) {
        self.move_piece_overwrite_index(from.index(), to.index());
        self.debug_check_invariants();
    }

    /// Appends every occupied square to `buffer`; returns how many were written.
    pub fn occupied_squares(&self, buffer: &mut SquareBuffer) -> usize {
        Self::fill_squares(self.occupancy(), buffer)
    }

    pub fn occupied_squares_by_color(&self, color: Color, buffer: &mut SquareBuffer) -> usize {
        Self::fill_squares(self.color_occupancy(color), buffer)
    }

    pub fn occupied_squares_by_kind(&self, kind: PieceType, buffer: &mut SquareBuffer) -> usize {
        Self::fill_squares(self.kind_occupancy(kind), buffer)
    }

    fn fill_squares(mut bits: Bitboard, buffer: &mut SquareBuffer) -> usize {
        let mut written = 0;
        while bits != 0 {
            buffer.push(index_to_square(pop_highest_bit(&mut bits)));
            written += 1;
        }
        written
    }

    #[inline]
    fn square_is_occupied_index(&self, index: SquareIndex) -> bool {
        get_bit(self.occupancy(), index)
    }

    fn get_piece_type_index(&self, index: SquareIndex) -> PieceType {
        for kind in PieceType::ALL {
            if get_bit(self.kind_bitboards[kind.index()], index) {
                return kind;
            }
        }
        panic!("no piece at {}", index_to_square(index));
    }

    fn get_piece_color_index(&self, index: SquareIndex) -> Color {
        for color in Color::ALL {
            if get_bit(self.color_bitboards[color.index()], index) {
                return color;
            }
        }
        panic!("no piece at {}", index_to_square(index));
    }

    #[inline]
    fn get_piece_index(&self, index: SquareIndex) -> Piece {
        Piece::new(self.get_piece_type_index(index), self.get_piece_color_index(index))
    }

    #[inline]
    fn set_bits(&mut self, piece: Piece, index: SquareIndex) {
        set_bit(&mut self.kind_bitboards[piece.kind.index()], index, true);
        set_bit(&mut self.color_bitboards[piece.color.index()], index, true);
    }

    #[inline]
    fn clear_bits(&mut self, index: SquareIndex) {
        for bitboard in self.kind_bitboards.iter_mut() {
            set_bit(bitboard, index, false);
        }
        for bitboard in self.color_bitboards.iter_mut() {
            set_bit(bitboard, index, false);
        }
    }

    fn set_piece_index(&mut self, piece: Piece, index: SquareIndex) {
        assert!(
            !self.square_is_occupied_index(index),
            "set_piece on occupied square {}",
            index_to_square(index)
        );
        self.set_bits(piece, index);
        self.zob_hash = self.hasher.toggle_piece(self.zob_hash, piece, index);
    }

    fn set_piece_overwrite_index(&mut self, piece: Piece, index: SquareIndex) {
        if self.square_is_occupied_index(index) {
            let old = self.get_piece_index(index);
            self.clear_bits(index);
            self.set_bits(piece, index);
            self.zob_hash = self.hasher.replace_piece(self.zob_hash, old, piece, index);
        } else {
            self.set_piece_index(piece, index);
        }
    }

    fn remove_piece_index(&mut self, index: SquareIndex) -> Piece {
        // Panics if the square is empty.
        let piece = self.get_piece_index(index);
        self.clear_bits(index);
        self.zob_hash = self.hasher.toggle_piece(self.zob_hash, piece, index);
        piece
    }

    fn move_piece_index(&mut self, from: SquareIndex, to: SquareIndex) {
        assert!(
            !self.square_is_occupied_index(to),
            "move_piece onto occupied square {}",
            index_to_square(to)
        );
        let piece = self.remove_piece_index(from);
        self.set_piece_index(piece, to);
    }

    fn move_piece_overwrite_index(&mut self, from: SquareIndex, to: SquareIndex) {
        let piece = self.remove_piece_index(from);
        self.set_piece_overwrite_index(piece, to);
    }

    /// Panics if any board invariant is broken.
    pub fn check_invariants(&self) {
        let by_kind = self.kind_bitboards.iter().fold(0, |acc, bb| acc | bb);
        assert_eq!(by_kind, self.occupancy(), "orphaned bits between type and color bitboards");

        let black = self.color_bitboards[Color::Black.index()];
        let white = self.color_bitboards[Color::White.index()];
        assert_eq!(black & white, 0, "square claimed by both colors");

        for (i, a) in self.kind_bitboards.iter().enumerate() {
            for b in &self.kind_bitboards[i + 1..] {
                assert_eq!(a & b, 0, "square claimed by two piece types");
            }
        }

        assert_eq!(
            self.zob_hash,
            self.hasher.compute_hash(self),
            "incremental hash diverged from recomputed hash"
        );
    }

    #[inline]
    fn debug_check_invariants(&self) {
        #[cfg(debug_assertions)]
        self.check_invariants();
    }
}

/// Two boards are equal when they hold the same pieces and the same hash.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.kind_bitboards == other.kind_bitboards
            && self.color_bitboards == other.color_bitboards
            && self.zob_hash == other.zob_hash
    }
}

impl Eq for Board {}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("kind_bitboards", &self.kind_bitboards)
            .field("color_bitboards", &self.color_bitboards)
            .field("zob_hash", &format_args!("{:#018x}", self.zob_hash))
            .finish()
    }
}
