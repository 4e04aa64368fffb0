//! Zobrist hashing service.
//!
//! A `ZobristHasher` owns one random 64-bit key per `(square, piece type,
//! piece color)` triple. XOR-ing the keys of every occupied square yields a
//! board fingerprint that can be updated incrementally: including and
//! excluding a piece/square pair are the same operation.
//!
//! The key table is built once per hasher and never regenerated; boards keep
//! an `Arc` to the hasher that produced their hash, so hashes are only
//! comparable between boards sharing a hasher. The process-wide default is
//! built from a fixed seed, which makes hashes reproducible across runs.

use std::sync::{Arc, OnceLock};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::bitops::pop_lowest_bit;
use crate::board::board::Board;
use crate::board::piece::{Color, Piece, PieceType};
use crate::board::square::{SquareIndex, BOARD_SIZE};

/// Datatype of a board's Zobrist hash.
pub type ZobHash = u64;

/// Hash of a board with no included piece/square pairs.
pub const ZOB_INIT: ZobHash = 0;

/// Seed of the shared default key table.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

const PER_TYPE: usize = Color::COUNT;
const PER_SQUARE: usize = PieceType::COUNT * Color::COUNT;
const NUM_KEYS: usize = BOARD_SIZE * PER_SQUARE;

static SHARED: OnceLock<Arc<ZobristHasher>> = OnceLock::new();

pub struct ZobristHasher {
    keys: Box<[ZobHash; NUM_KEYS]>,
    seed: Option<u64>,
}

impl ZobristHasher {
    /// Draws every key from `rng`.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut keys = Box::new([0u64; NUM_KEYS]);
        for key in keys.iter_mut() {
            *key = rng.random();
        }
        Self { keys, seed: None }
    }

    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            seed: Some(seed),
            ..Self::from_rng(&mut rng)
        }
    }

    /// The memoised process-wide hasher.
    pub fn shared() -> Arc<ZobristHasher> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(ZobristHasher::from_seed(DEFAULT_ZOBRIST_SEED))))
    }

    /// Seed the table was built from, if it was seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    fn zob_index(square_index: SquareIndex, piece: Piece) -> usize {
        debug_assert!(square_index < BOARD_SIZE, "square_index: {square_index}");
        square_index * PER_SQUARE + piece.kind.index() * PER_TYPE + piece.color.index()
    }

    #[inline]
    pub fn key(&self, piece: Piece, square_index: SquareIndex) -> ZobHash {
        self.keys[Self::zob_index(square_index, piece)]
    }

    /// Includes or excludes a piece/square pair. Applying it twice is a no-op.
    #[inline]
    pub fn toggle_piece(&self, hash: ZobHash, piece: Piece, square_index: SquareIndex) -> ZobHash {
        hash ^ self.key(piece, square_index)
    }

    /// Excludes `old_piece` and includes `new_piece` on the same square.
    #[inline]
    pub fn replace_piece(
        &self,
        hash: ZobHash,
        old_piece: Piece,
        new_piece: Piece,
        square_index: SquareIndex,
    ) -> ZobHash {
        hash ^ self.key(old_piece, square_index) ^ self.key(new_piece, square_index)
    }

    /// Hash of `board` computed from scratch rather than incrementally.
    pub fn compute_hash(&self, board: &Board) -> ZobHash {
        let mut hash = ZOB_INIT;
        for kind in PieceType::ALL {
            for color in Color::ALL {
                let mut bits = board.kind_occupancy(kind) & board.color_occupancy(color);
                while bits != 0 {
                    let index = pop_lowest_bit(&mut bits);
                    hash = self.toggle_piece(hash, Piece::new(kind, color), index);
                }
            }
        }
        hash
    }
}

impl std::fmt::Debug for ZobristHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZobristHasher")
            .field("seed", &self.seed)
            .field("num_keys", &NUM_KEYS)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let hasher = ZobristHasher::from_seed(7);
        let piece = Piece::new(PieceType::Rook, Color::White);
        let hash = hasher.toggle_piece(ZOB_INIT, piece, 12);
        assert_ne!(hash, ZOB_INIT);
        assert_eq!(hasher.toggle_piece(hash, piece, 12), ZOB_INIT);
    }

    #[test]
    fn replace_equals_two_toggles() {
        let hasher = ZobristHasher::from_seed(11);
        let old = Piece::new(PieceType::Pawn, Color::Black);
        let new = Piece::new(PieceType::Queen, Color::White);
        let start = hasher.toggle_piece(ZOB_INIT, old, 40);
        let replaced = hasher.replace_piece(start, old, new, 40);
        assert_eq!(replaced, hasher.toggle_piece(ZOB_INIT, new, 40));
    }

    #[test]
    fn keys_are_distinct() {
        let hasher = ZobristHasher::from_seed(3);
        let distinct: HashSet<u64> = hasher.keys.iter().copied().collect();
        assert_eq!(distinct.len(), NUM_KEYS);
    }

    #[test]
    fn same_seed_same_table() {
        let a = ZobristHasher::from_seed(99);
        let b = ZobristHasher::from_seed(99);
        let c = ZobristHasher::from_seed(100);
        let piece = Piece::new(PieceType::Knight, Color::Black);
        assert_eq!(a.key(piece, 5), b.key(piece, 5));
        assert_ne!(a.key(piece, 5), c.key(piece, 5));
    }

    #[test]
    fn shared_hasher_is_memoised() {
        let a = ZobristHasher::shared();
        let b = ZobristHasher::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.seed(), Some(DEFAULT_ZOBRIST_SEED));
    }

    #[test]
    fn index_layout_is_square_major() {
        let first = Piece::new(PieceType::King, Color::Black);
        let last = Piece::new(PieceType::Bishop, Color::White);
        assert_eq!(ZobristHasher::zob_index(0, first), 0);
        assert_eq!(ZobristHasher::zob_index(0, last), PER_SQUARE - 1);
        assert_eq!(ZobristHasher::zob_index(63, last), NUM_KEYS - 1);
    }
}
