//! Single-bit primitives over 64-bit words.
//!
//! Bit `0` is the least-significant bit everywhere in the crate, so bit `i`
//! of a bitboard is `1u64 << i`.

/// One bit of data for each of the 64 board squares.
pub type Bitboard = u64;

/// Number of bits in a `Bitboard`.
pub const NUM_BITS: usize = 64;

#[inline]
pub fn get_bit(word: Bitboard, bit_index: usize) -> bool {
    debug_assert!(bit_index < NUM_BITS, "bit_index: {bit_index}");
    (word >> bit_index) & 1 == 1
}

#[inline]
pub fn set_bit(word: &mut Bitboard, bit_index: usize, bit: bool) {
    debug_assert!(bit_index < NUM_BITS, "bit_index: {bit_index}");
    let mask = 1u64 << bit_index;
    *word = (*word & !mask) | ((bit as u64) << bit_index);
}

/// Clears the lowest set bit of `word` and returns its index.
///
/// `word` must be non-zero.
#[inline]
pub fn pop_lowest_bit(word: &mut Bitboard) -> usize {
    debug_assert!(*word != 0, "cannot pop a bit from an empty word");
    let index = word.trailing_zeros() as usize;
    *word &= word.wrapping_sub(1);
    index
}

/// Clears the highest set bit of `word` and returns its index.
///
/// `word` must be non-zero.
#[inline]
pub fn pop_highest_bit(word: &mut Bitboard) -> usize {
    debug_assert!(*word != 0, "cannot pop a bit from an empty word");
    let index = (NUM_BITS - 1) - word.leading_zeros() as usize;
    *word &= !(1u64 << index);
    index
}
