//! Piece kinds, colors, and the one-byte compressed piece encoding.

use std::fmt;

/// Piece kind; color is stored separately so each kind gets one bitboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Pawn,
    Rook,
    Knight,
    Bishop,
}

impl PieceType {
    pub const COUNT: usize = 6;

    pub const ALL: [PieceType; PieceType::COUNT] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceType::King => 0,
            PieceType::Queen => 1,
            PieceType::Pawn => 2,
            PieceType::Rook => 3,
            PieceType::Knight => 4,
            PieceType::Bishop => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Upper-case letter used when rendering a black piece.
    pub const fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::King => "KING",
            PieceType::Queen => "QUEEN",
            PieceType::Pawn => "PAWN",
            PieceType::Rook => "ROOK",
            PieceType::Knight => "KNIGHT",
            PieceType::Bishop => "BISHOP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const COUNT: usize = 2;

    pub const ALL: [Color; Color::COUNT] = [Color::Black, Color::White];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::Black),
            1 => Some(Color::White),
            _ => None,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("BLACK"),
            Color::White => f.write_str("WHITE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceType, color: Color) -> Self {
        Self { kind, color }
    }

    /// Render character: upper case for black, lower case for white.
    pub fn symbol(self) -> char {
        match self.color {
            Color::Black => self.kind.letter(),
            Color::White => self.kind.letter().to_ascii_lowercase(),
        }
    }

    #[inline]
    pub const fn compress(self) -> CompressedPiece {
        ((self.color.index() as u8) << NUM_PIECE_TYPE_BITS) | self.kind.index() as u8
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// A `Piece` packed into one byte: color in the high bits, type in the low bits.
pub type CompressedPiece = u8;

/// Smallest bit width able to hold every piece type index.
const NUM_PIECE_TYPE_BITS: u32 = log2_ceil(PieceType::COUNT as u32 + 1);
const NUM_PIECE_COLOR_BITS: u32 = log2_ceil(Color::COUNT as u32 + 1);
const PIECE_TYPE_MASK: u8 = (1 << NUM_PIECE_TYPE_BITS) - 1;
const PIECE_COLOR_MASK: u8 = (1 << NUM_PIECE_COLOR_BITS) - 1;

/// Ceiling of log2; `value` must be positive.
const fn log2_ceil(value: u32) -> u32 {
    assert!(value > 0, "log2 undefined for zero");
    let bits = u32::BITS - value.leading_zeros();
    if value.is_power_of_two() {
        bits - 1
    } else {
        bits
    }
}

#[inline]
pub const fn compress_piece(piece: Piece) -> CompressedPiece {
    piece.compress()
}

/// Inverse of `compress_piece`. Panics on a byte that no piece compresses to.
pub fn decompress_piece(compressed: CompressedPiece) -> Piece {
    let kind = PieceType::from_index((compressed & PIECE_TYPE_MASK) as usize);
    let color = Color::from_index(((compressed >> NUM_PIECE_TYPE_BITS) & PIECE_COLOR_MASK) as usize);
    match (kind, color) {
        (Some(kind), Some(color)) if compressed >> (NUM_PIECE_TYPE_BITS + NUM_PIECE_COLOR_BITS) == 0 => {
            Piece { kind, color }
        }
        _ => panic!("invalid compressed piece: {compressed:#04x}"),
    }
}
