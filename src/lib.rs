//! Crate root module declarations for the bitboard duel engine.
//!
//! Exposes the board representation, move generation and game flow, and the
//! players (console and alpha-beta search) so the binary, benches and tests
//! share stable module paths.

pub mod board {
    pub mod bitops;
    #[allow(clippy::module_inception)]
    pub mod board;
    pub mod piece;
    pub mod render;
    pub mod square;
    pub mod zobrist;
}

pub mod game {
    pub mod chess_move;
    #[allow(clippy::module_inception)]
    pub mod game;
    pub mod move_application;
    pub mod move_generation;
    pub mod perft;
    pub mod starting_position;
}

pub mod player {
    pub mod board_scoring;
    pub mod computer;
    pub mod human;
    pub mod player_trait;
    pub mod score_cache;
    pub mod search;
}

pub mod utils {
    pub mod fixed_buffer;
}

pub mod config;
pub mod errors;
pub mod logging;
