//! Computer player: alpha-beta search with a private score cache.

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::board::board::Board;
use crate::board::piece::Color;
use crate::board::zobrist::ZobristHasher;
use crate::config::EngineConfig;
use crate::errors::GameResult;
use crate::game::chess_move::Move;
use crate::player::board_scoring::BoardScorer;
use crate::player::player_trait::Player;
use crate::player::score_cache::{FixedScoreCache, ScoreCache};
use crate::player::search::search_root;

pub struct ComputerPlayer {
    name: String,
    depth: usize,
    scorer: Box<dyn BoardScorer>,
    cache: FixedScoreCache,
    /// Scores are perspective-, depth- and key-table-specific; the cache is
    /// flushed whenever any of them changes between calls.
    cache_context: Option<(Color, usize, Arc<ZobristHasher>)>,
    rng: StdRng,
}

impl ComputerPlayer {
    pub fn with_parts(
        name: impl Into<String>,
        depth: usize,
        scorer: Box<dyn BoardScorer>,
        cache_capacity: usize,
        rng: StdRng,
    ) -> Self {
        assert!(depth >= 1, "search depth must be positive; depth: {depth}");
        Self {
            name: name.into(),
            depth,
            scorer,
            cache: FixedScoreCache::new(cache_capacity),
            cache_context: None,
            rng,
        }
    }

    /// Builds a player from the engine configuration. `stream` separates the
    /// random streams of two computer players sharing one configured seed.
    pub fn from_config(name: impl Into<String>, config: &EngineConfig, stream: u64) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_parts(
            name,
            config.search_depth,
            config.heuristic.build_scorer(),
            config.cache_capacity,
            rng,
        )
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cache(&self) -> &FixedScoreCache {
        &self.cache
    }

    fn prepare_cache(&mut self, board: &Board, color: Color) {
        let unchanged = match &self.cache_context {
            Some((cached_color, cached_depth, hasher)) => {
                *cached_color == color
                    && *cached_depth == self.depth
                    && Arc::ptr_eq(hasher, board.hasher())
            }
            None => false,
        };
        if !unchanged {
            if self.cache_context.is_some() {
                debug!(player = %self.name, %color, "search context changed, clearing score cache");
            }
            self.cache.clear();
            self.cache_context = Some((color, self.depth, Arc::clone(board.hasher())));
        }
    }
}

impl Player for ComputerPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, board: &Board, color: Color) -> GameResult<Move> {
        self.prepare_cache(board, color);
        let outcome = search_root(
            board,
            color,
            self.depth,
            self.scorer.as_ref(),
            &mut self.cache,
            &mut self.rng,
        )?;
        info!(
            player = %self.name,
            %color,
            chosen = %outcome.best_move,
            score = outcome.score,
            alternatives = outcome.tied_moves.len(),
            nodes = outcome.stats.nodes,
            "computer move"
        );
        Ok(outcome.best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::{Piece, PieceType};
    use crate::board::square::Square;
    use crate::errors::GameError;
    use crate::game::move_generation::is_valid_move;
    use crate::game::starting_position::{standard_board, standard_board_with_hasher};
    use crate::player::board_scoring::BasicScorer;

    fn player(depth: usize, seed: u64) -> ComputerPlayer {
        ComputerPlayer::with_parts("cpu", depth, Box::new(BasicScorer), 4096, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn proposes_legal_moves_from_the_start() {
        let board = standard_board();
        let mut cpu = player(2, 1);
        for color in Color::ALL {
            let mv = cpu.get_move(&board, color).unwrap();
            assert!(is_valid_move(&board, color, mv));
        }
    }

    #[test]
    fn grabs_the_enemy_king() {
        let board = Board::from_placements([
            (Square::new(3, 3), Piece::new(PieceType::King, Color::White)),
            (Square::new(4, 4), Piece::new(PieceType::King, Color::Black)),
            (Square::new(0, 0), Piece::new(PieceType::Pawn, Color::Black)),
        ]);
        let mut cpu = player(1, 9);
        let mv = cpu.get_move(&board, Color::White).unwrap();
        assert_eq!(mv, Move::new(Square::new(3, 3), Square::new(4, 4)));
    }

    #[test]
    fn same_seed_same_choice() {
        let board = standard_board();
        let a = player(1, 77).get_move(&board, Color::Black).unwrap();
        let b = player(1, 77).get_move(&board, Color::Black).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cache_is_flushed_when_context_changes() {
        let board = standard_board();
        let mut cpu = player(2, 3);
        cpu.get_move(&board, Color::Black).unwrap();
        assert!(cpu.cache().occupied() > 0);
        let hits_first = cpu.cache().stats().hits;

        // Same context keeps the cache, so the repeat search finds entries.
        cpu.get_move(&board, Color::Black).unwrap();
        assert!(cpu.cache().stats().hits > hits_first);

        // Switching perspective starts from an empty cache: the counters
        // match a fresh player doing the same search.
        cpu.get_move(&board, Color::White).unwrap();
        let mut fresh = player(2, 3);
        fresh.get_move(&board, Color::White).unwrap();
        assert_eq!(cpu.cache().stats(), fresh.cache().stats());

        // A different key table also flushes.
        let other = standard_board_with_hasher(Arc::new(ZobristHasher::from_seed(5)));
        cpu.get_move(&other, Color::White).unwrap();
        let mut fresh_other = player(2, 3);
        fresh_other.get_move(&other, Color::White).unwrap();
        assert_eq!(cpu.cache().stats(), fresh_other.cache().stats());
    }

    #[test]
    fn reports_no_legal_moves() {
        let board = Board::from_placements([(Square::new(0, 0), Piece::new(PieceType::King, Color::White))]);
        let mut cpu = player(3, 0);
        assert!(matches!(
            cpu.get_move(&board, Color::Black),
            Err(GameError::NoLegalMoves(Color::Black))
        ));
    }

    #[test]
    fn built_from_config() {
        let config = EngineConfig {
            search_depth: 2,
            cache_capacity: 128,
            rng_seed: Some(11),
            ..EngineConfig::default()
        };
        let mut cpu = ComputerPlayer::from_config("cfg", &config, 1);
        assert_eq!(cpu.depth(), 2);
        assert_eq!(cpu.cache().capacity(), 128);
        let board = standard_board();
        let mv = cpu.get_move(&board, Color::White).unwrap();
        assert!(is_valid_move(&board, Color::White, mv));
    }
}
