//! Depth-limited alpha-beta search with a transposition cache.
//!
//! Maximizer and minimizer nodes alternate by ply. Both are fail-soft: a
//! returned score strictly inside the node's `(alpha, beta)` window is exact,
//! a score at or below `alpha` is an upper bound and one at or above `beta`
//! is a lower bound. Leaves (depth exhausted or no moves) are always scored
//! from the searching player's perspective.
//!
//! The root collects every move tied for the best score and picks one at
//! random. Each root child is searched with `alpha = best - 1`, so a child
//! that ties the best score is known exactly rather than as a bound.
//!
//! Cached scores are only substituted when their bound settles the current
//! window, so the chosen move never depends on what the cache holds.
//!
//! The search owns a private copy of the board and mutates it with
//! make/unmake pairs; intermediate states are never visible to callers.

use rand::{prelude::IndexedRandom, Rng};
use tracing::debug;

use crate::board::board::Board;
use crate::board::piece::Color;
use crate::errors::{GameError, GameResult};
use crate::game::chess_move::{Move, MoveBuffer};
use crate::game::move_application::{make_move, unmake_move};
use crate::game::move_generation::all_moves;
use crate::player::board_scoring::{BoardScore, BoardScorer};
use crate::player::score_cache::{Bound, CachedScore, ScoreCache};

pub const NEG_INFINITY: BoardScore = BoardScore::MIN;
pub const POS_INFINITY: BoardScore = BoardScore::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior and leaf nodes visited below the root.
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
    pub cache_hits: u64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_move: Move,
    pub score: BoardScore,
    /// Every root move that reached `score`.
    pub tied_moves: Vec<Move>,
    pub stats: SearchStats,
}

struct AlphaBeta<'a, S: ?Sized, C: ?Sized> {
    board: Board,
    perspective: Color,
    scorer: &'a S,
    cache: &'a mut C,
    stats: SearchStats,
}

impl<S, C> AlphaBeta<'_, S, C>
where
    S: BoardScorer + ?Sized,
    C: ScoreCache + ?Sized,
{
    #[inline]
    fn leaf(&mut self) -> BoardScore {
        self.stats.leaves += 1;
        self.scorer.score(&self.board, self.perspective)
    }

    fn probe(&mut self, depth: usize, alpha: BoardScore, beta: BoardScore) -> Option<BoardScore> {
        let cached = self.cache.find(&self.board, depth)?;
        let usable = match cached.bound {
            Bound::Exact => true,
            Bound::Lower => cached.value >= beta,
            Bound::Upper => cached.value <= alpha,
        };
        if usable {
            self.stats.cache_hits += 1;
            Some(cached.value)
        } else {
            None
        }
    }

    fn store(&mut self, depth: usize, value: BoardScore, alpha: BoardScore, beta: BoardScore) {
        let bound = if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.cache.set(&self.board, depth, CachedScore { value, bound });
    }

    fn max_node(&mut self, color: Color, depth: usize, mut alpha: BoardScore, beta: BoardScore) -> BoardScore {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.leaf();
        }
        if let Some(score) = self.probe(depth, alpha, beta) {
            return score;
        }

        let mut moves = MoveBuffer::new();
        if all_moves(&self.board, color, &mut moves) == 0 {
            return self.leaf();
        }

        let window = (alpha, beta);
        let mut score = NEG_INFINITY;
        for &mv in moves.iter() {
            let captured = make_move(&mut self.board, mv);
            let child = self.min_node(color.opposite(), depth - 1, alpha, beta);
            unmake_move(&mut self.board, mv, captured);

            score = score.max(child);
            if score >= beta {
                self.stats.cutoffs += 1;
                break;
            }
            alpha = alpha.max(score);
        }

        self.store(depth, score, window.0, window.1);
        score
    }

    fn min_node(&mut self, color: Color, depth: usize, alpha: BoardScore, mut beta: BoardScore) -> BoardScore {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.leaf();
        }
        if let Some(score) = self.probe(depth, alpha, beta) {
            return score;
        }

        let mut moves = MoveBuffer::new();
        if all_moves(&self.board, color, &mut moves) == 0 {
            return self.leaf();
        }

        let window = (alpha, beta);
        let mut score = POS_INFINITY;
        for &mv in moves.iter() {
            let captured = make_move(&mut self.board, mv);
            let child = self.max_node(color.opposite(), depth - 1, alpha, beta);
            unmake_move(&mut self.board, mv, captured);

            score = score.min(child);
            if score <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
            beta = beta.min(score);
        }

        self.store(depth, score, window.0, window.1);
        score
    }
}

/// Searches `depth` plies (at least 1) for `color` and reports the best
/// score, all moves tied for it, and one of them chosen uniformly at random.
pub fn search_root<S, C, R>(
    board: &Board,
    color: Color,
    depth: usize,
    scorer: &S,
    cache: &mut C,
    rng: &mut R,
) -> GameResult<SearchOutcome>
where
    S: BoardScorer + ?Sized,
    C: ScoreCache + ?Sized,
    R: Rng + ?Sized,
{
    assert!(depth >= 1, "search depth must be positive; depth: {depth}");

    let mut search = AlphaBeta {
        board: board.clone(),
        perspective: color,
        scorer,
        cache,
        stats: SearchStats::default(),
    };

    let mut moves = MoveBuffer::new();
    if all_moves(&search.board, color, &mut moves) == 0 {
        return Err(GameError::NoLegalMoves(color));
    }

    let mut best = NEG_INFINITY;
    let mut tied = Vec::new();
    for &mv in moves.iter() {
        let captured = make_move(&mut search.board, mv);
        let score = search.min_node(color.opposite(), depth - 1, best.saturating_sub(1), POS_INFINITY);
        unmake_move(&mut search.board, mv, captured);

        if score > best {
            best = score;
            tied.clear();
            tied.push(mv);
        } else if score == best {
            tied.push(mv);
        }
    }

    let best_move = *tied.choose(rng).ok_or(GameError::NoLegalMoves(color))?;
    let stats = search.stats;

    debug!(
        %color,
        depth,
        score = best,
        root_moves = moves.len(),
        tied = tied.len(),
        nodes = stats.nodes,
        leaves = stats.leaves,
        cutoffs = stats.cutoffs,
        cache_hits = stats.cache_hits,
        chosen = %best_move,
        "alpha-beta search complete"
    );

    Ok(SearchOutcome {
        best_move,
        score: best,
        tied_moves: tied,
        stats,
    })
}

/// The move `search_root` picks, without the bookkeeping.
pub fn alpha_beta_search<S, C, R>(
    board: &Board,
    color: Color,
    depth: usize,
    scorer: &S,
    cache: &mut C,
    rng: &mut R,
) -> GameResult<Move>
where
    S: BoardScorer + ?Sized,
    C: ScoreCache + ?Sized,
    R: Rng + ?Sized,
{
    search_root(board, color, depth, scorer, cache, rng).map(|outcome| outcome.best_move)
}
