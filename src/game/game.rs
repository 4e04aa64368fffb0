//! Turn-taking between two players on one board.
//!
//! Black moves first. The game ends when a king has been captured, when the
//! side to move has no moves at all, or when the ply limit is reached.

use std::fmt;

use tracing::{info, warn};

use crate::board::board::{Board, SquareBuffer};
use crate::board::piece::{Color, PieceType};
use crate::board::render::render_board;
use crate::config::{DEFAULT_MAX_INVALID_ATTEMPTS, DEFAULT_MAX_PLIES};
use crate::errors::{GameError, GameResult};
use crate::game::chess_move::{Move, MoveBuffer};
use crate::game::move_application::apply_validated_move;
use crate::game::move_generation::all_moves;
use crate::player::player_trait::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won { winner: Color },
    /// Both kings are gone; only reachable from a custom starting board.
    NoKingsRemaining,
    NoLegalMoves { color: Color },
    PlyLimit,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Won { winner } => write!(f, "{winner} wins"),
            GameOutcome::NoKingsRemaining => write!(f, "no kings remain, draw"),
            GameOutcome::NoLegalMoves { color } => write!(f, "{color} has no moves, draw"),
            GameOutcome::PlyLimit => write!(f, "ply limit reached, draw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLimits {
    /// Zero means unbounded.
    pub max_plies: u32,
    pub max_invalid_attempts: u32,
}

impl Default for GameLimits {
    fn default() -> Self {
        Self {
            max_plies: DEFAULT_MAX_PLIES,
            max_invalid_attempts: DEFAULT_MAX_INVALID_ATTEMPTS,
        }
    }
}

pub struct Game {
    board: Board,
    white: Box<dyn Player>,
    black: Box<dyn Player>,
    next_color: Color,
    plies: u32,
    limits: GameLimits,
    history: Vec<Move>,
}

impl Game {
    pub fn new(board: Board, white: Box<dyn Player>, black: Box<dyn Player>, limits: GameLimits) -> Self {
        Self {
            board,
            white,
            black,
            next_color: Color::Black,
            plies: 0,
            limits,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_color(&self) -> Color {
        self.next_color
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Committed moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn render(&self) -> String {
        render_board(&self.board)
    }

    fn king_colors(&self) -> Vec<Color> {
        let mut kings = SquareBuffer::new();
        self.board.occupied_squares_by_kind(PieceType::King, &mut kings);
        kings.iter().map(|square| self.board.get_piece_color(*square)).collect()
    }

    pub fn is_ended(&self) -> bool {
        self.king_colors().len() < 2
    }

    /// Color of the only remaining king, if exactly one is left.
    pub fn winner(&self) -> Option<Color> {
        match self.king_colors().as_slice() {
            [color] => Some(*color),
            _ => None,
        }
    }

    fn finished(&self) -> Option<GameOutcome> {
        let kings = self.king_colors();
        match kings.as_slice() {
            [] => Some(GameOutcome::NoKingsRemaining),
            [winner] => Some(GameOutcome::Won { winner: *winner }),
            _ if self.limits.max_plies != 0 && self.plies >= self.limits.max_plies => {
                Some(GameOutcome::PlyLimit)
            }
            _ => None,
        }
    }

    /// Asks the side to move for a move until a legal one is applied.
    fn run_ply(&mut self) -> GameResult<Move> {
        let color = self.next_color;
        let mut attempts = 0;
        loop {
            let player = match color {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let result = player
                .get_move(&self.board, color)
                .and_then(|mv| apply_validated_move(&mut self.board, color, mv).map(|captured| (mv, captured)));

            match result {
                Ok((mv, captured)) => {
                    info!(
                        ply = self.plies + 1,
                        %color,
                        player = player.name(),
                        mv = %mv,
                        captured = ?captured,
                        "move committed"
                    );
                    return Ok(mv);
                }
                Err(
                    err @ (GameError::InvalidMove(_)
                    | GameError::InvalidInput(_)
                    | GameError::InvalidSquare { .. }),
                ) => {
                    attempts += 1;
                    warn!(%color, player = player.name(), attempts, error = %err, "rejected move");
                    if attempts >= self.limits.max_invalid_attempts {
                        return Err(GameError::TooManyInvalidMoves { color, attempts });
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Plays one ply. Returns the outcome once the game is over.
    pub fn step(&mut self) -> GameResult<Option<GameOutcome>> {
        if let Some(outcome) = self.finished() {
            return Ok(Some(outcome));
        }

        let color = self.next_color;
        let mut moves = MoveBuffer::new();
        if all_moves(&self.board, color, &mut moves) == 0 {
            return Ok(Some(GameOutcome::NoLegalMoves { color }));
        }

        let mv = self.run_ply()?;
        self.history.push(mv);
        self.plies += 1;
        self.next_color = color.opposite();

        let outcome = self.finished();
        if let Some(outcome) = outcome {
            info!(plies = self.plies, %outcome, "game over");
        }
        Ok(outcome)
    }

    /// Plays until the game ends.
    pub fn play(&mut self) -> GameResult<GameOutcome> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }
}
