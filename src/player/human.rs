//! Console player reading `row1 col1 row2 col2` lines.

use std::io::{BufRead, Write};

use crate::board::board::Board;
use crate::board::piece::Color;
use crate::board::square::Square;
use crate::errors::{GameError, GameResult};
use crate::game::chess_move::Move;
use crate::player::player_trait::Player;

pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }
}

/// Parses four whitespace-separated coordinates into a move.
pub fn parse_move(line: &str) -> GameResult<Move> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| GameError::InvalidInput(format!("not a number: {token:?}")))
        })
        .collect::<GameResult<Vec<i64>>>()?;

    match values.as_slice() {
        [row1, col1, row2, col2] => Ok(Move::new(
            Square::try_new(*row1, *col1)?,
            Square::try_new(*row2, *col2)?,
        )),
        _ => Err(GameError::InvalidInput(format!(
            "expected 4 numbers, got {}",
            values.len()
        ))),
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, _board: &Board, color: Color) -> GameResult<Move> {
        write!(self.output, "{} ({color}) enter row1 col1 row2 col2: ", self.name)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        parse_move(line.trim())
    }
}
