use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use bitboard_duel::board::piece::Color;
use bitboard_duel::board::zobrist::ZobristHasher;
use bitboard_duel::config::{EngineConfig, PlayerKind};
use bitboard_duel::errors::GameResult;
use bitboard_duel::game::game::{Game, GameOutcome};
use bitboard_duel::game::starting_position::standard_board_with_hasher;
use bitboard_duel::logging::init_logging;
use bitboard_duel::player::computer::ComputerPlayer;
use bitboard_duel::player::human::HumanPlayer;
use bitboard_duel::player::player_trait::Player;

fn build_player(kind: PlayerKind, color: Color, config: &EngineConfig) -> Box<dyn Player> {
    match kind {
        // Capacity 1 keeps unread input in the process-wide stdin buffer.
        PlayerKind::Human => Box::new(HumanPlayer::new(
            format!("{color} human"),
            BufReader::with_capacity(1, io::stdin()),
            io::stdout(),
        )),
        PlayerKind::Computer => Box::new(ComputerPlayer::from_config(
            format!("{color} computer"),
            config,
            color.index() as u64,
        )),
    }
}

fn run() -> GameResult<GameOutcome> {
    let mut config = EngineConfig::from_env();
    config.apply_args(std::env::args().skip(1))?;
    config.validate()?;

    let hasher = match config.zobrist_seed {
        Some(seed) => Arc::new(ZobristHasher::from_seed(seed)),
        None => Arc::new(ZobristHasher::from_rng(&mut rand::rng())),
    };
    info!(
        white = %config.white,
        black = %config.black,
        depth = config.search_depth,
        heuristic = %config.heuristic,
        cache_capacity = config.cache_capacity,
        "starting game"
    );

    let white = build_player(config.white, Color::White, &config);
    let black = build_player(config.black, Color::Black, &config);
    let mut game = Game::new(
        standard_board_with_hasher(hasher),
        white,
        black,
        config.game_limits(),
    );

    println!("{}", game.render());
    loop {
        if let Some(outcome) = game.step()? {
            return Ok(outcome);
        }
        println!("{}", game.render());
    }
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "game aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
