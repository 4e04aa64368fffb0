//! Engine and match configuration.
//!
//! Values come from defaults, then `DUEL_*` environment variables, then
//! command-line flags. Unparseable environment values fall back to the
//! default; unparseable flags are reported as errors.

use std::fmt;
use std::str::FromStr;

use crate::errors::{GameError, GameResult};
use crate::game::game::GameLimits;
use crate::player::board_scoring::{BasicScorer, BoardScorer, MaterialScorer};
use crate::player::score_cache::DEFAULT_CACHE_CAPACITY;

pub const DEFAULT_SEARCH_DEPTH: usize = 5;
pub const DEFAULT_MAX_PLIES: u32 = 300;
pub const DEFAULT_MAX_INVALID_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    /// Negative count of opponent pieces.
    #[default]
    Basic,
    /// Weighted material difference.
    Material,
}

impl HeuristicKind {
    pub fn build_scorer(self) -> Box<dyn BoardScorer> {
        match self {
            HeuristicKind::Basic => Box::new(BasicScorer),
            HeuristicKind::Material => Box::new(MaterialScorer),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(HeuristicKind::Basic),
            "material" => Ok(HeuristicKind::Material),
            other => Err(GameError::InvalidConfig(format!("unknown heuristic {other:?}"))),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeuristicKind::Basic => write!(f, "basic"),
            HeuristicKind::Material => write!(f, "material"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer,
}

impl FromStr for PlayerKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "computer" | "cpu" => Ok(PlayerKind::Computer),
            other => Err(GameError::InvalidConfig(format!("unknown player kind {other:?}"))),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub search_depth: usize,
    pub cache_capacity: usize,
    /// Seed for the Zobrist key table. `None` draws fresh keys.
    pub zobrist_seed: Option<u64>,
    /// Seed for the computer players' tie-breaking. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub heuristic: HeuristicKind,
    pub max_plies: u32,
    pub max_invalid_attempts: u32,
    pub white: PlayerKind,
    pub black: PlayerKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            zobrist_seed: None,
            rng_seed: None,
            heuristic: HeuristicKind::Basic,
            max_plies: DEFAULT_MAX_PLIES,
            max_invalid_attempts: DEFAULT_MAX_INVALID_ATTEMPTS,
            white: PlayerKind::Computer,
            black: PlayerKind::Human,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_flag<T: FromStr>(flag: &str, value: Option<String>) -> GameResult<T> {
    let value = value.ok_or_else(|| GameError::InvalidConfig(format!("{flag} needs a value")))?;
    value
        .trim()
        .parse()
        .map_err(|_| GameError::InvalidConfig(format!("bad value for {flag}: {value:?}")))
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the `DUEL_*` keys through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            search_depth: parse_or(lookup("DUEL_SEARCH_DEPTH"), defaults.search_depth),
            cache_capacity: parse_or(lookup("DUEL_CACHE_CAPACITY"), defaults.cache_capacity),
            zobrist_seed: lookup("DUEL_ZOBRIST_SEED").and_then(|v| v.trim().parse().ok()),
            rng_seed: lookup("DUEL_RNG_SEED").and_then(|v| v.trim().parse().ok()),
            heuristic: parse_or(lookup("DUEL_HEURISTIC"), defaults.heuristic),
            max_plies: parse_or(lookup("DUEL_MAX_PLIES"), defaults.max_plies),
            max_invalid_attempts: parse_or(
                lookup("DUEL_MAX_INVALID_ATTEMPTS"),
                defaults.max_invalid_attempts,
            ),
            white: parse_or(lookup("DUEL_WHITE"), defaults.white),
            black: parse_or(lookup("DUEL_BLACK"), defaults.black),
        }
    }

    /// Applies `--flag value` pairs on top of the current values.
    pub fn apply_args<I>(&mut self, args: I) -> GameResult<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--white" => self.white = parse_flag(&flag, args.next())?,
                "--black" => self.black = parse_flag(&flag, args.next())?,
                "--depth" => self.search_depth = parse_flag(&flag, args.next())?,
                "--cache" => self.cache_capacity = parse_flag(&flag, args.next())?,
                "--heuristic" => self.heuristic = parse_flag(&flag, args.next())?,
                "--max-plies" => self.max_plies = parse_flag(&flag, args.next())?,
                "--seed" => self.rng_seed = Some(parse_flag(&flag, args.next())?),
                "--zobrist-seed" => self.zobrist_seed = Some(parse_flag(&flag, args.next())?),
                other => {
                    return Err(GameError::InvalidConfig(format!("unknown argument {other:?}")));
                }
            }
        }
        Ok(())
    }

    pub fn game_limits(&self) -> GameLimits {
        GameLimits {
            max_plies: self.max_plies,
            max_invalid_attempts: self.max_invalid_attempts,
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.search_depth == 0 {
            return Err(GameError::InvalidConfig("search depth must be at least 1".into()));
        }
        if self.cache_capacity == 0 {
            return Err(GameError::InvalidConfig("cache capacity must be at least 1".into()));
        }
        if self.max_invalid_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max invalid attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.search_depth, 5);
        assert_eq!(config.cache_capacity, 1_000_000);
        assert_eq!(config.white, PlayerKind::Computer);
        assert_eq!(config.black, PlayerKind::Human);
        assert_eq!(config.game_limits(), GameLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_and_bad_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("DUEL_SEARCH_DEPTH", "3"),
            ("DUEL_CACHE_CAPACITY", "nope"),
            ("DUEL_ZOBRIST_SEED", "42"),
            ("DUEL_HEURISTIC", "Material"),
            ("DUEL_BLACK", "computer"),
        ]));
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.zobrist_seed, Some(42));
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.heuristic, HeuristicKind::Material);
        assert_eq!(config.black, PlayerKind::Computer);
    }

    #[test]
    fn flags_override() {
        let mut config = EngineConfig::default();
        config
            .apply_args(args(&["--white", "human", "--depth", "2", "--seed", "7", "--zobrist-seed", "9"]))
            .unwrap();
        assert_eq!(config.white, PlayerKind::Human);
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.zobrist_seed, Some(9));
    }

    #[test]
    fn bad_flags_are_errors() {
        let mut config = EngineConfig::default();
        assert!(matches!(
            config.apply_args(args(&["--depth"])),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            config.apply_args(args(&["--depth", "deep"])),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            config.apply_args(args(&["--colour", "red"])),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validation_rejects_zero_depth_and_capacity() {
        let zero_depth = EngineConfig {
            search_depth: 0,
            ..EngineConfig::default()
        };
        assert!(zero_depth.validate().is_err());
        let zero_cache = EngineConfig {
            cache_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(zero_cache.validate().is_err());
    }
}
