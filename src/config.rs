//! Game configuration: who plays each side and how engines are seeded.

use std::fmt;
use std::str::FromStr;

use crate::board::Color;
use crate::player::{GreedyPlayer, MinimaxPlayer, Player, RandomPlayer};
use crate::search::DEFAULT_DEPTH;

/// Configuration for a single side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Moves typed at the console
    Human,
    /// Uniformly random moves
    Random,
    /// Best material one ply ahead
    Greedy,
    /// Alpha-beta minimax at the given depth
    Minimax { depth: u32 },
}

impl PlayerConfig {
    /// Builds the engine for this side; `None` for a human.
    pub fn build(&self, seed: Option<u64>) -> Option<Box<dyn Player>> {
        match *self {
            PlayerConfig::Human => None,
            PlayerConfig::Random => Some(Box::new(RandomPlayer::new(seed))),
            PlayerConfig::Greedy => Some(Box::new(GreedyPlayer::new(seed))),
            PlayerConfig::Minimax { depth } => Some(Box::new(MinimaxPlayer::new(depth, seed))),
        }
    }
}

impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerConfig::Human => write!(f, "human"),
            PlayerConfig::Random => write!(f, "random"),
            PlayerConfig::Greedy => write!(f, "greedy"),
            PlayerConfig::Minimax { depth } => write!(f, "minimax:{}", depth),
        }
    }
}

impl FromStr for PlayerConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (kind, arg) = match lower.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (lower.as_str(), None),
        };
        match (kind, arg) {
            ("human", None) => Ok(PlayerConfig::Human),
            ("random", None) => Ok(PlayerConfig::Random),
            ("greedy", None) => Ok(PlayerConfig::Greedy),
            ("minimax", None) => Ok(PlayerConfig::Minimax { depth: DEFAULT_DEPTH }),
            ("minimax", Some(depth)) => depth
                .parse()
                .map(|depth| PlayerConfig::Minimax { depth })
                .map_err(|_| format!("invalid search depth {:?}", depth)),
            _ => Err(format!("unknown player {:?}", s)),
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    /// Seed for engine tie-breaking; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn human_vs_engine(human: Color, depth: u32) -> Self {
        let engine = PlayerConfig::Minimax { depth };
        let (white, black) = match human {
            Color::White => (PlayerConfig::Human, engine),
            Color::Black => (engine, PlayerConfig::Human),
        };
        Self {
            white,
            black,
            seed: None,
        }
    }

    pub fn engine_vs_engine(white: PlayerConfig, black: PlayerConfig, seed: Option<u64>) -> Self {
        Self { white, black, seed }
    }

    pub fn player(&self, color: Color) -> PlayerConfig {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::human_vs_engine(Color::White, DEFAULT_DEPTH)
    }
}
