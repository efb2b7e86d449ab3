//! Move-choosing agents.
//!
//! Each agent looks at a position and proposes a move for the side to move.
//! Human input is handled by the console, so only engine players live here.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Color, Position};
use crate::error::ChessResult;
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};
use crate::search::Search;

pub trait Player {
    fn name(&self) -> &'static str;

    /// Proposes a move for the side to move, or `None` if it has none.
    /// Promotions are always to a queen.
    fn choose_move(&mut self, board: &Position) -> ChessResult<Option<Move>>;
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Plays any move, uniformly at random.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: rng_from(seed) }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_move(&mut self, board: &Position) -> ChessResult<Option<Move>> {
        let moves = MoveGenerator::new().generate_moves(board);
        Ok(moves.choose(&mut self.rng).copied())
    }
}

/// Plays the move with the best material balance one ply ahead.
pub struct GreedyPlayer {
    rng: StdRng,
    evaluator: Evaluator,
}

impl GreedyPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from(seed),
            evaluator: Evaluator::new(),
        }
    }
}

impl Player for GreedyPlayer {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_move(&mut self, board: &Position) -> ChessResult<Option<Move>> {
        let mut scratch = board.clone();
        let sign = match board.active_color() {
            Color::White => 1,
            Color::Black => -1,
        };

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();
        for mv in MoveGenerator::new().generate_moves(board) {
            let undo = scratch.make(mv, true)?;
            let value = sign * self.evaluator.score(&scratch);
            scratch.unmake(undo);

            if value > best_value {
                best_value = value;
                best_moves.clear();
            }
            if value == best_value {
                best_moves.push(mv);
            }
        }
        Ok(best_moves.choose(&mut self.rng).copied())
    }
}

/// Alpha-beta minimax at a fixed depth.
pub struct MinimaxPlayer {
    search: Search,
}

impl MinimaxPlayer {
    pub fn new(depth: u32, seed: Option<u64>) -> Self {
        let mut search = match seed {
            Some(seed) => Search::with_seed(seed),
            None => Search::new(),
        };
        search.set_max_depth(depth);
        Self { search }
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn choose_move(&mut self, board: &Position) -> ChessResult<Option<Move>> {
        Ok(self.search.find_best_move(board)?.best_move)
    }
}
