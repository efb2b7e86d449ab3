use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{Color, Position};
use crate::error::ChessResult;
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};

/// Depth the reference player searches at. Depth 0 still looks one ply
/// ahead: every move is played and the result evaluated.
pub const DEFAULT_DEPTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the searched position is already decided or has no moves.
    pub best_move: Option<Move>,
    pub value: i32,
}

/// Fixed-depth minimax with alpha-beta pruning over material scores.
///
/// White maximises, Black minimises. Moves of equal value are chosen between
/// with the search's own random source, so a seeded search is reproducible.
pub struct Search {
    evaluator: Evaluator,
    move_generator: MoveGenerator,
    rng: StdRng,
    max_depth: u32,
    nodes_searched: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            evaluator: Evaluator::new(),
            move_generator: MoveGenerator::new(),
            rng,
            max_depth: DEFAULT_DEPTH,
            nodes_searched: 0,
        }
    }

    pub fn find_best_move(&mut self, board: &Position) -> ChessResult<SearchOutcome> {
        self.best_move(board, self.max_depth)
    }

    /// Searches a private copy of `board`; the caller's position is never
    /// touched.
    pub fn best_move(&mut self, board: &Position, depth: u32) -> ChessResult<SearchOutcome> {
        self.nodes_searched = 0;
        let mut scratch = board.clone();
        let outcome = self.minimax(&mut scratch, depth, 0, i32::MIN, i32::MAX)?;
        debug!(
            "search depth {} for {}: best={} value={} nodes={}",
            depth,
            board.active_color(),
            outcome.best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
            outcome.value,
            self.nodes_searched
        );
        Ok(outcome)
    }

    fn minimax(
        &mut self,
        board: &mut Position,
        depth: u32,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> ChessResult<SearchOutcome> {
        if board.winner().is_some() {
            return Ok(self.terminal(board));
        }
        let moves = self.move_generator.generate_moves(board);
        if moves.is_empty() {
            return Ok(self.terminal(board));
        }

        let maximizing = board.active_color() == Color::White;
        let mut extreme = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_moves: Vec<Move> = Vec::new();
        let count = moves.len();

        for (i, mv) in moves.into_iter().enumerate() {
            self.nodes_searched += 1;
            let undo = board.make(mv, true)?;
            let value = if depth == 0 {
                self.evaluator.score(board)
            } else {
                trace!(
                    "{:indent$}{}: evaluate move [{}/{}]: {}",
                    "", depth, i, count, mv,
                    indent = ply * 4
                );
                // One point of slack on the side being tied: a child that
                // comes back equal to `extreme` is then an exact value, never
                // a cutoff bound.
                let (child_alpha, child_beta) = if maximizing {
                    (alpha.saturating_sub(1), beta)
                } else {
                    (alpha, beta.saturating_add(1))
                };
                self.minimax(board, depth - 1, ply + 1, child_alpha, child_beta)?.value
            };
            board.unmake(undo);

            let improves = if maximizing { value > extreme } else { value < extreme };
            if improves {
                best_moves.clear();
                extreme = value;
                best_moves.push(mv);
            } else if value == extreme {
                best_moves.push(mv);
            }

            if depth > 0 {
                if maximizing {
                    alpha = alpha.max(extreme);
                } else {
                    beta = beta.min(extreme);
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        let best_move = best_moves.choose(&mut self.rng).copied();
        if let Some(mv) = best_move {
            trace!("{:indent$}{}: move={} value={}", "", depth, mv, extreme, indent = ply * 4);
        }
        Ok(SearchOutcome {
            best_move,
            value: extreme,
        })
    }

    fn terminal(&self, board: &Position) -> SearchOutcome {
        SearchOutcome {
            best_move: None,
            value: self.evaluator.score(board),
        }
    }

    pub fn set_max_depth(&mut self, depth: u32) {
        self.max_depth = depth;
    }

    pub fn get_nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
