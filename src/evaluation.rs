use crate::board::{PieceKind, Position};

/// Static material evaluation. Positive favours White.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Signed sum of piece values: White adds, Black subtracts.
    pub fn evaluate(&self, board: &Position) -> i32 {
        board
            .pieces()
            .iter()
            .map(|piece| piece.color.sign() * piece.kind.value())
            .sum()
    }

    /// Material score with decided games folded in. A mated side keeps its
    /// king on the board, so it is scored as if the king had been taken.
    pub fn score(&self, board: &Position) -> i32 {
        let material = self.evaluate(board);
        match board.winner() {
            Some(winner) if board.king_square(winner.opposite()).is_ok() => {
                material + winner.sign() * PieceKind::King.value()
            }
            _ => material,
        }
    }
}
