use std::collections::HashSet;

use crate::board::{Color, Occupancy, Piece, PieceKind, Position, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Self {
        Self {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn new_promotion(source: Square, destination: Square, promotion: PieceKind) -> Self {
        Self {
            source,
            destination,
            promotion: Some(promotion),
        }
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

/// Pseudo-legal move generation. A move is pseudo-legal when it follows the
/// piece's movement pattern and board occupancy; whether it exposes the
/// mover's own king is not examined.
#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Destinations of `piece` in `board`. With `ignore_castle` set no
    /// castling candidates are produced; attack sets need this because
    /// castling legality itself reads the attack set.
    pub fn destinations(
        &self,
        board: &Position,
        piece: &Piece,
        ignore_castle: bool,
    ) -> Vec<Square> {
        match piece.kind {
            PieceKind::Rook => self.slide(board, piece, &ORTHOGONAL, true),
            PieceKind::Bishop => self.slide(board, piece, &DIAGONAL, true),
            PieceKind::Queen => {
                let mut targets = self.slide(board, piece, &ORTHOGONAL, true);
                targets.extend(self.slide(board, piece, &DIAGONAL, true));
                targets
            }
            PieceKind::Knight => self.knight_targets(board, piece),
            PieceKind::King => {
                let mut targets = self.slide(board, piece, &ORTHOGONAL, false);
                targets.extend(self.slide(board, piece, &DIAGONAL, false));
                if !ignore_castle {
                    targets.extend(self.castling_targets(board, piece));
                }
                targets
            }
            PieceKind::Pawn => self.pawn_targets(board, piece),
        }
    }

    // Walks each direction until the first occupied square; a friend ends
    // the ray before it, an opponent ends the ray on it.
    fn slide(
        &self,
        board: &Position,
        piece: &Piece,
        directions: &[(i8, i8)],
        continuing: bool,
    ) -> Vec<Square> {
        let mut targets = Vec::new();
        for &(drow, dcol) in directions {
            let mut current = piece.square;
            loop {
                current = current.offset(drow, dcol);
                match board.report(current, piece.color) {
                    Occupancy::OutOfBounds | Occupancy::Friend => break,
                    Occupancy::Opponent => {
                        targets.push(current);
                        break;
                    }
                    Occupancy::Empty => targets.push(current),
                }
                if !continuing {
                    break;
                }
            }
        }
        targets
    }

    fn knight_targets(&self, board: &Position, piece: &Piece) -> Vec<Square> {
        KNIGHT_JUMPS
            .iter()
            .map(|&(drow, dcol)| piece.square.offset(drow, dcol))
            .filter(|&target| {
                matches!(
                    board.report(target, piece.color),
                    Occupancy::Empty | Occupancy::Opponent
                )
            })
            .collect()
    }

    fn pawn_targets(&self, board: &Position, piece: &Piece) -> Vec<Square> {
        let mut targets = Vec::new();
        let forward = piece.color.forward();
        let from = piece.square;

        // En passant: the double-advanced pawn sits beside us, we land behind it.
        if let Some(target) = board.en_passant_target {
            let beside = target.row() == from.row() && (target.col() - from.col()).abs() == 1;
            if beside && board.report(target, piece.color) == Occupancy::Opponent {
                targets.push(Square::new(from.row() + forward, target.col()));
            }
        }

        for dcol in [-1, 1] {
            let capture = from.offset(forward, dcol);
            if board.report(capture, piece.color) == Occupancy::Opponent {
                targets.push(capture);
            }
        }

        let single = from.offset(forward, 0);
        if board.report(single, piece.color) == Occupancy::Empty {
            targets.push(single);
            if from.row() == piece.color.pawn_start_row() {
                let double = from.offset(2 * forward, 0);
                if board.report(double, piece.color) == Occupancy::Empty {
                    targets.push(double);
                }
            }
        }

        targets
    }

    fn castling_targets(&self, board: &Position, king: &Piece) -> Vec<Square> {
        let mut targets = Vec::new();
        if king.has_moved {
            return targets;
        }

        let row = king.square.row();
        let rooks = board.pieces.iter().filter(|p| {
            p.kind == PieceKind::Rook
                && p.color == king.color
                && !p.has_moved
                && p.square.row() == row
                && (p.square.col() - king.square.col()).abs() >= 3
        });

        let mut danger: Option<HashSet<Square>> = None;
        for rook in rooks {
            let step = (rook.square.col() - king.square.col()).signum();
            let path_clear = (1..(rook.square.col() - king.square.col()).abs())
                .map(|i| king.square.offset(0, step * i))
                .all(|sq| board.report(sq, king.color) == Occupancy::Empty);
            if !path_clear {
                continue;
            }

            let zone = danger.get_or_insert_with(|| self.danger_zone(board, king.color));
            let traversed_safe = (0..=2)
                .map(|i| king.square.offset(0, step * i))
                .all(|sq| !zone.contains(&sq));
            if traversed_safe {
                targets.push(king.square.offset(0, 2 * step));
            }
        }
        targets
    }

    /// Every square an opponent of `color` could move a piece onto next turn.
    pub fn danger_zone(&self, board: &Position, color: Color) -> HashSet<Square> {
        board
            .pieces
            .iter()
            .filter(|p| p.color != color)
            .flat_map(|p| self.destinations(board, p, true))
            .collect()
    }

    pub fn is_square_attacked(&self, board: &Position, square: Square, defender: Color) -> bool {
        board
            .pieces
            .iter()
            .filter(|p| p.color != defender)
            .any(|p| self.destinations(board, p, true).contains(&square))
    }

    /// Legal destinations from `square`; empty unless it holds a piece of
    /// the side to move.
    pub fn legal_moves(&self, board: &Position, square: Square) -> Vec<Square> {
        match board.piece_at(square) {
            Some(piece) if piece.color == board.active_color => {
                self.destinations(board, piece, false)
            }
            _ => Vec::new(),
        }
    }

    /// All moves for the side to move, in piece order. Pawns reaching the
    /// last rank are promoted to a queen.
    pub fn generate_moves(&self, board: &Position) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in board.pieces.iter().filter(|p| p.color == board.active_color) {
            for destination in self.destinations(board, piece, false) {
                let promotes = piece.kind == PieceKind::Pawn
                    && destination.row() == piece.color.promotion_row();
                moves.push(if promotes {
                    Move::new_promotion(piece.square, destination, PieceKind::Queen)
                } else {
                    Move::new(piece.square, destination)
                });
            }
        }
        moves
    }
}
