use std::fmt;

use crate::error::{ChessError, ChessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Material value used by the evaluator.
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 5,
            PieceKind::Rook => 10,
            PieceKind::Queen => 100,
            PieceKind::King => 10000,
        }
    }

    pub fn is_promotion_target(&self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step a pawn of this color moves by. White starts on row 6 and
    /// walks toward row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn promotion_row(&self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// +1 for White, -1 for Black.
    pub fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A (row, column) grid coordinate. Row 0 is Black's back rank.
///
/// Squares may be built off the board (offset arithmetic does this freely);
/// `is_on_board` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn is_on_board(&self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    pub fn offset(&self, drow: i8, dcol: i8) -> Square {
        Square::new(self.row + drow, self.col + dcol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }
}

/// What a square holds from the point of view of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    OutOfBounds,
    Empty,
    Friend,
    Opponent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub(crate) pieces: Vec<Piece>,
    pub(crate) active_color: Color,
    pub(crate) winner: Option<Color>,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) in_check: bool,
    pub(crate) captured: Vec<Piece>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut position = Self::empty(Color::White);
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            position.place(Piece::new(*kind, Color::Black, Square::new(0, col)));
            position.place(Piece::new(PieceKind::Pawn, Color::Black, Square::new(1, col)));
            position.place(Piece::new(PieceKind::Pawn, Color::White, Square::new(6, col)));
            position.place(Piece::new(*kind, Color::White, Square::new(7, col)));
        }
        position
    }

    /// A board with no pieces on it.
    pub fn empty(active_color: Color) -> Self {
        Self {
            pieces: Vec::with_capacity(32),
            active_color,
            winner: None,
            en_passant_target: None,
            in_check: false,
            captured: Vec::new(),
        }
    }

    /// Puts a piece on the board, replacing whatever stood on its square.
    /// Off-board squares are ignored.
    pub fn place(&mut self, piece: Piece) {
        if !piece.square.is_on_board() {
            return;
        }
        self.pieces.retain(|p| p.square != piece.square);
        self.pieces.push(piece);
    }

    pub fn report(&self, square: Square, asking: Color) -> Occupancy {
        if !square.is_on_board() {
            return Occupancy::OutOfBounds;
        }
        match self.piece_at(square) {
            None => Occupancy::Empty,
            Some(piece) if piece.color == asking => Occupancy::Friend,
            Some(_) => Occupancy::Opponent,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub(crate) fn index_of(&self, square: Square) -> Option<usize> {
        self.pieces.iter().position(|p| p.square == square)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn king_square(&self, color: Color) -> ChessResult<Square> {
        self.pieces
            .iter()
            .find(|p| p.kind == PieceKind::King && p.color == color)
            .map(|p| p.square)
            .ok_or(ChessError::MissingKing(color))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for row in 0..8 {
            result.push((b'8' - row as u8) as char);
            result.push(' ');
            for col in 0..8 {
                let symbol = match self.piece_at(Square::new(row, col)) {
                    Some(piece) if piece.color == Color::White => {
                        piece.kind.symbol().to_ascii_uppercase()
                    }
                    Some(piece) => piece.kind.symbol(),
                    None => '.',
                };
                result.push(symbol);
                if col < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        result.push_str("  A B C D E F G H\n");
        write!(f, "{}", result)
    }
}
