use std::fmt;
use std::str::FromStr;

use crate::board::{PieceKind, Square};
use crate::error::ChessError;
use crate::movegen::Move;

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({},{})", self.row(), self.col());
        }
        let file = (b'A' + self.col() as u8) as char;
        write!(f, "{}{}", file, 8 - self.row())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.destination)
    }
}

/// Renders a move as `"<source>-<destination>"`, e.g. `"E2-E4"`.
pub fn notation(mv: &Move) -> String {
    mv.to_string()
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidNotation(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_uppercase();
        let rank = bytes[1];
        if !(b'A'..=b'H').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Square::new(8 - (rank - b'0') as i8, (file - b'A') as i8))
    }
}

/// Accepts `E2-E4`, `e2e4` and a trailing promotion piece such as `E7-E8=Q`
/// or `e7e8q`.
impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidNotation(s.to_string());
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '=' | ' '))
            .collect();
        if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
            return Err(invalid());
        }

        let source: Square = compact[0..2].parse().map_err(|_| invalid())?;
        let destination: Square = compact[2..4].parse().map_err(|_| invalid())?;
        let promotion = match compact[4..].chars().next() {
            None => None,
            Some(c) => Some(match c.to_ascii_uppercase() {
                'Q' => PieceKind::Queen,
                'R' => PieceKind::Rook,
                'B' => PieceKind::Bishop,
                'N' => PieceKind::Knight,
                _ => return Err(invalid()),
            }),
        };

        Ok(Move {
            source,
            destination,
            promotion,
        })
    }
}
