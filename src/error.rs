use thiserror::Error;

use crate::board::{Color, PieceKind, Square};

/// Errors surfaced by the rules engine.
///
/// Every variant except `MissingKing` is a rejected request: the position is
/// left exactly as it was. `MissingKing` means the position itself is corrupt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("square {0} is off the board")]
    OutOfBounds(Square),

    #[error("no piece of the side to move on {0}")]
    NotYourPiece(Square),

    #[error("{to} is not a legal destination for the piece on {from}")]
    NotALegalDestination { from: Square, to: Square },

    #[error("the game is over, {0} has won")]
    GameAlreadyOver(Color),

    #[error("pawn reaching {0} must name a promotion piece")]
    PromotionRequired(Square),

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("cannot parse move {0:?}")]
    InvalidNotation(String),

    #[error("nothing to undo")]
    NothingToUndo,
}

pub type ChessResult<T> = Result<T, ChessError>;
