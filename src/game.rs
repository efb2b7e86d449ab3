use log::info;

use crate::board::{Color, Occupancy, PieceKind, Position, Square};
use crate::error::{ChessError, ChessResult};
use crate::movegen::Move;
use crate::rules::Undo;

/// The live game: one position plus the record needed to take moves back.
///
/// This is the only owner of the live position. Engines receive a shared
/// reference and search their own copies.
#[derive(Debug, Clone, Default)]
pub struct Game {
    position: Position,
    history: Vec<Undo>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        self.position.legal_moves(square)
    }

    pub fn report(&self, square: Square, color: Color) -> Occupancy {
        self.position.report(square, color)
    }

    pub fn winner(&self) -> Option<Color> {
        self.position.winner()
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check()
    }

    pub fn active_color(&self) -> Color {
        self.position.active_color()
    }

    /// Drawn: the side to move is not in check and has nothing to play.
    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.is_stalemate()
    }

    pub fn apply_move(
        &mut self,
        source: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<()> {
        let undo = self.position.apply_move(source, destination, promotion)?;
        info!("{}", undo.mv);
        match self.position.winner() {
            Some(winner) => info!("{} won", winner),
            None if self.position.in_check() => info!("check"),
            None => {}
        }
        self.history.push(undo);
        Ok(())
    }

    pub fn play(&mut self, mv: Move) -> ChessResult<()> {
        self.apply_move(mv.source, mv.destination, mv.promotion)
    }

    /// Takes back the last ply.
    pub fn undo(&mut self) -> ChessResult<Move> {
        let undo = self.history.pop().ok_or(ChessError::NothingToUndo)?;
        let mv = undo.mv;
        self.position.unmake(undo);
        Ok(mv)
    }

    /// Takes back a full turn: the last move and the reply before it.
    pub fn undo_turn(&mut self) -> ChessResult<()> {
        if self.history.len() < 2 {
            return Err(ChessError::NothingToUndo);
        }
        self.undo()?;
        self.undo()?;
        Ok(())
    }

    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|undo| undo.mv)
    }
}
