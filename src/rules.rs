use log::debug;

use crate::board::{Color, Piece, PieceKind, Position, Square};
use crate::error::{ChessError, ChessResult};
use crate::movegen::{Move, MoveGenerator};

/// Everything `Position::unmake` needs to restore the position that existed
/// before `Position::make`.
///
/// Indices refer to the piece list after the capture was removed, so restore
/// in-place edits first and re-insert the captured piece last.
#[derive(Debug, Clone, PartialEq)]
pub struct Undo {
    pub mv: Move,
    mover_index: usize,
    mover_before: Piece,
    captured: Option<(usize, Piece)>,
    rook: Option<(usize, Piece)>,
    captured_len: usize,
    en_passant_target: Option<Square>,
    winner: Option<Color>,
    in_check: bool,
    active_color: Color,
}

impl Position {
    /// Validates and plays a move for the side to move.
    ///
    /// On error the position is untouched. `promotion` is required when a
    /// pawn reaches the last rank and ignored otherwise.
    pub fn apply_move(
        &mut self,
        source: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Undo> {
        let mv = self.validate(source, destination, promotion)?;
        self.make(mv, true)
    }

    fn validate(
        &self,
        source: Square,
        destination: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<Move> {
        if let Some(winner) = self.winner {
            return Err(ChessError::GameAlreadyOver(winner));
        }
        for square in [source, destination] {
            if !square.is_on_board() {
                return Err(ChessError::OutOfBounds(square));
            }
        }
        let piece = match self.piece_at(source) {
            Some(piece) if piece.color == self.active_color => *piece,
            _ => return Err(ChessError::NotYourPiece(source)),
        };
        if !MoveGenerator::new().legal_moves(self, source).contains(&destination) {
            return Err(ChessError::NotALegalDestination {
                from: source,
                to: destination,
            });
        }

        let promotes =
            piece.kind == PieceKind::Pawn && destination.row() == piece.color.promotion_row();
        if !promotes {
            return Ok(Move::new(source, destination));
        }
        match promotion {
            None => Err(ChessError::PromotionRequired(destination)),
            Some(kind) if !kind.is_promotion_target() => Err(ChessError::InvalidPromotion(kind)),
            Some(kind) => Ok(Move::new_promotion(source, destination, kind)),
        }
    }

    /// Plays an already validated move and returns the record that reverses
    /// it. With `detect_mate` set a check against the new side to move is
    /// followed by a search for any escaping reply.
    pub(crate) fn make(&mut self, mv: Move, detect_mate: bool) -> ChessResult<Undo> {
        self.king_square(Color::White)?;
        self.king_square(Color::Black)?;

        let mover_color = self.active_color;
        let captured_len = self.captured.len();
        let before_flags = (self.en_passant_target, self.winner, self.in_check);

        let mover_index = self.index_of(mv.source).ok_or(ChessError::NotYourPiece(mv.source))?;
        let mover_before = self.pieces[mover_index];

        // The victim normally sits on the destination. An en passant victim
        // sits on the target square beside the mover instead.
        let victim_square = match self.en_passant_target {
            Some(target)
                if mover_before.kind == PieceKind::Pawn
                    && target.col() == mv.destination.col()
                    && target.row() == mv.source.row()
                    && self.piece_at(mv.destination).is_none() =>
            {
                target
            }
            _ => mv.destination,
        };
        let captured = match self.index_of(victim_square) {
            Some(index) if self.pieces[index].color != mover_color => {
                let victim = self.pieces.remove(index);
                self.captured.push(victim);
                if victim.kind == PieceKind::King {
                    self.winner = Some(mover_color);
                }
                Some((index, victim))
            }
            _ => None,
        };

        self.en_passant_target = None;

        let mut rook = None;
        let castle_step = mv.destination.col() - mv.source.col();
        if mover_before.kind == PieceKind::King && castle_step.abs() == 2 {
            let step = castle_step.signum();
            let rook_index = self.pieces.iter().position(|p| {
                p.kind == PieceKind::Rook
                    && p.color == mover_color
                    && !p.has_moved
                    && p.square.row() == mv.source.row()
                    && (p.square.col() - mv.source.col()).signum() == step
            });
            if let Some(index) = rook_index {
                rook = Some((index, self.pieces[index]));
                let landing = mv.destination.offset(0, -step);
                let castled = &mut self.pieces[index];
                castled.square = landing;
                castled.has_moved = true;
            }
        }

        // Index may have shifted if the victim stood before the mover.
        let mover_index = self.index_of(mv.source).ok_or(ChessError::NotYourPiece(mv.source))?;
        let moved = &mut self.pieces[mover_index];
        moved.square = mv.destination;
        moved.has_moved = true;

        if let Some(kind) = mv.promotion {
            let last_rank = mv.destination.row() == moved.color.promotion_row();
            if moved.kind == PieceKind::Pawn && last_rank {
                let pawn = *moved;
                self.captured.push(pawn);
                self.pieces[mover_index] = Piece {
                    kind,
                    color: pawn.color,
                    square: mv.destination,
                    has_moved: true,
                };
            }
        }

        let double_step = (mv.destination.row() - mv.source.row()).abs() == 2;
        if mover_before.kind == PieceKind::Pawn && double_step {
            self.en_passant_target = Some(mv.destination);
        }

        let undo = Undo {
            mv,
            mover_index,
            mover_before,
            captured,
            rook,
            captured_len,
            en_passant_target: before_flags.0,
            winner: before_flags.1,
            in_check: before_flags.2,
            active_color: mover_color,
        };

        self.in_check = false;
        let king_taken = captured.map_or(false, |(_, victim)| victim.kind == PieceKind::King);
        if !king_taken && self.winner.is_none() {
            let defender = mover_color.opposite();
            let king = self.king_square(defender)?;
            self.in_check = MoveGenerator::new().is_square_attacked(self, king, defender);
        }
        self.active_color = mover_color.opposite();

        if self.in_check && detect_mate && self.is_checkmated()? {
            debug!("{} is checkmated", self.active_color);
            self.winner = Some(mover_color);
        }

        Ok(undo)
    }

    /// Reverses a `make`. `undo` must come from the most recent `make` on
    /// this position.
    pub(crate) fn unmake(&mut self, undo: Undo) {
        self.pieces[undo.mover_index] = undo.mover_before;
        if let Some((index, rook)) = undo.rook {
            self.pieces[index] = rook;
        }
        if let Some((index, victim)) = undo.captured {
            // Removal happened before the mover index was recorded.
            self.pieces.insert(index, victim);
        }
        self.captured.truncate(undo.captured_len);
        self.en_passant_target = undo.en_passant_target;
        self.winner = undo.winner;
        self.in_check = undo.in_check;
        self.active_color = undo.active_color;
    }

    // Tries every reply of the checked side to move; mate if none leaves its
    // king unattacked.
    fn is_checkmated(&mut self) -> ChessResult<bool> {
        let defender = self.active_color;
        let generator = MoveGenerator::new();
        for reply in generator.generate_moves(self) {
            let undo = self.make(reply, false)?;
            let escaped = match self.winner {
                Some(winner) => winner == defender,
                None => {
                    let king = self.king_square(defender)?;
                    !generator.is_square_attacked(self, king, defender)
                }
            };
            self.unmake(undo);
            if escaped {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// No winner, no check and nothing to play.
    pub fn is_stalemate(&self) -> bool {
        self.winner.is_none()
            && !self.in_check
            && MoveGenerator::new().generate_moves(self).is_empty()
    }

    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        MoveGenerator::new().legal_moves(self, square)
    }
}
