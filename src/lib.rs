pub mod board;
pub mod config;
pub mod console;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod player;
pub mod rules;
pub mod search;

pub use board::{Color, Occupancy, Piece, PieceKind, Position, Square};
pub use error::{ChessError, ChessResult};
pub use movegen::Move;
pub use notation::notation;
pub use search::{Search, SearchOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::MoveGenerator;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    fn play(board: &mut Position, moves: &[&str]) {
        for text in moves {
            let mv: Move = text.parse().unwrap();
            board.apply_move(mv.source, mv.destination, mv.promotion).unwrap();
        }
    }

    fn kings_only(active: Color) -> Position {
        let mut board = Position::empty(active);
        board.place(Piece::new(PieceKind::King, Color::White, sq(7, 4)));
        board.place(Piece::new(PieceKind::King, Color::Black, sq(0, 4)));
        board
    }

    #[test]
    fn test_initial_position() {
        let board = Position::new();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board);

        // 16 pawn moves and 4 knight moves
        assert_eq!(moves.len(), 20);
        let knight_moves = moves
            .iter()
            .filter(|mv| board.piece_at(mv.source).map(|p| p.kind) == Some(PieceKind::Knight))
            .count();
        assert_eq!(knight_moves, 4);
    }

    #[test]
    fn test_perft_initial_position() {
        let board = Position::new();
        let generator = MoveGenerator::new();

        assert_eq!(perft(&board, &generator, 1), 20);
        assert_eq!(perft(&board, &generator, 2), 400);
    }

    fn perft(board: &Position, generator: &MoveGenerator, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = generator.generate_moves(board);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        let mut scratch = board.clone();
        for mv in moves {
            let undo = scratch.make(mv, true).unwrap();
            nodes += perft(&scratch, generator, depth - 1);
            scratch.unmake(undo);
        }

        nodes
    }

    #[test]
    fn test_en_passant_window() {
        let mut board = Position::new();
        // a black pawn walks to D4 while White shuffles a knight
        play(&mut board, &["G1-F3", "D7-D5", "F3-G1", "D5-D4", "G1-F3", "A7-A6", "E2-E4"]);
        assert_eq!(board.en_passant_target(), Some(sq(4, 4)));

        let targets = board.legal_moves(sq(4, 3));
        assert!(targets.contains(&sq(5, 4)));
        assert_eq!(targets.len(), 2); // D3 push and E3 en passant

        board.apply_move(sq(4, 3), sq(5, 4), None).unwrap();
        assert!(board.piece_at(sq(4, 4)).is_none());
        assert_eq!(board.piece_at(sq(5, 4)).map(|p| p.color), Some(Color::Black));
        let captured = board.captured().last().copied().unwrap();
        assert_eq!(
            (captured.kind, captured.color, captured.square),
            (PieceKind::Pawn, Color::White, sq(4, 4))
        );
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn test_en_passant_expires_after_one_ply() {
        let mut board = Position::new();
        play(&mut board, &["G1-F3", "D7-D5", "F3-G1", "D5-D4", "E2-E4", "H7-H6", "H2-H3"]);
        assert_eq!(board.en_passant_target(), None);
        assert!(!board.legal_moves(sq(4, 3)).contains(&sq(5, 4)));
    }

    #[test]
    fn test_kingside_castling() {
        let mut board = Position::new();
        play(&mut board, &["E2-E4", "E7-E5", "G1-F3", "B8-C6", "F1-C4", "G8-F6"]);
        assert!(board.legal_moves(sq(7, 4)).contains(&sq(7, 6)));

        board.apply_move(sq(7, 4), sq(7, 6), None).unwrap();
        let king = board.piece_at(sq(7, 6)).copied().unwrap();
        let rook = board.piece_at(sq(7, 5)).copied().unwrap();
        assert_eq!(king.kind, PieceKind::King);
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(king.has_moved && rook.has_moved);
        assert!(board.piece_at(sq(7, 7)).is_none());
    }

    #[test]
    fn test_castling_blocked_by_attacked_square() {
        let mut board = kings_only(Color::White);
        board.place(Piece::new(PieceKind::Rook, Color::White, sq(7, 7)));
        board.place(Piece::new(PieceKind::Rook, Color::White, sq(7, 0)));
        board.place(Piece::new(PieceKind::Rook, Color::Black, sq(2, 5)));

        let targets = board.legal_moves(sq(7, 4));
        assert!(!targets.contains(&sq(7, 6)), "king may not pass through F1");
        assert!(targets.contains(&sq(7, 2)));

        // king's own square under attack blocks both sides
        board.place(Piece::new(PieceKind::Rook, Color::Black, sq(2, 4)));
        let targets = board.legal_moves(sq(7, 4));
        assert!(!targets.contains(&sq(7, 6)));
        assert!(!targets.contains(&sq(7, 2)));
    }

    #[test]
    fn test_castling_lost_after_rook_moves() {
        let mut board = kings_only(Color::White);
        board.place(Piece::new(PieceKind::Rook, Color::White, sq(7, 7)));
        board.place(Piece::new(PieceKind::Pawn, Color::Black, sq(1, 0)));
        assert!(board.legal_moves(sq(7, 4)).contains(&sq(7, 6)));

        play(&mut board, &["H1-H2", "A7-A6", "H2-H1", "A6-A5"]);
        assert!(!board.legal_moves(sq(7, 4)).contains(&sq(7, 6)));
    }

    #[test]
    fn test_castling_lost_after_king_moves() {
        let mut board = kings_only(Color::White);
        board.place(Piece::new(PieceKind::Rook, Color::White, sq(7, 7)));
        board.place(Piece::new(PieceKind::Pawn, Color::Black, sq(1, 0)));

        play(&mut board, &["E1-D1", "A7-A6", "D1-E1", "A6-A5"]);
        assert!(!board.legal_moves(sq(7, 4)).contains(&sq(7, 6)));
    }

    #[test]
    fn test_promotion() {
        let mut board = kings_only(Color::White);
        board.place(Piece::new(PieceKind::Pawn, Color::White, sq(1, 0)));

        assert_eq!(
            board.apply_move(sq(1, 0), sq(0, 0), None),
            Err(ChessError::PromotionRequired(sq(0, 0)))
        );
        assert_eq!(
            board.apply_move(sq(1, 0), sq(0, 0), Some(PieceKind::King)),
            Err(ChessError::InvalidPromotion(PieceKind::King))
        );

        board.apply_move(sq(1, 0), sq(0, 0), Some(PieceKind::Queen)).unwrap();
        let queen = board.piece_at(sq(0, 0)).copied().unwrap();
        assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
        assert!(queen.has_moved);
        let pawn = board.captured().last().copied().unwrap();
        assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
        // the new queen checks along the back rank
        assert!(board.in_check());
    }

    #[test]
    fn test_fools_mate() {
        let mut board = Position::new();
        play(&mut board, &["F2-F3", "E7-E5", "G2-G4"]);
        assert!(board.winner().is_none());

        play(&mut board, &["D8-H4"]);
        assert!(board.in_check());
        assert_eq!(board.winner(), Some(Color::Black));
        assert_eq!(board.piece_at(sq(7, 4)).map(|p| p.kind), Some(PieceKind::King));
    }

    #[test]
    fn test_check_without_mate() {
        let mut board = Position::new();
        play(&mut board, &["E2-E4", "F7-F6", "D1-H5"]);
        assert!(board.in_check());
        assert!(board.winner().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Position::new();
        play(&mut original, &["E2-E4"]);
        let snapshot = original.clone();

        let mut copy = original.clone();
        play(&mut copy, &["D7-D5", "E4-D5"]);
        copy.winner = Some(Color::White);

        assert_eq!(original, snapshot);
        assert_eq!(original.pieces().len(), 32);
        assert_eq!(original.en_passant_target(), Some(sq(4, 4)));
        assert_eq!(original.active_color(), Color::Black);
        assert!(original.winner().is_none());
    }

    #[test]
    fn test_engine_moves_are_always_accepted() {
        let mut board = Position::new();
        let mut search = Search::with_seed(2024);
        for _ in 0..6 {
            let outcome = search.best_move(&board, 0).unwrap();
            let Some(mv) = outcome.best_move else { break };
            board.apply_move(mv.source, mv.destination, mv.promotion).unwrap();
            if board.winner().is_some() {
                break;
            }
        }
        assert_eq!(board.pieces().len() + board.captured().len(), 32);
    }
}
