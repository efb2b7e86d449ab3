use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::{debug, info, warn};

use crate::board::Color;
use crate::config::GameConfig;
use crate::game::Game;
use crate::movegen::Move;
use crate::player::Player;

const HELP: &str = "\
commands:
  E2-E4 | e2e4 | E7-E8=Q   play a move
  moves E2                 list destinations from a square
  go                       let the engine move for the side to move
  undo                     take back your last move and the reply
  board                    show the position
  quit
";

/// Line-oriented front end: reads commands, drives the engines, prints the
/// board.
pub struct ConsoleHandler {
    game: Game,
    white: Option<Box<dyn Player>>,
    black: Option<Box<dyn Player>>,
}

impl ConsoleHandler {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_game(config, Game::new())
    }

    pub fn with_game(config: &GameConfig, game: Game) -> Self {
        // Distinct streams per side so two seeded engines do not mirror each other.
        let seed_for = |offset: u64| config.seed.map(|seed| seed.wrapping_add(offset));
        ConsoleHandler {
            game,
            white: config.white.build(seed_for(0)),
            black: config.black.build(seed_for(1)),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        print!("{}", self.game.position());
        if self.is_engine_turn() && !self.is_human(self.game.active_color().opposite()) {
            println!("type `go` to let the engines play");
        } else if self.is_engine_turn() {
            print!("{}", self.engine_move()?);
        }
        stdout.flush()?;

        while reader.read_line(&mut line)? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }
            let response = self.handle_command(command)?;
            print!("{}", response);
            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok("".to_string());
        }

        match parts[0] {
            "help" => Ok(HELP.to_string()),
            "board" => Ok(self.game.position().to_string()),
            "moves" => Ok(self.handle_moves(&parts[1..])),
            "undo" => Ok(self.handle_undo()),
            "go" => self.engine_move(),
            "quit" => Ok("".to_string()),
            _ => self.handle_human_move(command),
        }
    }

    fn handle_moves(&self, parts: &[&str]) -> String {
        let square = match parts.first().map(|s| s.parse()) {
            Some(Ok(square)) => square,
            _ => return "usage: moves E2\n".to_string(),
        };
        let targets: Vec<String> = self
            .game
            .legal_moves(square)
            .iter()
            .map(|sq| sq.to_string())
            .collect();
        format!("{}: {}\n", square, targets.join(" "))
    }

    fn handle_undo(&mut self) -> String {
        let to_move = self.game.active_color();
        let result = if self.is_human(to_move) && !self.is_human(to_move.opposite()) {
            self.game.undo_turn()
        } else {
            self.game.undo().map(|_| ())
        };
        match result {
            Ok(()) => self.game.position().to_string(),
            Err(err) => format!("{}\n", err),
        }
    }

    fn handle_human_move(&mut self, text: &str) -> Result<String> {
        if self.game.is_stalemate() {
            return Ok(self.stalemate_message());
        }
        if self.is_engine_turn() {
            return Ok("it is the engine's turn, type `go`\n".to_string());
        }
        let mv: Move = match text.parse() {
            Ok(mv) => mv,
            Err(err) => return Ok(format!("{}\n", err)),
        };
        if let Err(err) = self.game.play(mv) {
            debug!("rejected {}: {}", text, err);
            return Ok(format!("{}\n", err));
        }

        let mut response = self.report(mv);
        if self.is_engine_turn() && !self.game.is_over() {
            response.push_str(&self.engine_move()?);
        }
        Ok(response)
    }

    fn engine_move(&mut self) -> Result<String> {
        if let Some(winner) = self.game.winner() {
            return Ok(format!("game over, {} won\n", winner));
        }
        if self.game.is_stalemate() {
            return Ok(self.stalemate_message());
        }
        let color = self.game.active_color();
        let position = self.game.position().clone();
        let player = match color {
            Color::White => self.white.as_mut(),
            Color::Black => self.black.as_mut(),
        };
        let Some(player) = player else {
            return Ok("it is your turn\n".to_string());
        };

        match player.choose_move(&position)? {
            Some(mv) => {
                info!("{} ({}) plays {}", color, player.name(), mv);
                self.game.play(mv)?;
                Ok(self.report(mv))
            }
            None => {
                warn!("{} ({}) found no move", color, player.name());
                Ok(format!("{} has no move to play\n", color))
            }
        }
    }

    fn report(&self, mv: Move) -> String {
        let mut out = format!("{}\n{}", mv, self.game.position());
        if let Some(winner) = self.game.winner() {
            out.push_str(&format!("{} won!!!\n", winner));
        } else if self.game.in_check() {
            out.push_str("Check!\n");
        } else if self.game.is_stalemate() {
            out.push_str(&self.stalemate_message());
        }
        out
    }

    fn stalemate_message(&self) -> String {
        format!("game over, {} is stalemated\n", self.game.active_color())
    }

    fn is_human(&self, color: Color) -> bool {
        match color {
            Color::White => self.white.is_none(),
            Color::Black => self.black.is_none(),
        }
    }

    fn is_engine_turn(&self) -> bool {
        !self.is_human(self.game.active_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, PieceKind, Position, Square};
    use crate::config::PlayerConfig;

    fn human_vs_greedy() -> ConsoleHandler {
        let config = GameConfig {
            white: PlayerConfig::Human,
            black: PlayerConfig::Greedy,
            seed: Some(7),
        };
        ConsoleHandler::new(&config)
    }

    #[test]
    fn test_human_move_gets_a_reply() {
        let mut console = human_vs_greedy();
        let response = console.handle_command("E2-E4").unwrap();
        assert!(response.starts_with("E2-E4\n"));
        assert_eq!(console.game().moves_played().count(), 2);
        assert_eq!(console.game().active_color(), Color::White);
    }

    #[test]
    fn test_bad_input_is_reported_not_fatal() {
        let mut console = human_vs_greedy();
        assert!(console.handle_command("E2-E5").unwrap().contains("not a legal destination"));
        assert!(console.handle_command("hello").unwrap().contains("cannot parse"));
        assert_eq!(console.game().moves_played().count(), 0);
    }

    #[test]
    fn test_undo_takes_back_the_whole_turn() {
        let mut console = human_vs_greedy();
        console.handle_command("d2d4").unwrap();
        console.handle_command("undo").unwrap();
        assert_eq!(console.game().position(), &Position::new());
        assert!(console.handle_command("undo").unwrap().contains("nothing to undo"));
    }

    #[test]
    fn test_moves_lists_destinations() {
        let mut console = human_vs_greedy();
        assert_eq!(console.handle_command("moves G1").unwrap(), "G1: F3 H3\n");
    }

    #[test]
    fn test_engines_play_one_ply_per_go() {
        let config = GameConfig::engine_vs_engine(
            PlayerConfig::Random,
            PlayerConfig::Minimax { depth: 0 },
            Some(3),
        );
        let mut console = ConsoleHandler::new(&config);
        assert!(console.handle_command("E2-E4").unwrap().contains("engine's turn"));
        console.handle_command("go").unwrap();
        console.handle_command("go").unwrap();
        assert_eq!(console.game().moves_played().count(), 2);
    }

    #[test]
    fn test_stalemate_ends_the_game() {
        let mut board = Position::empty(Color::Black);
        board.place(Piece::new(PieceKind::King, Color::White, Square::new(0, 7)));
        board.place(Piece::new(PieceKind::King, Color::Black, Square::new(7, 0)));
        board.place(Piece::new(PieceKind::Pawn, Color::Black, Square::new(7, 1)));
        board.place(Piece::new(PieceKind::Pawn, Color::Black, Square::new(6, 0)));
        board.place(Piece::new(PieceKind::Pawn, Color::Black, Square::new(6, 1)));
        let game = Game::from_position(board);
        let mut console = ConsoleHandler::with_game(&GameConfig::default(), game);

        assert!(console.game().is_over());
        let stalemated = "game over, black is stalemated\n";
        for _ in 0..3 {
            assert_eq!(console.handle_command("go").unwrap(), stalemated);
        }
        assert_eq!(console.handle_command("H8-G8").unwrap(), stalemated);
        assert_eq!(console.game().moves_played().count(), 0);
    }
}
