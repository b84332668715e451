//! Commands typed at the prompt

use chess_core::{parse_square, Difficulty, Square};
use session::GameMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a keyword is tried as a move
    Move(String),
    NewGame,
    Level(Difficulty),
    Mode(GameMode),
    Board,
    Moves,
    Hint(Square),
    Resign,
    Save,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = parts.first() else {
            return Ok(None);
        };
        let arg = parts.get(1).copied();

        let cmd = match first.to_lowercase().as_str() {
            "new" => Command::NewGame,
            "level" => {
                let level = arg.ok_or("usage: level <easy|medium|hard|expert>")?;
                Command::Level(level.parse()?)
            }
            "mode" => match arg {
                Some("bot") => Command::Mode(GameMode::VsBot),
                Some("friend") => Command::Mode(GameMode::TwoPlayer),
                _ => return Err("usage: mode <bot|friend>".to_string()),
            },
            "board" => Command::Board,
            "moves" => Command::Moves,
            "hint" => {
                let sq = arg.and_then(parse_square).ok_or("usage: hint <square>")?;
                Command::Hint(sq)
            }
            "resign" => Command::Resign,
            "save" => Command::Save,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Move(first.to_string()),
        };
        Ok(Some(cmd))
    }
}

pub const HELP: &str = "\
Commands:
  e2e4, e7e8q        play a move in coordinate notation
  new                start a new game
  level <name>       easy, medium, hard or expert
  mode <bot|friend>  play the bot or pass the board to a friend
  board              show the board
  moves              list the moves played so far
  hint <square>      legal destinations of the piece on a square
  resign             give up the game
  save               save now (also done after every move)
  quit               leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("new").unwrap(), Some(Command::NewGame));
        assert_eq!(
            Command::parse("level Expert").unwrap(),
            Some(Command::Level(Difficulty::Expert))
        );
        assert_eq!(
            Command::parse("mode friend").unwrap(),
            Some(Command::Mode(GameMode::TwoPlayer))
        );
        assert_eq!(Command::parse("hint g1").unwrap(), Some(Command::Hint(Square::G1)));
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_anything_else_is_a_move() {
        assert_eq!(
            Command::parse("e2e4").unwrap(),
            Some(Command::Move("e2e4".to_string()))
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert!(Command::parse("level").is_err());
        assert!(Command::parse("level grandmaster").is_err());
        assert!(Command::parse("mode solo").is_err());
        assert!(Command::parse("hint z9").is_err());
    }
}
