//! Play CLI
//!
//! Play the chess bot in a terminal. The game is saved after every move and
//! resumed on the next start if the save is recent enough.

mod board;
mod command;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_core::{color_name, Difficulty};
use chrono::Utc;
use session::{
    load_saved_game, save_game, FileStore, GameSession, SessionConfig, TurnOutcome,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};

fn print_usage() {
    println!("Chess bot");
    println!();
    println!("Usage:");
    println!("  play [--config PATH] [--level LEVEL] [--fresh]");
    println!();
    println!("Options:");
    println!("  --config PATH   TOML settings file");
    println!("  --level LEVEL   easy, medium, hard or expert");
    println!("  --fresh         ignore any saved game");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    level: Option<Difficulty>,
    fresh: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.get(i).context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--level" => {
                i += 1;
                let level = args.get(i).context("--level needs a value")?;
                parsed.level = Some(level.parse().map_err(anyhow::Error::msg)?);
            }
            "--fresh" => parsed.fresh = true,
            "help" | "--help" | "-h" => parsed.help = true,
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(parsed)
}

/// Whose turn it is and whether they are in check, or the result.
fn status_line(game: &GameSession) -> String {
    if game.result().is_over() {
        return format!("Game over: {}", game.result());
    }
    let check = if game.position().is_check() { ", check" } else { "" };
    format!(
        "{} to move{check} ({} vs {})",
        color_name(game.position().side_to_move()),
        game.difficulty(),
        game.engine_name()
    )
}

/// Prints the board and the status line.
fn show(game: &GameSession) {
    let highlight: Vec<_> = game
        .last_move()
        .map(|m| vec![m.mv.from, m.landing_square()])
        .unwrap_or_default();
    println!();
    print!("{}", board::render(game.position(), &highlight));
    println!("{}", status_line(game));
}

fn save(game: &GameSession, store: &mut FileStore) {
    if let Err(err) = save_game(store, &game.snapshot()) {
        warn!(%err, "could not save the game");
    }
}

/// Lets the bot answer if it is its turn.
async fn bot_reply(game: &mut GameSession, store: &mut FileStore) {
    if !game.is_bot_turn() {
        return;
    }
    println!("{} is thinking...", game.engine_name());
    match game.bot_turn().await {
        TurnOutcome::Moved(info) => {
            println!("Bot plays {}", info.san);
            save(game, store);
        }
        TurnOutcome::Skipped => println!("The bot passes this turn."),
        TurnOutcome::Ignored | TurnOutcome::GameOver(_) => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let mut store = FileStore::new(config.save_path.clone());
    let max_age = config.save_max_age();
    let mut game = GameSession::new(config);

    if !args.fresh {
        if let Some(saved) = load_saved_game(&mut store, Utc::now(), max_age) {
            game.restore(&saved)?;
            println!("Resuming your saved game ({} moves).", saved.move_history.len());
        }
    }
    if let Some(level) = args.level {
        game.set_difficulty(level);
    }

    println!("{HELP}");
    show(&game);
    bot_reply(&mut game, &mut store).await;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        match cmd {
            Command::Move(text) => match game.play_text(&text) {
                Ok(info) => {
                    println!("You play {}", info.san);
                    save(&game, &mut store);
                    bot_reply(&mut game, &mut store).await;
                    show(&game);
                }
                Err(err) => println!("{err}"),
            },
            Command::NewGame => {
                game.new_game();
                save(&game, &mut store);
                show(&game);
                bot_reply(&mut game, &mut store).await;
            }
            Command::Level(level) => {
                game.set_difficulty(level);
                println!("Level set to {level}.");
                save(&game, &mut store);
                bot_reply(&mut game, &mut store).await;
            }
            Command::Mode(mode) => {
                game.set_mode(mode);
                save(&game, &mut store);
                bot_reply(&mut game, &mut store).await;
            }
            Command::Board => show(&game),
            Command::Moves => {
                for (i, pair) in game.moves().chunks(2).enumerate() {
                    let black = pair.get(1).map(|m| m.san.as_str()).unwrap_or("");
                    println!("{:>3}. {:<8} {}", i + 1, pair[0].san, black);
                }
            }
            Command::Hint(sq) => {
                let targets: Vec<String> = game
                    .legal_targets(sq)
                    .into_iter()
                    .map(chess_core::square_name)
                    .collect();
                if targets.is_empty() {
                    println!("No legal moves from there.");
                } else {
                    println!("{}", targets.join(" "));
                }
            }
            Command::Resign => match game.resign() {
                Ok(result) => {
                    println!("{result}");
                    save(&game, &mut store);
                }
                Err(err) => println!("{err}"),
            },
            Command::Save => {
                save(&game, &mut store);
                println!("Saved to {}.", store.path().display());
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}
