use crate::config::Config;
use crate::ui::{clear_screen, display_game};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;
use tracing::{debug, info};
use tris_common::{Board, GameSession};

/// What the player typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(usize),
    Reset,
    Quit,
}

/// Parse a prompt line: `1`-`9` in reading order, `row col` (0-indexed),
/// `r` to reset or `q` to quit.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim().to_lowercase();
    match trimmed.as_str() {
        "q" | "quit" => return Some(Command::Quit),
        "r" | "reset" => return Some(Command::Reset),
        _ => {}
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.as_slice() {
        [cell] => match cell.parse::<usize>() {
            Ok(n @ 1..=9) => Some(Command::Play(n - 1)),
            _ => None,
        },
        [row, col] => {
            let (row, col) = (row.parse::<usize>().ok()?, col.parse::<usize>().ok()?);
            Board::coords_to_index(row, col).map(Command::Play)
        }
        _ => None,
    }
}

fn read_command(rl: &mut DefaultEditor) -> io::Result<Command> {
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                if let Some(command) = parse_command(&line) {
                    return Ok(command);
                }
                debug!(input = %line.trim(), "unparsable input");
                println!("{}", "Invalid input. Enter a cell 1-9 or 'row col', r to reset, q to quit:".red());
            }
            Err(ReadlineError::Interrupted) => {
                // CTRL+C pressed - ignore it and continue the loop
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(Command::Quit),
            Err(e) => return Err(io::Error::other(e)),
        }
    }
}

pub async fn run_game_loop(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use rustyline::config::Configurer;

    let mut rl = DefaultEditor::new()?;
    rl.set_max_history_size(0)?;

    let mut session = GameSession::new();
    let mut notice: Option<String> = None;
    info!("new game");

    loop {
        clear_screen()?;
        display_game(session.state());

        if let Some(msg) = notice.take() {
            println!("\n{}", msg.yellow());
        }
        if session.state().is_finished() {
            println!("\n{}", "Press r to play again, q to quit".dimmed());
        }

        match read_command(&mut rl)? {
            Command::Quit => {
                info!(moves = session.state().move_count(), "player quit");
                return Ok(());
            }
            Command::Reset => session.reset(),
            Command::Play(_) if session.state().is_finished() => {
                notice = Some("The game is over. Press r to play again.".to_string());
            }
            Command::Play(index) => {
                if !session.play_human(index) {
                    notice = Some(format!("Cell {} is already taken.", index + 1));
                    continue;
                }
                if session.state().is_finished() {
                    continue;
                }

                clear_screen()?;
                display_game(session.state());
                tokio::time::sleep(config.computer_delay()).await;

                // The game may have ended while we were waiting
                session.play_computer();
            }
        }
    }
}
