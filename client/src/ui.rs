use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal,
};
use std::io::{self, Write};
use std::time::Duration;
use tris_common::{Cell, GameState, Phase, Player};

/// Total length of the start screen split animation
const SPLIT_DURATION: Duration = Duration::from_millis(800);
const SPLIT_FRAMES: u32 = 4;

const CIRCLE: [&str; 7] = [
    "      ▄▄▀▀▀▀▀▄▄      ",
    "    ▄▀         ▀▄    ",
    "   █             █   ",
    "   █     tris    █   ",
    "   █             █   ",
    "    ▀▄         ▄▀    ",
    "      ▀▀▄▄▄▄▄▀▀      ",
];

pub fn clear_screen() -> io::Result<()> {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush()?;
    Ok(())
}

/// Run `body`, then `cleanup` whether or not `body` failed
fn finally<T>(
    body: impl FnOnce() -> io::Result<T>,
    cleanup: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = body();
    let cleaned = cleanup();
    let value = result?;
    cleaned?;
    Ok(value)
}

fn read_keypress() -> io::Result<()> {
    // Clear any buffered input
    while event::poll(Duration::from_millis(10))? {
        event::read()?;
    }

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Ignore CTRL+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    continue;
                }
                return Ok(());
            }
        }
    }
}

/// Raw mode is switched back off even when reading the terminal fails
pub fn wait_for_keypress() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    finally(read_keypress, terminal::disable_raw_mode)
}

/// Circle that splits in two once a key is pressed
pub async fn show_start_screen() -> io::Result<()> {
    clear_screen()?;
    println!();
    for line in CIRCLE {
        println!("  {}", line.bright_cyan());
    }
    println!("\n  {}", "Press any key to start".dimmed());
    wait_for_keypress()?;

    for frame in 1..=SPLIT_FRAMES {
        clear_screen()?;
        println!();
        let gap = " ".repeat(frame as usize * 3);
        for line in CIRCLE {
            let mid = line.chars().count() / 2;
            let left: String = line.chars().take(mid).collect();
            let right: String = line.chars().skip(mid).collect();
            println!("  {}{gap}{}", left.bright_cyan(), right.bright_cyan());
        }
        tokio::time::sleep(SPLIT_DURATION / SPLIT_FRAMES).await;
    }
    Ok(())
}

/// Headline and bottom line shown under the board
pub fn status_text(state: &GameState) -> (&'static str, &'static str) {
    match state.phase().winner() {
        Some(Player::Human) => ("you won", "a prize"),
        Some(Player::Computer) => ("Computer Wins!", ""),
        None if state.phase() == Phase::Drawn => ("It's a Draw!", "It's a Draw!"),
        None => match state.active_player() {
            Player::Human => ("Your turn!", ""),
            Player::Computer => ("Computer's turn...", ""),
        },
    }
}

pub fn render_board(state: &GameState) -> String {
    let board = state.board();
    let winning = board.winning_line();
    let mut out = String::new();

    for row in 0..3 {
        out.push_str("    ");
        for col in 0..3 {
            let idx = row * 3 + col;
            let symbol = match board.cells()[idx] {
                Cell::Empty => (idx + 1).to_string().dimmed(),
                Cell::Human => Player::Human.symbol().to_string().green().bold(),
                Cell::Computer => Player::Computer.symbol().to_string().red().bold(),
            };
            let symbol = if winning.is_some_and(|line| line.contains(&idx)) {
                symbol.reversed()
            } else {
                symbol
            };
            let pipe = if col != 2 { "│" } else { "" };
            out.push_str(&format!(" {symbol} {pipe}"));
        }
        out.push('\n');
        if row < 2 {
            out.push_str("    ───┼───┼───\n");
        }
    }
    out
}

pub fn display_game(state: &GameState) {
    println!("\n{}\n", "─── Tic Tac Toe ───".bold());
    print!("{}", render_board(state));

    let (top, bottom) = status_text(state);
    println!();
    match state.phase() {
        Phase::Won(Player::Human) => println!("{}", top.green().bold()),
        Phase::Won(Player::Computer) => println!("{}", top.red().bold()),
        Phase::Drawn => println!("{}", top.yellow().bold()),
        Phase::InProgress => println!("{}", top.cyan()),
    }
    if !bottom.is_empty() {
        println!("{}", bottom.dimmed());
    }
}
