pub mod config;
pub mod tris;
pub mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use colored::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    if let Err(e) = start_app(&config_path).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn start_app(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_from(config_path)?;
    if !Path::new(config_path).exists() {
        config.save_to(config_path)?;
    }

    init_logging(&config)?;
    info!(config_path, delay_ms = config.computer_delay_ms, "client starting");

    if config.show_start_screen {
        ui::show_start_screen().await?;
    }

    tris::run_game_loop(&config).await?;

    println!("\n{}", "Goodbye!".cyan());
    Ok(())
}

/// Logs go to a file so they don't scribble over the board
fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
