mod app;
mod config;
mod csv;
mod engine;
mod error;
mod fileio;
mod input;
mod mode;
mod ui;
mod util;

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use app::App;
use config::{Config, WindowMode};
use fileio::FileIO;

/// Parse command line arguments
/// Returns (file_path, window mode override)
fn parse_args() -> (Option<PathBuf>, Option<WindowMode>) {
    let args: Vec<String> = env::args().collect();
    let mut file_path: Option<PathBuf> = None;
    let mut window: Option<WindowMode> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--paged" => window = Some(WindowMode::Paged),
            "--reveal" => window = Some(WindowMode::Reveal),
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
            other => file_path = Some(PathBuf::from(other)),
        }
    }

    (file_path, window)
}

/// Log to the file named by GRIDDLE_LOG; the terminal belongs to the UI
fn init_logging() {
    let Ok(path) = env::var("GRIDDLE_LOG") else {
        return;
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => eprintln!("Could not open log file {}: {}", path, e),
    }
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        default_hook(info);
    }));
}

fn print_help() {
    eprintln!("griddle - A terminal-based viewer for CSV files");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    griddle [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --paged     Page through rows (default)");
    eprintln!("    --reveal    Reveal rows incrementally while scrolling");
    eprintln!("    -h, --help  Print this help message");
    eprintln!();
    eprintln!("Only .csv files are accepted. Window sizes and the default");
    eprintln!("mode can be set in griddle.toml.");
}

fn main() -> io::Result<()> {
    init_logging();
    info!("griddle started");

    install_panic_hook();

    let (file_path, window_override) = parse_args();

    let mut config = Config::load();
    if let Some(window) = window_override {
        config.window = window;
    }

    let mut app = App::new(config, file_path.map(FileIO::new));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
