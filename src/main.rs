use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use sharpline::app::{
    observer::TracingObserver, r#loop::run_loop, session::PaletteSession, state::AppState,
};
use sharpline::config::{self, PaletteConfig};
use sharpline::domain::registry::CommandRegistry;
use sharpline::infrastructure::{catalog, feed::SeededOddsFeed};
use sharpline::logging;

#[derive(Parser, Debug)]
#[command(name = "sharpline")]
#[command(about = "Sports betting dashboard with a keyboard-driven command palette")]
#[command(version)]
struct Args {
    /// Path to config file (default: ~/.config/sharpline/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for sharpline.log (default: ~/.config/sharpline/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = args
        .log_dir
        .or_else(|| config::get_config_dir().map(|d| d.join("logs")))
        .unwrap_or_else(|| std::env::temp_dir().join("sharpline"));
    let _log_guard = logging::init(&log_dir)?;

    setup_panic_hook();

    // Everything that can fail on bad input happens before raw mode, so an
    // error never leaves the terminal in a broken state.
    let config = PaletteConfig::load(args.config.as_deref()).context("loading config")?;
    let feed = Arc::new(SeededOddsFeed::new(config.feed_seed));
    let registry = Arc::new(CommandRegistry::new(catalog::default_commands(
        feed,
        &config.disabled_commands,
        &config.shortcut_overrides()?,
    ))?);
    tracing::info!(
        commands = registry.len(),
        match_mode = ?config.match_mode,
        "configuration loaded"
    );

    let (action_tx, action_rx) = mpsc::channel(100);
    let mut session = PaletteSession::new(AppState::new(&config), registry, action_tx);
    session.add_observer(Arc::new(TracingObserver));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, session, action_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "session aborted");
        eprintln!("{err:?}");
    }

    Ok(())
}
