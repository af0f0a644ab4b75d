//! Growth Planner
//!
//! A terminal application that collects facts about a business, asks a
//! generative model for a structured growth plan, and renders the report
//! next to the form.

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use growth_planner::application::App;
use growth_planner::domain::ReportClient;
use growth_planner::infrastructure::{Config, GeminiBackend};
use growth_planner::presentation::{render_ui, InputHandler};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Installs a stderr subscriber when `RUST_LOG` is set.
///
/// The UI owns stdout, so logs are off unless explicitly requested.
fn init_logging() {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(false)
            .init();
    }
}

/// Entry point for the growth planner.
///
/// Configuration is checked before the terminal is touched, so a missing
/// API key is reported on a normal screen.
fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(model = %config.model, "Starting growth planner");

    let backend = GeminiBackend::new(&config)?;
    let client = ReportClient::with_model(backend, config.model.clone());
    let mut app = App::new(Arc::new(client));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

/// Main application event loop.
///
/// Redraws, waits briefly for a key, then picks up any finished report
/// request. Runs until the user quits.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        app.poll();

        if app.should_quit {
            return Ok(());
        }
    }
}
