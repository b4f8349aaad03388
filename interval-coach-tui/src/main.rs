// interval-coach-tui/src/main.rs
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use interval_coach_lib::{get_log_path_util, AppService};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::sync::Mutex;
use std::{
    io,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use interval_coach_tui::{app::App, ui};

// Longest the loop sleeps, so error messages still expire while idle
const MAX_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Initialize the library service
    let app_service = AppService::initialize().context("Failed to initialize AppService")?;
    init_tracing(&app_service.config.log_level);
    info!("Starting interval-coach TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(app_service);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI exited with error: {err:?}");
        eprintln!("Error: {:?}", err); // Print errors to stderr
    }

    Ok(())
}

// Logs go to a file next to the config so the alternate screen stays clean
fn init_tracing(log_level: &str) {
    let log_file = get_log_path_util().map_err(anyhow::Error::from).and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {path:?}"))
    });

    match log_file {
        Ok(file) => {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "interval_coach_lib={log_level},interval_coach_tui={log_level},ic_tui={log_level}"
                ))
            });
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => eprintln!("Warning: logging disabled: {e:#}"),
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Deliver any due ticks before drawing
        app.on_tick();

        terminal.draw(|f| ui::render_ui(f, app))?;

        // Sleep until the next tick is due, or until input arrives
        let timeout = app
            .clock
            .time_until_next(Instant::now())
            .map_or(MAX_POLL, |due| due.min(MAX_POLL));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key)?;
                }
            }
        }
        // Resize is handled by the next draw

        if app.should_quit {
            return Ok(());
        }
    }
}
