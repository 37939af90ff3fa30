//! Taskboard terminal client.
//!
//! Renders the task list from a Taskboard server and mutates it on user
//! actions. Configuration via CLI flags, environment variables, or config
//! file (`~/.config/taskboard/config.toml`).
//!
//! ```bash
//! # Talk to the default server at http://127.0.0.1:5000
//! cargo run --bin taskboard
//!
//! # Point at another server
//! cargo run --bin taskboard -- --server-url http://tasks.example.com
//!
//! # Or via environment variable
//! TASKBOARD_URL=http://tasks.example.com cargo run --bin taskboard
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskboard::api::ApiClient;
use taskboard::app::App;
use taskboard::config::{CliArgs, ClientConfig};
use taskboard::controller::{self, Action, Controller};
use taskboard::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&config.log_level, config.log_file.as_deref());

    tracing::info!(server_url = %config.server_url, "taskboard client starting");

    // The resolved base URL is injected here; nothing else reads it.
    let api = ApiClient::new(config.server_url.clone());

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &api, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskboard client exiting");
    result
}

/// Main event loop: draw, wait for a key, run the resulting action.
///
/// Each action is a single network round trip awaited inline, so at most one
/// request per user action is outstanding.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &ApiClient,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new();
    let mut ctl = Controller::new();

    // Initial load.
    controller::execute(api, &mut ctl, Action::Refresh).await;

    loop {
        ctl.tick(Instant::now());
        app.clamp_selection(ctl.tasks().len());
        terminal.draw(|frame| ui::draw(frame, &app, &ctl))?;

        if !event::poll(config.poll_timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = app.handle_key(key, ctl.tasks()) else {
            continue;
        };
        if action == Action::Quit {
            return Ok(());
        }
        if controller::execute(api, &mut ctl, action).await {
            app.clear_form();
        }
    }
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns `None`, with logging disabled, when no usable log
/// path exists.
fn init_logging(level: &str, path: Option<&Path>) -> Option<WorkerGuard> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => dirs::data_dir()?.join("taskboard").join("client.log"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = std::fs::File::create(&path).ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}
