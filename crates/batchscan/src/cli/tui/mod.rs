//! Terminal User Interface for Batch Scanner
//!
//! A single form: mode selector, input line, batch summary, and the table of
//! serial numbers in the batch. Barcode scanners type the code followed by
//! Enter, so a scan needs no mouse and the input is ready again afterwards.

pub mod app;
pub mod event;
pub mod ui;

use anyhow::Result;
use batchscan::export::CsvExporter;
use batchscan::settings::Settings;
use batchscan_db::AssemblyDb;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;
use std::time::Duration;
use tracing::info;

use crate::cli::error::HelpfulError;
use crate::cli::tui::app::App;
use crate::cli::tui::event::{Event, EventHandler};

/// Run the TUI
pub fn run(settings: &Settings) -> Result<()> {
    let config = settings.db_config().map_err(|e| HelpfulError::settings(&e))?;
    info!(url = %config.redacted_url(), table = config.table(), "Starting scanner");

    let app = App::new(
        AssemblyDb::new(config),
        CsvExporter::new(settings.export.dir.clone()),
    );

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(run_terminal(app))
}

async fn run_terminal(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run the application loop
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => app.handle_key(key),
            Event::Tick => {}
            Event::Resize(_, _) => {} // Ratatui handles resize
        }

        app.tick();
    }

    Ok(())
}
