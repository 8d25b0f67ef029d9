//! prodtrack - Terminal Productivity Tracker
//!
//! Appends rows of (date, task, hours spent, status) to an xlsx
//! spreadsheet and shows every logged row in a table. The spreadsheet is
//! created with its header row on first launch.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use prodtrack::application::App;
use prodtrack::infrastructure::{init_logging, Config, XlsxStore};
use prodtrack::presentation::{render_ui, table_viewport_rows, InputHandler};

/// Entry point for the productivity tracker.
///
/// Loads the spreadsheet before touching the terminal, so a missing
/// permission or a corrupt file is reported on a normal screen and the
/// process exits with a failure status.
///
/// # Errors
///
/// Returns an error if the log cannot be opened, if terminal setup fails,
/// or if the terminal interface fails at runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let store = XlsxStore::new(&config.file);
    let mut app = match App::bootstrap(Box::new(store), config.theme) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            return Err(err.into());
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws, then blocks on the next terminal event and dispatches it.
/// Every store write happens synchronously inside the dispatch.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.update_viewport_size(table_viewport_rows(size.height));
        terminal.draw(|f| render_ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => InputHandler::handle_mouse_event(app, mouse.kind),
            _ => {}
        }

        if app.should_quit {
            tracing::info!(rows = app.rows.len(), "quitting");
            return Ok(());
        }
    }
}
