//! Application state management for the productivity tracker.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface. Every handler receives the state
//! explicitly; there is no global window object.

use super::form::{FormField, FormState};
use crate::domain::{CsvExporter, DomainError, LogRow, LogSummary, RowBuilder, Theme};
use crate::infrastructure::{RowStore, StoreError};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE: &str = "productivity_log.csv";

/// Failures that stop the tracker from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot open the productivity log: {0}")]
    Store(#[from] StoreError),
}

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Form has the keyboard; the table scrolls with PgUp/PgDn
    Form,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Message shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Main application state: the loaded rows, the form, the theme and the
/// store every accepted row is written to.
///
/// # Examples
///
/// ```
/// use prodtrack::application::App;
/// use prodtrack::domain::Theme;
/// use prodtrack::infrastructure::MemoryStore;
///
/// let app = App::bootstrap(Box::new(MemoryStore::new()), Theme::Dark).unwrap();
/// assert!(app.rows.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    store: Box<dyn RowStore>,
    /// Rows shown in the table, in store order
    pub rows: Vec<LogRow>,
    /// The insert form
    pub form: FormState,
    /// Current presentation theme
    pub theme: Theme,
    /// Current application mode
    pub mode: AppMode,
    /// Status bar message
    pub notice: Option<Notice>,
    /// First table row visible in the viewport
    pub table_scroll: usize,
    /// Number of table rows that fit on screen
    pub viewport_rows: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Cursor position within the filename buffer
    pub cursor_position: usize,
    /// Set when the user asked to leave
    pub should_quit: bool,
}

impl App {
    /// Startup protocol: make sure the store exists with its header, load
    /// every row and hand back a ready application.
    ///
    /// # Errors
    ///
    /// Any store failure here is fatal; the caller should not open the UI.
    pub fn bootstrap(mut store: Box<dyn RowStore>, theme: Theme) -> Result<Self, AppError> {
        let created = store.ensure_exists()?;
        let rows = store.read_all_rows()?;
        tracing::info!(
            store = %store.location(),
            created,
            rows = rows.len(),
            "productivity log loaded"
        );

        let notice = if created {
            Notice::Info(format!("Created {}", store.location()))
        } else {
            Notice::Info(format!("Loaded {} rows from {}", rows.len(), store.location()))
        };

        Ok(Self {
            store,
            rows,
            form: FormState::default(),
            theme,
            mode: AppMode::Form,
            notice: Some(notice),
            table_scroll: 0,
            viewport_rows: 15,
            help_scroll: 0,
            filename_input: String::new(),
            cursor_position: 0,
            should_quit: false,
        })
    }

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    pub fn summary(&self) -> LogSummary {
        LogSummary::from_rows(&self.rows)
    }

    /// Validates the form, writes the row to the store and only then adds it
    /// to the table and clears the form.
    ///
    /// Returns `true` when a row was recorded. On failure the form keeps its
    /// contents and the reason is shown in the status bar.
    pub fn submit(&mut self) -> bool {
        let (date, task, hours, status) = self.form.values();
        let row = match RowBuilder::build(date, task, hours, status) {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(error = %e, "submission rejected");
                self.notice = Some(Notice::Error(format!("Not saved: {}", e)));
                self.form.set_focus(FormField::Hours);
                return false;
            }
        };

        if let Err(e) = self.store.append_row(&row) {
            tracing::error!(error = %e, "failed to append row");
            self.notice = Some(Notice::Error(format!("Write failed: {}", e)));
            return false;
        }

        self.rows.push(row);
        self.reset_form();
        self.scroll_table_to_bottom();
        self.notice = Some(Notice::Info(format!("Row {} added", self.rows.len())));
        true
    }

    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        tracing::debug!(theme = %self.theme, "theme toggled");
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Form;
    }

    pub fn update_viewport_size(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        self.table_scroll = self.table_scroll.min(self.max_table_scroll());
    }

    fn max_table_scroll(&self) -> usize {
        self.rows.len().saturating_sub(self.viewport_rows)
    }

    pub fn scroll_table_up(&mut self, amount: usize) {
        self.table_scroll = self.table_scroll.saturating_sub(amount);
    }

    pub fn scroll_table_down(&mut self, amount: usize) {
        self.table_scroll = (self.table_scroll + amount).min(self.max_table_scroll());
    }

    pub fn scroll_table_to_top(&mut self) {
        self.table_scroll = 0;
    }

    pub fn scroll_table_to_bottom(&mut self) {
        self.table_scroll = self.max_table_scroll();
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = DEFAULT_EXPORT_FILE.to_string();
        self.cursor_position = self.filename_input.chars().count();
        self.notice = None;
    }

    /// Gets the filename to use for CSV export.
    ///
    /// Returns the filename input if not empty, otherwise the default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.trim().is_empty() {
            DEFAULT_EXPORT_FILE.to_string()
        } else {
            self.filename_input.trim().to_string()
        }
    }

    /// Writes the loaded rows to the chosen CSV file and reports the outcome.
    pub fn export_csv(&mut self) {
        let filename = self.get_csv_export_filename();
        let result = CsvExporter::export_rows(&self.rows, Path::new(&filename));
        self.set_csv_export_result(result);
    }

    /// Processes the result of a CSV export operation.
    ///
    /// Sets the status message and returns to form mode.
    pub fn set_csv_export_result(&mut self, result: Result<String, DomainError>) {
        match result {
            Ok(filename) => {
                tracing::info!(file = %filename, rows = self.rows.len(), "exported CSV");
                self.notice = Some(Notice::Info(format!("Exported to {}", filename)));
            }
            Err(error) => {
                tracing::warn!(error = %error, "CSV export failed");
                self.notice = Some(Notice::Error(error.to_string()));
            }
        }

        self.cancel_filename_input();
    }

    /// Cancels filename input and returns to form mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Form;
        self.filename_input.clear();
        self.cursor_position = 0;
    }
}
