//! Spreadsheet-backed storage for log rows.
//!
//! Reading goes through `calamine`, writing through `rust_xlsxwriter`. The
//! xlsx format itself is entirely their business; this module only maps
//! between sheet cells and [`LogRow`]s.

use crate::domain::{HEADER, LogRow, RowBuilder};
use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, Workbook};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Cannot read {path}: {message}")]
    Read { path: String, message: String },
    #[error("Cannot write {path}: {message}")]
    Write { path: String, message: String },
    #[error("{0} has no worksheet")]
    MissingSheet(String),
    #[error("{path} has an unexpected header row: [{found}]")]
    BadHeader { path: String, found: String },
    #[error("{path}, row {row}: {reason}")]
    MalformedRow { path: String, row: usize, reason: String },
    #[error("{path} holds other worksheets ({sheets}); refusing to rewrite it")]
    ExtraSheets { path: String, sheets: String },
    #[error("Row store is unavailable")]
    Unavailable,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The backing store the tracker reads from at startup and appends to on
/// every submission.
pub trait RowStore: fmt::Debug {
    /// Creates the store with only the header row if it does not exist yet.
    /// Returns `true` when a new store was created.
    fn ensure_exists(&mut self) -> StoreResult<bool>;

    /// All data rows in store order, header excluded.
    fn read_all_rows(&self) -> StoreResult<Vec<LogRow>>;

    /// Appends one row. Either the row is fully recorded or the store is
    /// left as it was.
    fn append_row(&mut self, row: &LogRow) -> StoreResult<()>;

    /// Human-readable location, for the title bar and log lines.
    fn location(&self) -> String;
}

/// Rows kept in an xlsx workbook: sheet 1, header in row 1, data below.
#[derive(Debug, Clone)]
pub struct XlsxStore {
    path: PathBuf,
}

impl XlsxStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes header plus `rows` to a sibling temp file and renames it over
    /// the real path, so a failed save never truncates existing data.
    fn write_rows(&self, rows: &[LogRow]) -> StoreResult<()> {
        let write_err = |e: rust_xlsxwriter::XlsxError| StoreError::Write {
            path: self.display_path(),
            message: e.to_string(),
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        let mut widths: Vec<usize> = HEADER.iter().map(|h| h.chars().count()).collect();
        for (col, title) in HEADER.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *title, &header_format)
                .map_err(write_err)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let r = (index + 1) as u32;
            worksheet.write_string(r, 0, row.date.as_str()).map_err(write_err)?;
            worksheet.write_string(r, 1, row.task.as_str()).map_err(write_err)?;
            worksheet
                .write_number(r, 2, f64::from(row.hours_spent))
                .map_err(write_err)?;
            worksheet.write_string(r, 3, row.status.as_str()).map_err(write_err)?;

            for (col, cell) in row.cells().iter().enumerate() {
                widths[col] = widths[col].max(cell.chars().count());
            }
        }

        for (col, width) in widths.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, (*width).clamp(8, 60) as f64 + 2.0)
                .map_err(write_err)?;
        }

        let temp = self.temp_path();
        if let Err(e) = workbook.save(&temp) {
            let _ = fs::remove_file(&temp);
            return Err(write_err(e));
        }
        fs::rename(&temp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp);
            StoreError::Io {
                path: self.display_path(),
                source,
            }
        })
    }
}

impl RowStore for XlsxStore {
    fn ensure_exists(&mut self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write_rows(&[])?;
        tracing::info!(path = %self.path.display(), "created log workbook with header row");
        Ok(true)
    }

    fn read_all_rows(&self) -> StoreResult<Vec<LogRow>> {
        self.load().map(|(rows, _)| rows)
    }

    fn append_row(&mut self, row: &LogRow) -> StoreResult<()> {
        let (mut rows, sheet_names) = self.load()?;
        // The rewrite only carries the log sheet, so anything else would be lost
        if sheet_names.len() > 1 {
            return Err(StoreError::ExtraSheets {
                path: self.display_path(),
                sheets: sheet_names[1..].join(", "),
            });
        }
        rows.push(row.clone());
        self.write_rows(&rows)?;
        tracing::info!(path = %self.path.display(), total = rows.len(), "appended log row");
        Ok(())
    }

    fn location(&self) -> String {
        self.display_path()
    }
}

impl XlsxStore {
    /// Data rows of the first sheet plus the names of every sheet in the
    /// workbook.
    fn load(&self) -> StoreResult<(Vec<LogRow>, Vec<String>)> {
        let path = self.display_path();
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e: calamine::XlsxError| {
            StoreError::Read {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| StoreError::MissingSheet(path.clone()))?
            .map_err(|e| StoreError::Read {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let mut sheet_rows = range.rows();
        let header: Vec<String> = sheet_rows
            .next()
            .map(|cells| cells.iter().map(cell_text).collect())
            .unwrap_or_default();
        if !header_matches(&header) {
            return Err(StoreError::BadHeader {
                path,
                found: header.join(", "),
            });
        }

        let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
        let mut rows = Vec::new();
        for (offset, cells) in sheet_rows.enumerate() {
            if cells.iter().all(|c| cell_text(c).is_empty()) {
                continue;
            }
            let row_number = first_row + offset + 1;
            let row = row_from_cells(cells).map_err(|reason| StoreError::MalformedRow {
                path: path.clone(),
                row: row_number,
                reason,
            })?;
            rows.push(row);
        }

        tracing::debug!(path = %path, rows = rows.len(), "read log rows");
        Ok((rows, workbook.sheet_names()))
    }
}

/// Header cells must match exactly; trailing blank cells are ignored.
fn header_matches(header: &[String]) -> bool {
    let mut cells: Vec<&str> = header.iter().map(|s| s.as_str()).collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells == HEADER
}

/// Text of a cell as a user would read it. Integral numbers drop the `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

fn row_from_cells(cells: &[Data]) -> Result<LogRow, String> {
    let text = |idx: usize| cells.get(idx).map(cell_text).unwrap_or_default();

    let hours_spent = RowBuilder::parse_hours(&text(2)).map_err(|e| e.to_string())?;
    let status = RowBuilder::parse_status(&text(3)).map_err(|e| e.to_string())?;

    Ok(LogRow::new(text(0), text(1), hours_spent, status))
}

/// In-memory store, mainly for exercising the application without a disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    created: bool,
    rows: Vec<LogRow>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<LogRow>) -> Self {
        Self {
            created: true,
            rows,
            fail_writes: false,
        }
    }

    /// Makes every subsequent `append_row` fail without recording anything.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }
}

impl RowStore for MemoryStore {
    fn ensure_exists(&mut self) -> StoreResult<bool> {
        let created = !self.created;
        self.created = true;
        Ok(created)
    }

    fn read_all_rows(&self) -> StoreResult<Vec<LogRow>> {
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, row: &LogRow) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Unavailable);
        }
        self.rows.push(row.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;

    fn sample_row() -> LogRow {
        LogRow::new("2024-01-01", "Write report", 3, Status::Completed)
    }

    #[test]
    fn test_ensure_exists_creates_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("productivity_log.xlsx");
        let mut store = XlsxStore::new(&path);

        assert!(store.ensure_exists().unwrap());
        assert!(path.exists());
        assert!(store.read_all_rows().unwrap().is_empty());

        // Second call leaves the file alone
        assert!(!store.ensure_exists().unwrap());
    }

    #[test]
    fn test_append_then_read_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = XlsxStore::new(dir.path().join("log.xlsx"));
        store.ensure_exists().unwrap();

        let rows = vec![
            sample_row(),
            LogRow::new("2024-01-02", "Fix bug", 24, Status::InProgress),
            LogRow::new("", "", 1, Status::Pending),
        ];
        for row in &rows {
            store.append_row(row).unwrap();
        }

        assert_eq!(store.read_all_rows().unwrap(), rows);
    }

    #[test]
    fn test_append_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = XlsxStore::new(dir.path().join("log.xlsx"));
        store.ensure_exists().unwrap();
        store.append_row(&sample_row()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Value").unwrap();
        workbook.save(&path).unwrap();

        let store = XlsxStore::new(&path);
        assert!(matches!(store.read_all_rows(), Err(StoreError::BadHeader { .. })));
    }

    #[test]
    fn test_read_rejects_bad_hours_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in HEADER.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "2024-01-01").unwrap();
        sheet.write_string(1, 1, "Task").unwrap();
        sheet.write_string(1, 2, "lots").unwrap();
        sheet.write_string(1, 3, "Completed").unwrap();
        workbook.save(&path).unwrap();

        let store = XlsxStore::new(&path);
        match store.read_all_rows() {
            Err(StoreError::MalformedRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_read_accepts_hours_written_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text_hours.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in HEADER.iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "2024-03-04").unwrap();
        sheet.write_string(1, 1, "Plan").unwrap();
        sheet.write_string(1, 2, "5").unwrap();
        sheet.write_string(1, 3, "Pending").unwrap();
        workbook.save(&path).unwrap();

        let rows = XlsxStore::new(&path).read_all_rows().unwrap();
        assert_eq!(rows, vec![LogRow::new("2024-03-04", "Plan", 5, Status::Pending)]);
    }

    #[test]
    fn test_read_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.xlsx");
        fs::write(&path, b"not a spreadsheet").unwrap();

        let store = XlsxStore::new(&path);
        assert!(matches!(store.read_all_rows(), Err(StoreError::Read { .. })));
    }

    #[test]
    fn test_failed_append_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.xlsx");
        let mut store = XlsxStore::new(&path);
        store.ensure_exists().unwrap();
        store.append_row(&sample_row()).unwrap();

        // A directory squatting on the temp path makes the save fail
        fs::create_dir(dir.path().join("log.xlsx.tmp")).unwrap();
        assert!(store.append_row(&LogRow::new("x", "y", 2, Status::Pending)).is_err());

        assert_eq!(store.read_all_rows().unwrap(), vec![sample_row()]);
    }

    #[test]
    fn test_append_refuses_workbook_with_other_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.xlsx");
        let mut workbook = Workbook::new();
        let log = workbook.add_worksheet();
        for (col, title) in HEADER.iter().enumerate() {
            log.write_string(0, col as u16, *title).unwrap();
        }
        let notes = workbook.add_worksheet().set_name("Notes").unwrap();
        notes.write_string(0, 0, "keep me").unwrap();
        workbook.save(&path).unwrap();

        let mut store = XlsxStore::new(&path);
        assert!(store.read_all_rows().unwrap().is_empty());
        match store.append_row(&sample_row()) {
            Err(StoreError::ExtraSheets { sheets, .. }) => assert_eq!(sheets, "Notes"),
            other => panic!("expected extra sheets error, got {:?}", other),
        }

        let mut reopened: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(reopened.sheet_names(), vec!["Sheet1".to_string(), "Notes".to_string()]);
        let notes = reopened.worksheet_range("Notes").unwrap();
        assert_eq!(notes.get_value((0, 0)), Some(&Data::String("keep me".to_string())));
        assert!(store.read_all_rows().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_failure_records_nothing() {
        let mut store = MemoryStore::new();
        assert!(store.ensure_exists().unwrap());
        assert!(!store.ensure_exists().unwrap());

        store.set_fail_writes(true);
        let err = store.append_row(&sample_row()).unwrap_err();
        assert_eq!(err.to_string(), "Row store is unavailable");
        assert!(store.rows().is_empty());

        store.set_fail_writes(false);
        store.append_row(&sample_row()).unwrap();
        assert_eq!(store.read_all_rows().unwrap(), vec![sample_row()]);
    }
}
