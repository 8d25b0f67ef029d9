//! Row construction, summaries and export for the productivity log.
//!
//! Everything here is free of terminal and spreadsheet concerns, so the
//! validation rules can be exercised without a UI or a backing file.

use super::errors::{DomainError, DomainResult};
use super::models::{HEADER, LogRow, Status};
use std::path::Path;

/// Validates raw form values and turns them into a [`LogRow`].
///
/// # Examples
///
/// ```
/// use prodtrack::domain::{RowBuilder, Status};
///
/// let row = RowBuilder::build("2024-01-01", "Write report", "3", Status::Completed).unwrap();
/// assert_eq!(row.hours_spent, 3);
/// assert!(RowBuilder::build("2024-01-01", "Write report", "abc", Status::Completed).is_err());
/// ```
pub struct RowBuilder;

impl RowBuilder {
    /// Builds a row from form input.
    ///
    /// Date and task are taken verbatim. Hours must parse as a positive
    /// integer after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidHours`] for non-integer input,
    /// [`DomainError::NonPositiveHours`] for zero or negative values and
    /// [`DomainError::HoursOutOfRange`] for integers too large to store.
    pub fn build(date: &str, task: &str, hours: &str, status: Status) -> DomainResult<LogRow> {
        let hours_spent = Self::parse_hours(hours)?;
        Ok(LogRow::new(date, task, hours_spent, status))
    }

    pub fn parse_hours(hours: &str) -> DomainResult<u32> {
        let trimmed = hours.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidHours(trimmed.to_string()));
        }
        if negative || digits.bytes().all(|b| b == b'0') {
            return Err(DomainError::NonPositiveHours(trimmed.to_string()));
        }
        digits
            .parse::<u32>()
            .map_err(|_| DomainError::HoursOutOfRange(trimmed.to_string()))
    }

    pub fn parse_status(status: &str) -> DomainResult<Status> {
        status
            .trim()
            .parse::<Status>()
            .map_err(DomainError::UnknownStatus)
    }
}

/// Aggregate figures over the loaded rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub rows: usize,
    pub total_hours: u64,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

impl LogSummary {
    pub fn from_rows(rows: &[LogRow]) -> Self {
        let mut summary = Self {
            rows: rows.len(),
            ..Self::default()
        };
        for row in rows {
            summary.total_hours += u64::from(row.hours_spent);
            match row.status {
                Status::Completed => summary.completed += 1,
                Status::InProgress => summary.in_progress += 1,
                Status::Pending => summary.pending += 1,
            }
        }
        summary
    }
}

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the header and every row to `path` as CSV.
    ///
    /// Returns the path written on success so the caller can report it.
    pub fn export_rows(rows: &[LogRow], path: &Path) -> DomainResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| DomainError::Export(e.to_string()))?;

        writer
            .write_record(HEADER)
            .map_err(|e| DomainError::Export(e.to_string()))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| DomainError::Export(e.to_string()))?;
        }
        writer.flush().map_err(|e| DomainError::Export(e.to_string()))?;

        Ok(path.display().to_string())
    }
}
