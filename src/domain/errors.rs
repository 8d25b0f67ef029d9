use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Hours must be a whole number, got '{0}'")]
    InvalidHours(String),
    #[error("Hours must be at least 1, got {0}")]
    NonPositiveHours(String),
    #[error("Hours value {0} is too large")]
    HoursOutOfRange(String),
    #[error("Unknown status '{0}' (expected Completed, In Progress or Pending)")]
    UnknownStatus(String),
    #[error("Export failed: {0}")]
    Export(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
