use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Column labels of the backing spreadsheet, in file order.
pub const HEADER: [&str; 4] = ["Date", "Task", "Hours Spent", "Status"];

/// Completion state of a logged task.
///
/// The set is closed: the status picker only ever offers these three values,
/// so free text can never reach a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending")]
    Pending,
}

impl Status {
    /// All statuses in picker order.
    pub const ALL: [Status; 3] = [Status::Completed, Status::InProgress, Status::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "Completed",
            Status::InProgress => "In Progress",
            Status::Pending => "Pending",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Next status in picker order, wrapping around.
    pub fn next(&self) -> Status {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous status in picker order, wrapping around.
    pub fn previous(&self) -> Status {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Presentation preference. Has no effect on data and is not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}' (expected dark or light)", other)),
        }
    }
}

/// One logged entry: what was worked on, when, for how long, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Hours Spent")]
    pub hours_spent: u32,
    #[serde(rename = "Status")]
    pub status: Status,
}

impl LogRow {
    pub fn new(date: impl Into<String>, task: impl Into<String>, hours_spent: u32, status: Status) -> Self {
        Self {
            date: date.into(),
            task: task.into(),
            hours_spent,
            status,
        }
    }

    /// The row as display strings, in `HEADER` order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.date.clone(),
            self.task.clone(),
            self.hours_spent.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
        }
        assert!("in progress".parse::<Status>().is_err());
        assert!("Done".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_cycling_wraps() {
        assert_eq!(Status::Completed.next(), Status::InProgress);
        assert_eq!(Status::Pending.next(), Status::Completed);
        assert_eq!(Status::Completed.previous(), Status::Pending);
        assert_eq!(Status::InProgress.previous(), Status::Completed);
    }

    #[test]
    fn test_theme_toggle_twice_is_identity() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(theme.toggle(), Theme::Light);
        assert_eq!(theme.toggle().toggle(), theme);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(" dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("forest".parse::<Theme>().is_err());
    }

    #[test]
    fn test_row_cells_follow_header_order() {
        let row = LogRow::new("2024-01-01", "Write report", 3, Status::InProgress);
        assert_eq!(row.cells(), [
            "2024-01-01".to_string(),
            "Write report".to_string(),
            "3".to_string(),
            "In Progress".to_string(),
        ]);
        assert_eq!(HEADER.len(), row.cells().len());
    }
}
