//! Command-line and environment configuration.

use crate::domain::Theme;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "productivity_log.xlsx";

/// Runtime options. With no flags the tracker uses `productivity_log.xlsx`
/// in the working directory, starts dark and does not log.
#[derive(Debug, Clone, Parser)]
#[command(name = "prodtrack")]
#[command(version, about = "Log tasks and hours to a spreadsheet from the terminal", long_about = None)]
pub struct Config {
    /// Spreadsheet file holding the log
    #[arg(short, long, value_name = "PATH", env = "PRODTRACK_FILE", default_value = DEFAULT_LOG_FILE)]
    pub file: PathBuf,

    /// Initial theme (dark or light)
    #[arg(short, long, env = "PRODTRACK_THEME", default_value = "dark")]
    pub theme: Theme,

    /// Write diagnostic logs to this file (RUST_LOG controls the level)
    #[arg(long, value_name = "PATH", env = "PRODTRACK_LOG")]
    pub log_file: Option<PathBuf>,
}
