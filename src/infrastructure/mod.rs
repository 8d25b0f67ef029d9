//! Infrastructure layer providing external service integrations.
//!
//! Spreadsheet storage, command-line configuration and diagnostic logging.

pub mod persistence;
pub mod config;
pub mod logging;

pub use persistence::*;
pub use config::*;
pub use logging::*;
