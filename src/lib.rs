//! prodtrack - Terminal Productivity Tracker Library
//!
//! Log what you worked on, for how long and how it ended, into an xlsx
//! spreadsheet, and browse everything logged so far in a table.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
