//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the form and the log table with ratatui, maps
//! keyboard and mouse events onto application operations, and holds the
//! color palettes for the two themes.

pub mod ui;
pub mod input;
pub mod theme;

pub use ui::*;
pub use input::*;
pub use theme::*;
