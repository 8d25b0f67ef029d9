//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer, the store and the
//! presentation layer: startup loading, form submission, theme switching.

pub mod form;
pub mod state;

pub use form::*;
pub use state::*;
