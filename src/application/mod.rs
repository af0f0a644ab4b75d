//! Application layer managing state and the report workflow.
//!
//! This module coordinates between the domain layer and presentation layer:
//! it collects form input, drives the view state through a report request,
//! and tracks the terminal UI's own state.

pub mod form;
pub mod orchestrator;
pub mod state;

pub use form::*;
pub use orchestrator::*;
pub use state::*;
