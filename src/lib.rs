//! Growth Planner - Terminal Business Growth Planner Library
//!
//! Collects facts about a business in a terminal form, asks a generative
//! model for a structured improvement plan, and renders the result.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
