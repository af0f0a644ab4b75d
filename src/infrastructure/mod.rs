//! Infrastructure layer providing external service integrations.
//!
//! This module contains the environment configuration, the HTTP transport
//! to the generation backend, and clipboard access.

pub mod clipboard;
pub mod config;
pub mod gemini;

pub use clipboard::*;
pub use config::*;
pub use gemini::*;
