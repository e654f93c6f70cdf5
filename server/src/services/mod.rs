//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own parsing, submission and frame storage so route
//! handlers stay focused on protocol translation.

pub mod display;
pub mod script;

/// Stable machine-readable code for an error surfaced to clients.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
