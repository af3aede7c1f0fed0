//! Application layer for tasklist.
//!
//! This crate provides the session controller, the presentation rules and the
//! project configuration shared by the script runner and the TUI.

pub mod config;
pub mod controller;
pub mod view;

// Re-exports for convenience
pub use config::{ListConfig, ProjectConfig};
pub use controller::Controller;
pub use view::{ListView, RowView, shows_add_form};
