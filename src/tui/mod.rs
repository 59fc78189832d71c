//! TUI (Terminal User Interface) module
//!
//! All interface logic lives here, separated from the binary so the screen
//! controllers and navigation can be unit tested without a terminal.

pub mod app;
pub mod screens;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use screens::*;
pub use types::{ProfileItem, Screen, Tab};
