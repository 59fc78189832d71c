//! Finbook - a personal finance tracker client
//!
//! This library provides the client-side core for Finbook: configuration,
//! the remote API client, the persisted auth token store, and the screen
//! controllers behind the terminal interface.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod models;
pub mod storage;
pub mod tui;

/// Result type alias for Finbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Finbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A local precondition failed before any network call was attempted
    #[error("{0}")]
    Validation(String),

    /// Missing token, or credentials rejected by the server
    #[error("{0}")]
    Auth(String),

    /// Transport failure, or a non-success status with no usable error body
    #[error("Network error: {0}")]
    Network(String),

    /// A success response arrived but was missing an expected field
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Initialize the Finbook library with logging
pub fn init() {
    tracing_subscriber::fmt::init();
}

#[cfg(test)]
mod tests;
