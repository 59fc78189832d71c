//! SQLite-backed auth token store
//!
//! Holds at most one bearer token at a time. Absence of a token means
//! "unauthenticated" and is reported distinctly from a storage fault:
//! `get` returns `Ok(Some(_))`, `Ok(None)` or `Err(_)`, so callers cannot
//! mistake a failed read for "logged out".

use crate::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Persistent store for the session bearer token
pub struct TokenStore {
    conn: Connection,
}

impl TokenStore {
    /// Open a token store backed by a database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open token database: {}", e)))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory token store (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Storage(format!("Failed to create in-memory database: {}", e)))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open the store at the default path (./app_data/finbook.db)
    pub fn new_with_default_path() -> Result<Self> {
        let app_data_dir = Path::new("./app_data");
        if !app_data_dir.exists() {
            std::fs::create_dir_all(app_data_dir)
                .map_err(|e| Error::Storage(format!("Failed to create app_data directory: {}", e)))?;
        }

        Self::new(app_data_dir.join("finbook.db"))
    }

    // Single-row table: at most one token is stored at a time.
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS session_token (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Persist the token, overwriting any prior value (last-write-wins)
    pub fn set(&self, token: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO session_token (id, token) VALUES (1, ?1)",
            params![token],
        )?;
        Ok(())
    }

    /// Read the stored token
    ///
    /// Returns `Ok(None)` when no token was ever set (or it was cleared);
    /// an `Err` is only produced when the underlying storage fails.
    pub fn get(&self) -> Result<Option<String>> {
        let token = self
            .conn
            .query_row("SELECT token FROM session_token WHERE id = 1", [], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;

        Ok(token)
    }

    /// Remove the stored token (logout)
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session_token", [])?;
        Ok(())
    }
}
