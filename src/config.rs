//! Client configuration
//!
//! The original clients hardcoded the server address in every screen; here a
//! single `Config` is loaded once at process start and injected into the API
//! client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Client configuration
///
/// Persistent configuration for the Finbook client, stored as JSON and
/// loaded once at startup.
///
/// # Example
/// ```rust,no_run
/// use finbook::config::Config;
///
/// let config = Config::load("config.json").expect("Failed to load");
/// println!("API base URL: {}", config.base_url);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the remote API, including the trailing slash
    /// (e.g. `http://127.0.0.1:8000/api/`)
    pub base_url: String,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Returns the default configuration if the file doesn't exist or is empty.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read config: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Storage(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create config directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Storage(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, json)
            .map_err(|e| Error::Storage(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
        }
    }
}
