//! Configuration management for failprompt
//!
//! ```toml
//! [extract]
//! max_error_lines = 50
//! lines_before = 30
//! lines_after = 5
//! fallback_tail = 30
//! strip_step_prefix = false
//!
//! [prompt]
//! include_context = true
//! context_radius = 20
//! max_file_lines = 200
//! ```

mod io;
mod types;

pub use io::CONFIG_ENV;
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from a specific file, or return defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extract.validate().map_err(ConfigError::Invalid)?;
        self.prompt.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}
