//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::extract::ExtractionConfig;
use crate::prompt::FileContextOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Prompt rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Add a Source Context block for the first extracted path
    #[serde(default = "default_include_context")]
    pub include_context: bool,
    /// Lines shown on each side of the failing source line
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,
    /// Lines shown from the top of a file without a line number
    #[serde(default = "default_max_file_lines")]
    pub max_file_lines: usize,
}

pub fn default_include_context() -> bool {
    true
}

pub fn default_context_radius() -> usize {
    crate::prompt::default_context_radius()
}

pub fn default_max_file_lines() -> usize {
    crate::prompt::default_max_file_lines()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            include_context: default_include_context(),
            context_radius: default_context_radius(),
            max_file_lines: default_max_file_lines(),
        }
    }
}

impl PromptConfig {
    /// File context options rooted at the current directory.
    pub fn file_context_options(&self) -> FileContextOptions {
        FileContextOptions {
            context_radius: self.context_radius,
            max_file_lines: self.max_file_lines,
            ..FileContextOptions::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_lines == 0 {
            return Err("prompt.max_file_lines must be > 0".to_string());
        }
        Ok(())
    }
}
