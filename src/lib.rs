//! failprompt library
//!
//! Extracts the relevant error excerpt from a GitHub Actions log and renders
//! it as a Markdown prompt for an AI assistant.

pub mod config;
pub mod extract;
pub mod git;
pub mod prompt;
pub mod source;

pub use config::Config;
pub use extract::{extract_errors, ExtractedError, ExtractionConfig, Extractor};
pub use prompt::{build_prompt, PromptOptions};
pub use source::{FileLogSource, GhLogSource, LogSource, LogSourceError};
