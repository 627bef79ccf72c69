//! Where raw CI logs come from.
//!
//! - [`GhLogSource`] - failed-step logs of a GitHub Actions run via `gh`
//! - [`FileLogSource`] - a local file or stdin

mod error;
mod file;
mod gh;

pub use error::LogSourceError;
pub use file::FileLogSource;
pub use gh::{parse_run_id, GhLogSource};

/// A provider of one raw log string.
pub trait LogSource {
    /// Short human-readable description for log messages.
    fn describe(&self) -> String;

    /// Obtain the raw log text.
    fn fetch(&self) -> Result<String, LogSourceError>;
}
