//! Log source errors.

use std::path::PathBuf;

/// Errors that can occur while obtaining a raw CI log.
#[derive(Debug, thiserror::Error)]
pub enum LogSourceError {
    #[error("failprompt requires the GitHub CLI (gh). Install: https://cli.github.com")]
    GhNotInstalled,

    #[error("You are not authenticated with the GitHub CLI. Run: gh auth login")]
    NotAuthenticated,

    #[error("No failed runs found on branch \"{branch}\".")]
    NoFailedRuns { branch: String },

    #[error("Failed to detect latest failed run: {message}")]
    DetectRunFailed { message: String },

    #[error("Failed to fetch CI log for run {run_id}: {message}")]
    FetchFailed { run_id: String, message: String },

    #[error("Failed to read log from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
