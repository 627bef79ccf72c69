//! GitHub Actions logs via the `gh` CLI.
//!
//! - availability: `gh --version`, then `gh auth status`
//! - run detection: `gh run list --branch <b> --status failure --limit 1`
//! - fetch: `gh run view <id> --log-failed`

use std::process::{Command, Output, Stdio};

use tracing::debug;

use super::{LogSource, LogSourceError};
use crate::git;

/// Fetches the failed-step log of a GitHub Actions run.
#[derive(Debug, Clone)]
pub struct GhLogSource {
    /// Run to fetch; `None` means the latest failed run on the current branch
    pub run_id: Option<String>,
    /// `owner/repo`; `None` lets `gh` use the current checkout
    pub repo: Option<String>,
    program: String,
}

impl GhLogSource {
    pub fn new(run_id: Option<String>, repo: Option<String>) -> Self {
        Self {
            run_id,
            repo,
            program: "gh".to_string(),
        }
    }

    /// Use a different executable in place of `gh`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn repo_args(&self) -> Vec<&str> {
        match self.repo.as_deref() {
            Some(repo) => vec!["--repo", repo],
            None => Vec::new(),
        }
    }

    /// Fail early with an actionable message if `gh` is missing or logged out.
    pub fn ensure_available(&self) -> Result<(), LogSourceError> {
        let installed = self
            .command(&["--version"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !installed {
            return Err(LogSourceError::GhNotInstalled);
        }

        let authenticated = self
            .command(&["auth", "status"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !authenticated {
            return Err(LogSourceError::NotAuthenticated);
        }

        Ok(())
    }

    /// Id of the most recent failed run on the current branch.
    pub fn detect_latest_failed_run(&self) -> Result<String, LogSourceError> {
        let branch = git::current_branch().unwrap_or_else(|| "main".to_string());

        let mut args = vec![
            "run",
            "list",
            "--branch",
            branch.as_str(),
            "--status",
            "failure",
            "--limit",
            "1",
            "--json",
            "databaseId",
            "--jq",
            ".[0].databaseId",
        ];
        args.extend(self.repo_args());

        let output = self
            .command(&args)
            .output()
            .map_err(|e| LogSourceError::DetectRunFailed {
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(LogSourceError::DetectRunFailed {
                message: failure_message(&output),
            });
        }

        parse_run_id(&String::from_utf8_lossy(&output.stdout))
            .ok_or(LogSourceError::NoFailedRuns { branch })
    }
}

impl LogSource for GhLogSource {
    fn describe(&self) -> String {
        let run = self.run_id.as_deref().unwrap_or("latest failed run");
        match &self.repo {
            Some(repo) => format!("gh run {} ({})", run, repo),
            None => format!("gh run {}", run),
        }
    }

    fn fetch(&self) -> Result<String, LogSourceError> {
        self.ensure_available()?;

        let run_id = match &self.run_id {
            Some(id) => id.clone(),
            None => self.detect_latest_failed_run()?,
        };
        debug!(%run_id, "fetching failed log");

        let mut args = vec!["run", "view", run_id.as_str(), "--log-failed"];
        args.extend(self.repo_args());

        let output = self
            .command(&args)
            .output()
            .map_err(|e| LogSourceError::FetchFailed {
                run_id: run_id.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(LogSourceError::FetchFailed {
                run_id,
                message: failure_message(&output),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse `gh run list --jq` output into a run id.
///
/// `gh` prints an empty line or `null` when the list is empty.
pub fn parse_run_id(stdout: &str) -> Option<String> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() || trimmed == "null" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("command exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}
