//! Repository and branch detection from the local git checkout.

use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;

/// Shown when the origin remote cannot be read.
pub const UNKNOWN_REPO: &str = "unknown/repo";

/// Shown when the current branch cannot be read.
pub const UNKNOWN_BRANCH: &str = "unknown";

static SSH_REMOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git@[^:]+:(.+?)(?:\.git)?$").expect("Valid SSH remote regex"));

static HTTPS_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/]+/(.+?)(?:\.git)?$").expect("Valid HTTPS remote regex")
});

/// Reduce a remote URL to `owner/repo`.
///
/// Handles `git@host:owner/repo.git` and `https://host/owner/repo.git`;
/// anything else is returned unchanged.
pub fn parse_remote_url(url: &str) -> String {
    let url = url.trim();
    SSH_REMOTE
        .captures(url)
        .or_else(|| HTTPS_REMOTE.captures(url))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| url.to_string(), |m| m.as_str().to_string())
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Current branch name, if inside a git checkout on a branch.
pub fn current_branch() -> Option<String> {
    git_output(&["branch", "--show-current"])
}

/// `owner/repo` of the origin remote, or [`UNKNOWN_REPO`].
pub fn detect_repo() -> String {
    git_output(&["remote", "get-url", "origin"])
        .map(|url| parse_remote_url(&url))
        .unwrap_or_else(|| UNKNOWN_REPO.to_string())
}

/// Current branch, or [`UNKNOWN_BRANCH`].
pub fn detect_branch() -> String {
    current_branch().unwrap_or_else(|| UNKNOWN_BRANCH.to_string())
}
