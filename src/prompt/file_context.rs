//! Local source excerpts for the prompt's Source Context block.
//!
//! Reading is best-effort: a missing or unreadable file yields `None` and
//! never an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extract::paths::split_line_suffix;

/// A source excerpt loaded from the local checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    /// Path the excerpt was read from, as resolved against the base directory
    pub file_path: String,
    pub content: String,
    /// File extension without the dot, or `text`
    pub extension: String,
}

/// How much of a file to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContextOptions {
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Lines shown on each side of the failing line
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,
    /// Lines shown from the top when the token has no line number
    #[serde(default = "default_max_file_lines")]
    pub max_file_lines: usize,
}

pub fn default_context_radius() -> usize {
    20
}

pub fn default_max_file_lines() -> usize {
    200
}

impl Default for FileContextOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            context_radius: default_context_radius(),
            max_file_lines: default_max_file_lines(),
        }
    }
}

/// Load the excerpt for a path token such as `src/foo.ts:42`.
///
/// Tries the path as written, then without a leading `./`.
pub fn read_file_context(token: &str, options: &FileContextOptions) -> Option<FileContext> {
    let (path, error_line) = split_line_suffix(token);

    let mut candidates = vec![path];
    if let Some(stripped) = path.strip_prefix("./") {
        candidates.push(stripped);
    }

    let (candidate, resolved) = candidates
        .into_iter()
        .map(|c| (c, options.base_dir.join(c)))
        .find(|(_, full)| full.is_file())?;

    let raw = match fs::read_to_string(&resolved) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(path = %resolved.display(), error = %e, "could not read source file");
            return None;
        }
    };

    let all_lines: Vec<&str> = raw.split('\n').collect();
    let selected = match error_line {
        Some(line) => {
            let start = line.saturating_sub(options.context_radius + 1);
            let end = all_lines.len().min(line.saturating_add(options.context_radius));
            all_lines.get(start..end).unwrap_or(&[])
        }
        None => &all_lines[..all_lines.len().min(options.max_file_lines)],
    };

    Some(FileContext {
        file_path: candidate.to_string(),
        content: selected.join("\n"),
        extension: extension_of(Path::new(candidate)),
    })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .unwrap_or("text")
        .to_string()
}
