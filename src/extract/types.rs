//! Data structures shared by the extraction stages.

use serde::{Deserialize, Serialize};

/// Step name reported when no step-group marker precedes the failure.
pub const UNKNOWN_STEP: &str = "(unknown)";

/// Hard cap on the number of excerpt lines in a result.
pub const DEFAULT_MAX_ERROR_LINES: usize = 50;

/// Lines kept before the focus line when no step-group start is found.
pub const DEFAULT_LINES_BEFORE: usize = 30;

/// Lines kept after the focus line when no step-group end is found.
pub const DEFAULT_LINES_AFTER: usize = 5;

/// Size of the log tail used when nothing in the log looks like a failure.
pub const DEFAULT_FALLBACK_TAIL: usize = 30;

/// A single log line in both its raw and normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    /// Line as it appeared in the input
    pub raw: &'a str,
    /// Line after ANSI and timestamp stripping
    pub text: String,
}

impl LogLine<'_> {
    /// True if the normalized text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Which stage of the locator cascade produced the error indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Lines flagged by the provider with `##[error]`
    Marker,
    /// Lines matching a free-text failure signature
    Extended,
    /// Nothing matched; the log tail stands in for the failure
    Fallback,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Marker => write!(f, "marker"),
            Tier::Extended => write!(f, "extended"),
            Tier::Fallback => write!(f, "fallback"),
        }
    }
}

/// Ordered line indices judged to carry failure signal.
///
/// `indices` is always in order of appearance and is empty only for
/// [`Tier::Fallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub tier: Tier,
    pub indices: Vec<usize>,
}

impl Located {
    /// Index of the last located line (the focus of the context window).
    pub fn focus(&self) -> Option<usize> {
        self.indices.last().copied()
    }
}

/// A contiguous slice `[start, end]` of the log plus out-of-range error
/// lines appended after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub start: usize,
    /// Inclusive end index
    pub end: usize,
    /// Label of the enclosing step group, if one was found
    pub step_label: Option<String>,
    /// Located indices that fall after `end`, in order
    pub addendum: Vec<usize>,
}

impl ContextWindow {
    /// Line indices covered by the window followed by the addendum.
    pub fn line_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (self.start..=self.end).chain(self.addendum.iter().copied())
    }
}

/// Structured failure context extracted from one CI log.
///
/// Built once per extraction and handed whole to the prompt renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedError {
    /// Label of the failing step, or `(unknown)`
    pub step_name: String,
    /// Excerpt around the failure, at most 50 lines by default
    pub error_lines: Vec<String>,
    /// Every located failure line in the log, unwindowed
    pub all_errors: Vec<String>,
    /// `error_lines` joined by newlines
    pub full_context: String,
    /// Deduplicated path tokens found in `error_lines`
    pub file_paths: Vec<String>,
}

impl ExtractedError {
    /// The result for a log with no usable content.
    pub fn empty() -> Self {
        Self {
            step_name: UNKNOWN_STEP.to_string(),
            error_lines: Vec::new(),
            all_errors: Vec::new(),
            full_context: String::new(),
            file_paths: Vec::new(),
        }
    }

    /// True if no excerpt was captured.
    pub fn is_empty(&self) -> bool {
        self.error_lines.is_empty()
    }

    /// First extracted path, used as the source context hint.
    pub fn primary_path(&self) -> Option<&str> {
        self.file_paths.first().map(String::as_str)
    }
}

impl Default for ExtractedError {
    fn default() -> Self {
        Self::empty()
    }
}
