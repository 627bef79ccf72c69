//! Context window extraction around the last located failure.
//!
//! The window runs from the nearest `##[group]` at or before the focus line
//! (or a fixed number of lines before it) to the nearest `##[endgroup]` at or
//! after it (or a fixed number of lines after it). Located lines past the
//! window end are appended so no failure signal is silently dropped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::paths::extract_paths;
use super::types::{
    ContextWindow, ExtractedError, Located, DEFAULT_LINES_AFTER, DEFAULT_LINES_BEFORE,
    DEFAULT_MAX_ERROR_LINES, UNKNOWN_STEP,
};

static GROUP_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^##\[group\](.+)").expect("Valid group regex"));

static GROUP_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^##\[endgroup\]").expect("Valid endgroup regex"));

/// Bounds used when carving the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimits {
    /// Lines before the focus when no group start is found
    pub lines_before: usize,
    /// Lines after the focus when no group end is found
    pub lines_after: usize,
    /// Cap applied after assembly
    pub max_lines: usize,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            lines_before: DEFAULT_LINES_BEFORE,
            lines_after: DEFAULT_LINES_AFTER,
            max_lines: DEFAULT_MAX_ERROR_LINES,
        }
    }
}

/// Label of a `##[group]` line, trimmed.
pub fn group_label(line: &str) -> Option<&str> {
    GROUP_START
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// True if the line closes a step group.
pub fn is_group_end(line: &str) -> bool {
    GROUP_END.is_match(line)
}

/// Scan backward from `focus` (inclusive) for the nearest group start.
///
/// Returns the index and trimmed label.
pub fn find_group_start<S: AsRef<str>>(lines: &[S], focus: usize) -> Option<(usize, String)> {
    let focus = focus.min(lines.len().checked_sub(1)?);
    (0..=focus)
        .rev()
        .find_map(|i| group_label(lines[i].as_ref()).map(|label| (i, label.to_string())))
}

/// Scan forward from `focus` (inclusive) for the nearest group end.
pub fn find_group_end<S: AsRef<str>>(lines: &[S], focus: usize) -> Option<usize> {
    (focus..lines.len()).find(|&i| is_group_end(lines[i].as_ref()))
}

/// Compute the window around the focus of a located set.
///
/// Returns `None` if nothing was located or the focus points past the end
/// of `lines`.
pub fn compute_window<S: AsRef<str>>(
    lines: &[S],
    located: &Located,
    limits: WindowLimits,
) -> Option<ContextWindow> {
    let focus = located.focus()?;
    let last_index = lines.len().checked_sub(1)?;
    if focus > last_index {
        return None;
    }

    let (start, step_label) = match find_group_start(lines, focus) {
        Some((i, label)) => (i, Some(label)),
        None => (focus.saturating_sub(limits.lines_before), None),
    };

    let end = find_group_end(lines, focus)
        .unwrap_or_else(|| last_index.min(focus.saturating_add(limits.lines_after)));

    let addendum = located
        .indices
        .iter()
        .copied()
        .filter(|&i| i > end)
        .collect();

    Some(ContextWindow {
        start,
        end,
        step_label,
        addendum,
    })
}

/// Build the result for the marker and extended tiers.
///
/// Blank lines are dropped and the excerpt is cut to `limits.max_lines`
/// after the window and addendum are joined, so a long addendum can still
/// lose its tail.
pub fn extract_window<S: AsRef<str>>(
    lines: &[S],
    located: &Located,
    limits: WindowLimits,
) -> ExtractedError {
    let Some(window) = compute_window(lines, located, limits) else {
        return ExtractedError::empty();
    };

    debug!(
        start = window.start,
        end = window.end,
        addendum = window.addendum.len(),
        step = window.step_label.as_deref().unwrap_or(UNKNOWN_STEP),
        "computed context window"
    );

    let all_errors: Vec<String> = located
        .indices
        .iter()
        .filter_map(|&i| lines.get(i))
        .map(|line| line.as_ref().to_string())
        .collect();

    let error_lines: Vec<String> = window
        .line_indices()
        .filter_map(|i| lines.get(i))
        .map(|line| line.as_ref())
        .filter(|line| !line.trim().is_empty())
        .take(limits.max_lines)
        .map(str::to_string)
        .collect();

    let full_context = error_lines.join("\n");
    let file_paths = extract_paths(&error_lines);

    ExtractedError {
        step_name: window
            .step_label
            .unwrap_or_else(|| UNKNOWN_STEP.to_string()),
        error_lines,
        all_errors,
        full_context,
        file_paths,
    }
}
