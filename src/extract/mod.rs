//! Error extraction engine for raw CI logs.
//!
//! Turns one unstructured log into an [`ExtractedError`] in a fixed number of
//! linear passes:
//!
//! 1. [`normalize`] - strip ANSI codes and leading timestamps from every line
//! 2. [`locate`] - find failure lines with the marker -> extended -> fallback cascade
//! 3. [`window`] - carve a bounded excerpt around the last located line
//! 4. [`paths`] - mine path tokens out of the excerpt
//!
//! Extraction never fails. An unrecognized log still yields its tail, and an
//! empty log yields [`ExtractedError::empty`].

pub mod locate;
pub mod normalize;
pub mod paths;
pub mod types;
pub mod window;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use locate::{is_error_marker, is_extended_error, locate};
pub use normalize::{normalize, NormalizeOptions};
pub use paths::extract_paths;
pub use types::{
    ContextWindow, ExtractedError, Located, LogLine, Tier, DEFAULT_FALLBACK_TAIL,
    DEFAULT_LINES_AFTER, DEFAULT_LINES_BEFORE, DEFAULT_MAX_ERROR_LINES, UNKNOWN_STEP,
};
pub use window::{extract_window, WindowLimits};

/// Upper bound accepted for `max_error_lines`.
const MAX_ERROR_LINES_LIMIT: usize = 1000;

/// Tunables for the extraction pipeline.
///
/// Defaults reproduce the standard behavior; every field is optional in the
/// `[extract]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Hard cap on excerpt lines
    #[serde(default = "default_max_error_lines")]
    pub max_error_lines: usize,
    /// Lines kept before the focus line without a step-group start
    #[serde(default = "default_lines_before")]
    pub lines_before: usize,
    /// Lines kept after the focus line without a step-group end
    #[serde(default = "default_lines_after")]
    pub lines_after: usize,
    /// Log tail size used when nothing looks like a failure
    #[serde(default = "default_fallback_tail")]
    pub fallback_tail: usize,
    /// Strip `gh run view --log` job/step prefixes before matching
    #[serde(default)]
    pub strip_step_prefix: bool,
}

pub fn default_max_error_lines() -> usize {
    DEFAULT_MAX_ERROR_LINES
}

pub fn default_lines_before() -> usize {
    DEFAULT_LINES_BEFORE
}

pub fn default_lines_after() -> usize {
    DEFAULT_LINES_AFTER
}

pub fn default_fallback_tail() -> usize {
    DEFAULT_FALLBACK_TAIL
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_error_lines: default_max_error_lines(),
            lines_before: default_lines_before(),
            lines_after: default_lines_after(),
            fallback_tail: default_fallback_tail(),
            strip_step_prefix: false,
        }
    }
}

impl ExtractionConfig {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or a description of the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_error_lines == 0 {
            return Err("extract.max_error_lines must be > 0".to_string());
        }
        if self.max_error_lines > MAX_ERROR_LINES_LIMIT {
            return Err(format!(
                "extract.max_error_lines {} exceeds maximum ({})",
                self.max_error_lines, MAX_ERROR_LINES_LIMIT
            ));
        }
        if self.fallback_tail == 0 {
            return Err("extract.fallback_tail must be > 0".to_string());
        }
        Ok(())
    }

    fn window_limits(&self) -> WindowLimits {
        WindowLimits {
            lines_before: self.lines_before,
            lines_after: self.lines_after,
            max_lines: self.max_error_lines,
        }
    }

    fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strip_step_prefix: self.strip_step_prefix,
        }
    }
}

/// Runs the extraction pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract structured failure context from a raw log.
    pub fn extract(&self, raw_log: &str) -> ExtractedError {
        if raw_log.trim().is_empty() {
            return ExtractedError::empty();
        }

        let log_lines = normalize::normalize_lines(raw_log, self.config.normalize_options());
        let rewritten = log_lines.iter().filter(|l| l.raw != l.text).count();
        debug!(lines = log_lines.len(), rewritten, "normalized log");

        let lines: Vec<&str> = log_lines.iter().map(|l| l.text.as_str()).collect();
        let located = locate(&lines);

        match located.tier {
            Tier::Marker | Tier::Extended => {
                extract_window(&lines, &located, self.config.window_limits())
            }
            Tier::Fallback => self.extract_tail(&log_lines),
        }
    }

    /// Last `fallback_tail` lines, blanks dropped, with no error semantics.
    fn extract_tail(&self, log_lines: &[LogLine<'_>]) -> ExtractedError {
        let start = log_lines.len().saturating_sub(self.config.fallback_tail);
        let tail: Vec<String> = log_lines[start..]
            .iter()
            .filter(|line| !line.is_blank())
            .take(self.config.max_error_lines)
            .map(|line| line.text.clone())
            .collect();

        debug!(kept = tail.len(), "using log tail as fallback context");

        if tail.is_empty() {
            return ExtractedError::empty();
        }

        ExtractedError {
            step_name: UNKNOWN_STEP.to_string(),
            full_context: tail.join("\n"),
            file_paths: extract_paths(&tail),
            error_lines: tail,
            all_errors: Vec::new(),
        }
    }
}

/// Extract structured failure context from a raw log with default settings.
pub fn extract_errors(raw_log: &str) -> ExtractedError {
    Extractor::default().extract(raw_log)
}
