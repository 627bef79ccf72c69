//! Error locator: the marker -> extended -> fallback cascade.
//!
//! Each tier is a pure line predicate. Tiers are tried in order and the first
//! one that flags at least one line wins; later tiers are never consulted.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use tracing::debug;

use super::types::{Located, Tier};

static ERROR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^##\[error\]").expect("Valid error marker regex"));

/// Free-text failure signatures, by name. Any single match flags a line.
pub const EXTENDED_SIGNATURES: &[(&str, &str)] = &[
    ("error-prefix", r"^(?:Error|error):"),
    ("failed-word", r"\bFAILED\b"),
    ("exit-code", r"(?i)failed with exit code"),
    ("npm-err", r"(?i)^npm ERR!"),
    ("enoent", r"\bENOENT\b"),
    ("missing-module", r"(?i)Cannot find module"),
    ("syntax-error", r"(?i)^SyntaxError:"),
];

static EXTENDED_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(EXTENDED_SIGNATURES.iter().map(|(_, pattern)| *pattern))
        .expect("Valid extended signature regexes")
});

/// Ordered tier predicates. Fallback has no predicate.
const TIERS: [(Tier, fn(&str) -> bool); 2] = [
    (Tier::Marker, is_error_marker),
    (Tier::Extended, is_extended_error),
];

/// True if the line carries the provider's `##[error]` annotation.
pub fn is_error_marker(line: &str) -> bool {
    ERROR_MARKER.is_match(line)
}

/// True if the line matches any extended failure signature.
pub fn is_extended_error(line: &str) -> bool {
    EXTENDED_SET.is_match(line)
}

/// Names of the extended signatures a line matches, in declaration order.
pub fn matching_signatures(line: &str) -> Vec<&'static str> {
    EXTENDED_SET
        .matches(line)
        .into_iter()
        .map(|i| EXTENDED_SIGNATURES[i].0)
        .collect()
}

/// Indices of every line the predicate flags, in order.
pub fn find_indices<S: AsRef<str>>(lines: &[S], matcher: fn(&str) -> bool) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher(line.as_ref()))
        .map(|(i, _)| i)
        .collect()
}

/// Run the cascade over normalized lines.
pub fn locate<S: AsRef<str>>(lines: &[S]) -> Located {
    for (tier, matcher) in TIERS {
        let indices = find_indices(lines, matcher);
        if !indices.is_empty() {
            debug!(%tier, count = indices.len(), "located failure lines");
            let located = Located { tier, indices };
            if tier == Tier::Extended {
                if let Some(focus) = located.focus() {
                    debug!(
                        signatures = ?matching_signatures(lines[focus].as_ref()),
                        "focus line signatures"
                    );
                }
            }
            return located;
        }
        debug!(%tier, "no lines matched");
    }

    Located {
        tier: Tier::Fallback,
        indices: Vec::new(),
    }
}
