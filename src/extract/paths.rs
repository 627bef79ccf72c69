//! Path token extraction from excerpt lines.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// `./`, `src/` or `lib/`, path characters, a lowercase extension and an
/// optional `:line` or `:line:column` suffix.
static PATH_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\./|src/|lib/)[\w/.-]+\.[a-z]+(?::\d+(?::\d+)?)?")
        .expect("Valid path token regex")
});

/// Collect path-like tokens from lines, deduplicated in first-seen order.
///
/// Tokens are compared literally: `./src/a.ts` and `src/a.ts` are distinct.
pub fn extract_paths<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for line in lines {
        for m in PATH_TOKEN.find_iter(line.as_ref()) {
            if seen.insert(m.as_str()) {
                paths.push(m.as_str().to_string());
            }
        }
    }

    paths
}

/// Split a path token into the file path and its line number, if any.
///
/// A column suffix is discarded: `src/a.ts:42:10` becomes `("src/a.ts", Some(42))`.
pub fn split_line_suffix(token: &str) -> (&str, Option<usize>) {
    static LINE_SUFFIX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r":(\d+)(?::\d+)?$").expect("Valid line suffix regex"));

    match LINE_SUFFIX.captures(token) {
        Some(caps) => {
            let whole = caps.get(0).map_or(token.len(), |m| m.start());
            let line = caps.get(1).and_then(|m| m.as_str().parse().ok());
            (&token[..whole], line)
        }
        None => (token, None),
    }
}
