//! Line normalization: ANSI and timestamp stripping.
//!
//! ANSI stripping is one forward pass that also removes nested sequences;
//! prefix and timestamp stripping repeat until the line stops shrinking.
//! Either way `normalize(normalize(x))` equals `normalize(x)` and the cost
//! stays linear in the line length.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::LogLine;

const ESC: u8 = 0x1b;

/// ISO-8601 timestamp at column 0, e.g. `2024-01-01T12:00:00.0000000Z `.
static LEADING_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T[\d:.]+Z\s*").expect("Valid timestamp regex")
});

/// `gh run view --log` prefix: `<job>\t<step>\t`.
static STEP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\t]+\t[^\t]+\t").expect("Valid step prefix regex"));

/// Options for the line normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Also strip a `<job>\t<step>\t` prefix when a timestamp follows it
    pub strip_step_prefix: bool,
}

/// Remove every ANSI CSI sequence (ESC `[`, digits or `;`, a final letter).
///
/// Output is built left to right. Whenever a letter completes a sequence at
/// the end of the buffer, that sequence is cut off, so a sequence spliced
/// together by an inner removal is caught in the same pass.
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.as_bytes().contains(&ESC) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        out.push(c);
        if c.is_ascii_alphabetic() {
            if let Some(start) = trailing_sequence_start(out.as_bytes()) {
                out.truncate(start);
            }
        }
    }
    Cow::Owned(out)
}

/// Start of a CSI sequence ending at the last byte of `buf`, if any.
fn trailing_sequence_start(buf: &[u8]) -> Option<usize> {
    let mut i = buf.len().checked_sub(1)?;
    while i > 0 && matches!(buf[i - 1], b'0'..=b'9' | b';') {
        i -= 1;
    }
    (i >= 2 && buf[i - 1] == b'[' && buf[i - 2] == ESC).then(|| i - 2)
}

/// Remove leading ISO-8601 timestamps from a line.
pub fn strip_timestamp(line: &str) -> &str {
    let mut rest = line;
    while let Some(m) = LEADING_TIMESTAMP.find(rest) {
        if m.end() == 0 {
            break;
        }
        rest = &rest[m.end()..];
    }
    rest
}

/// Remove a `gh` export prefix (`<job>\t<step>\t`) if a timestamp follows it.
///
/// Lines without a trailing timestamp are left alone so tab-separated program
/// output is never mistaken for a prefix.
pub fn strip_step_prefix(line: &str) -> &str {
    match STEP_PREFIX.find(line) {
        Some(m) if LEADING_TIMESTAMP.is_match(&line[m.end()..]) => &line[m.end()..],
        _ => line,
    }
}

/// Normalize a single line with the default options.
pub fn normalize(line: &str) -> String {
    normalize_with(line, NormalizeOptions::default())
}

/// Normalize a single line.
///
/// With `strip_step_prefix`, prefix and timestamp stripping alternate until
/// neither removes anything.
pub fn normalize_with(line: &str, options: NormalizeOptions) -> String {
    let without_ansi = strip_ansi(line);
    let mut text: &str = &without_ansi;
    loop {
        let before = text.len();
        if options.strip_step_prefix {
            text = strip_step_prefix(text);
        }
        text = strip_timestamp(text);
        if text.len() == before {
            break;
        }
    }
    text.to_string()
}

/// Split a raw log on `\n` and normalize every line.
pub fn normalize_lines(raw: &str, options: NormalizeOptions) -> Vec<LogLine<'_>> {
    raw.split('\n')
        .map(|line| LogLine {
            raw: line,
            text: normalize_with(line, options),
        })
        .collect()
}
