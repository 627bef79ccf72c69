//! Unit tests for the extraction pipeline

use failprompt::extract::{extract_paths, locate, normalize, Tier};
use failprompt::{extract_errors, ExtractedError, ExtractionConfig, Extractor};

use crate::helpers::load_fixture;

// =============================================================================
// Fixture logs
// =============================================================================

#[test]
fn typescript_failure_extracts_group_and_markers() {
    let result = extract_errors(&load_fixture("typescript_failure.log"));

    assert_eq!(result.step_name, "Run npx tsc --noEmit");
    assert_eq!(result.all_errors.len(), 2);
    assert!(result.all_errors[0].starts_with("##[error]src/index.ts:42:10"));
    assert_eq!(
        result.all_errors[1],
        "##[error]Process completed with exit code 2."
    );
    assert_eq!(result.error_lines.first().unwrap(), "##[group]Run npx tsc --noEmit");
    assert_eq!(result.error_lines.last().unwrap(), "##[endgroup]");
    assert_eq!(result.error_lines.len(), 5);
    assert_eq!(result.file_paths, vec!["src/index.ts:42:10"]);
    assert_eq!(result.full_context, result.error_lines.join("\n"));
}

#[test]
fn typescript_failure_has_no_ansi_or_timestamps() {
    let result = extract_errors(&load_fixture("typescript_failure.log"));
    for line in &result.error_lines {
        assert!(!line.contains('\x1b'), "ANSI survived in {:?}", line);
        assert!(!line.starts_with("2026-"), "timestamp survived in {:?}", line);
    }
    assert!(result.error_lines.contains(
        &"src/index.ts:42:10 - error TS2345: Argument of type 'string' is not assignable to parameter of type 'number'."
            .to_string()
    ));
}

#[test]
fn three_groups_report_last_step_and_every_marker() {
    let result = extract_errors(&load_fixture("three_groups.log"));
    assert_eq!(result.step_name, "Build");
    assert_eq!(
        result.all_errors,
        vec![
            "##[error]Lint failed",
            "##[error]Tests failed",
            "##[error]Build failed",
        ]
    );
    assert_eq!(
        result.error_lines,
        vec!["##[group]Build", "##[error]Build failed", "##[endgroup]"]
    );
}

#[test]
fn npm_errors_use_extended_tier() {
    let log = load_fixture("npm_install.log");
    let lines: Vec<String> = log.lines().map(normalize).collect();
    let located = locate(&lines);
    assert_eq!(located.tier, Tier::Extended);
    assert_eq!(located.indices, vec![2, 3, 4]);

    let result = extract_errors(&log);
    assert_eq!(result.step_name, "Run npm install");
    assert_eq!(result.all_errors.len(), 3);
    assert_eq!(result.error_lines.len(), 6);
    assert_eq!(result.file_paths, vec!["./logs/debug-0.log"]);
}

#[test]
fn passing_log_falls_back_to_tail() {
    let result = extract_errors(&load_fixture("passing.log"));
    assert_eq!(result.step_name, "(unknown)");
    assert!(result.all_errors.is_empty());
    assert_eq!(result.error_lines.len(), 4);
    assert!(result.error_lines[1].starts_with("Compiling failprompt"));
    assert!(result.file_paths.is_empty());
}

#[test]
fn prefixed_log_needs_opt_in_stripping() {
    let log = load_fixture("gh_prefixed.log");

    let plain = extract_errors(&log);
    assert_eq!(plain.step_name, "(unknown)");
    assert_eq!(plain.all_errors.len(), 1);
    assert!(plain.all_errors[0].ends_with("tests/test_app.py::test_add FAILED"));

    let stripped = Extractor::new(ExtractionConfig {
        strip_step_prefix: true,
        ..ExtractionConfig::default()
    })
    .extract(&log);
    assert_eq!(stripped.step_name, "Run pytest");
    assert_eq!(
        stripped.all_errors,
        vec!["##[error]Process completed with exit code 1."]
    );
    assert_eq!(stripped.error_lines.len(), 4);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn excerpt_never_exceeds_fifty_lines() {
    let mut log = vec!["##[group]Huge step".to_string()];
    log.extend((0..200).map(|i| format!("output {}", i)));
    log.push("##[error]boom".to_string());
    log.push("##[endgroup]".to_string());

    let result = extract_errors(&log.join("\n"));
    assert_eq!(result.error_lines.len(), 50);
    assert_eq!(result.error_lines[0], "##[group]Huge step");
    assert_eq!(result.step_name, "Huge step");
}

#[test]
fn unbounded_window_without_groups() {
    let mut log: Vec<String> = (0..100).map(|i| format!("noise {}", i)).collect();
    log[60] = "##[error]broken".to_string();

    let result = extract_errors(&log.join("\n"));
    assert_eq!(result.step_name, "(unknown)");
    assert_eq!(result.error_lines.first().unwrap(), "noise 30");
    assert_eq!(result.error_lines.last().unwrap(), "noise 65");
    assert_eq!(result.error_lines.len(), 36);
}

#[test]
fn file_paths_have_no_duplicates() {
    let log = "##[error]src/a.ts:1 failed\n\
               ##[error]src/a.ts:1 failed again\n\
               see ./src/b.rs and src/a.ts:1";
    let result = extract_errors(log);
    let mut sorted = result.file_paths.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), result.file_paths.len());
    assert_eq!(result.file_paths[0], "src/a.ts:1");
}

#[test]
fn marker_tier_shadows_extended_matches() {
    let log = "Error: first problem\nnpm ERR! second\n##[error]the marker\nFAILED later";
    let result = extract_errors(log);
    assert_eq!(result.all_errors, vec!["##[error]the marker"]);
}

#[test]
fn marker_is_case_insensitive() {
    let result = extract_errors("##[ERROR]Shouting failure");
    assert_eq!(result.all_errors, vec!["##[ERROR]Shouting failure"]);
}

#[test]
fn blank_input_yields_empty_result() {
    let empty = extract_errors(" \n\t\n");
    assert_eq!(empty, ExtractedError::empty());
    assert_eq!(empty.step_name, "(unknown)");
    assert!(empty.full_context.is_empty());
}

#[test]
fn custom_limits_shrink_excerpt() {
    let extractor = Extractor::new(ExtractionConfig {
        max_error_lines: 2,
        ..ExtractionConfig::default()
    });
    let result = extractor.extract(&load_fixture("three_groups.log"));
    assert_eq!(result.error_lines, vec!["##[group]Build", "##[error]Build failed"]);
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn path_token_keeps_line_and_column() {
    let paths = extract_paths(&["##[error]src/index.ts:42:10 - error TS2345"]);
    assert!(paths.contains(&"src/index.ts:42:10".to_string()));
}

#[test]
fn exit_code_line_has_no_paths() {
    assert!(extract_paths(&["##[error]Process completed with exit code 1."]).is_empty());
}

#[test]
fn path_prefixes_are_recognized() {
    let paths = extract_paths(&[
        "at ./config/app.json",
        "in lib/utils.py:7",
        "in SRC/Main.java:12",
    ]);
    assert_eq!(paths, vec!["./config/app.json", "lib/utils.py:7", "SRC/Main.java:12"]);
}
