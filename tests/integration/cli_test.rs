//! End-to-end tests for the default command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// failprompt running inside `dir` with an isolated, absent config file
fn failprompt_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("failprompt").unwrap();
    cmd.current_dir(dir)
        .env("FAILPROMPT_CONFIG", dir.join("no-config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn prompt_from_log_file() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-R", "myorg/myapp", "-r", "4242", "--log"])
        .arg(fixture("typescript_failure.log"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("## CI Failure — myorg/myapp / "))
        .stdout(predicate::str::contains("**Run:** 4242"))
        .stdout(predicate::str::contains("**Failing step:** Run npx tsc --noEmit"))
        .stdout(predicate::str::contains("##[error]Process completed with exit code 2."))
        .stdout(predicate::str::contains("### Source Context").not())
        .stderr(predicate::str::contains("# Tip: pipe to pbcopy"));
}

#[test]
fn run_label_defaults_to_latest() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log"])
        .arg(fixture("three_groups.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("**Run:** latest"))
        .stdout(predicate::str::contains("**Failing step:** Build"));
}

#[test]
fn source_context_read_from_working_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    let source: Vec<String> = (1..=50).map(|i| format!("// line {}", i)).collect();
    fs::write(temp.path().join("src/index.ts"), source.join("\n")).unwrap();

    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log"])
        .arg(fixture("typescript_failure.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("### Source Context\n```ts\n// line 22\n"))
        .stdout(predicate::str::contains("// line 50\n```"));
}

#[test]
fn no_context_flag_skips_source() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/index.ts"), "export {};\n").unwrap();

    failprompt_in(temp.path())
        .args(["-R", "o/r", "--no-context", "--log"])
        .arg(fixture("typescript_failure.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("### Source Context").not());
}

#[test]
fn json_format_emits_extracted_error() {
    let temp = TempDir::new().unwrap();
    let output = failprompt_in(temp.path())
        .args(["--format", "json", "--log"])
        .arg(fixture("three_groups.log"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stepName"], "Build");
    assert_eq!(value["allErrors"].as_array().unwrap().len(), 3);
    assert_eq!(value["errorLines"][1], "##[error]Build failed");
    assert!(value["filePaths"].as_array().unwrap().is_empty());
}

#[test]
fn reads_log_from_stdin() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log", "-"])
        .write_stdin(fs::read_to_string(fixture("npm_install.log")).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("**Failing step:** Run npm install"))
        .stdout(predicate::str::contains("npm ERR! code E404"));
}

#[test]
fn empty_stdin_renders_placeholder() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("(no error output captured)"))
        .stdout(predicate::str::contains("**Failing step:** (unknown)"));
}

#[test]
fn strip_prefix_flag_recovers_step() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-R", "o/r", "--strip-prefix", "--log"])
        .arg(fixture("gh_prefixed.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("**Failing step:** Run pytest"));

    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log"])
        .arg(fixture("gh_prefixed.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("**Failing step:** (unknown)"));
}

#[test]
fn output_flag_writes_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("prompt.md");

    failprompt_in(temp.path())
        .args(["-R", "o/r", "--log"])
        .arg(fixture("three_groups.log"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("✓ Prompt written to"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("## CI Failure — o/r / "));
    assert!(written.ends_with("provide the corrected code."));
}

#[test]
fn json_output_file_reports_json() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("error.json");

    failprompt_in(temp.path())
        .args(["--format", "json", "--log"])
        .arg(fixture("three_groups.log"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("✓ JSON written to"))
        .stderr(predicate::str::contains("Prompt written").not());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["stepName"], "Build");
}

#[test]
fn missing_log_file_fails_with_message() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["--log", "does-not-exist.log"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("✗ Error: Failed to read log from does-not-exist.log"));
}

#[test]
fn verbose_logs_pipeline_to_stderr() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .args(["-v", "-R", "o/r", "--log"])
        .arg(fixture("three_groups.log"))
        .assert()
        .success()
        .stderr(predicate::str::contains("extracted error"));
}

#[test]
fn missing_gh_is_reported() {
    let temp = TempDir::new().unwrap();
    failprompt_in(temp.path())
        .env("PATH", temp.path())
        .args(["-R", "o/r", "-r", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires the GitHub CLI (gh)"));
}
