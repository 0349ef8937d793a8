//! End-to-end tests for the `toggle-file` binary.
//!
//! Each test builds a small project in a temporary directory with a `.toggle-file.yaml`
//! and runs the binary from there.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const RULES: &str = r#"
rules:
  - name: header
    match: '^(.*)\.c$'
    map: '$1.h'
  - name: test
    match: '^(.*)\.c$'
    map: '${1}_test.c'
"#;

fn project(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".toggle-file.yaml"), RULES).unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    dir
}

fn toggle_file(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_toggle-file"));
    cmd.current_dir(dir)
        .env_remove("TOGGLE_FILE_RULES")
        .env_remove("RUST_LOG");
    cmd
}

/// Runs with `input` piped to stdin, so the numbered prompt is used.
fn run_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = toggle_file(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute toggle-file");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_and_version() {
    let dir = TempDir::new().unwrap();
    let output = toggle_file(dir.path()).arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("switch"));

    let output = toggle_file(dir.path()).arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("toggle-file"));
}

#[test]
fn test_switch_single_candidate_prints_it() {
    let dir = project(&["src/a.c", "src/a.h"]);
    let output = run_with_input(dir.path(), &["switch", "src/a.c"], "");

    assert!(output.status.success(), "switch failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "src/a.h\n");
    assert!(
        !stderr(&output).contains("Switch to"),
        "a single candidate must not prompt"
    );
}

#[test]
fn test_switch_prompts_between_candidates() {
    let dir = project(&["src/a.c", "src/a.h", "src/a_test.c"]);
    let output = run_with_input(dir.path(), &["switch", "src/a.c"], "2\n");

    assert!(output.status.success(), "switch failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "src/a_test.c\n");
    let prompt = stderr(&output);
    assert!(prompt.contains("Switch to:"));
    assert!(prompt.contains("1) src/a.h"));
    assert!(prompt.contains("2) src/a_test.c"));
}

#[test]
fn test_switch_cancelled_prints_nothing() {
    let dir = project(&["src/a.c", "src/a.h", "src/a_test.c"]);
    let output = run_with_input(dir.path(), &["switch", "src/a.c"], "\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_switch_without_match_is_silent() {
    let dir = project(&["README.md"]);
    let output = run_with_input(dir.path(), &["switch", "README.md"], "");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_candidates_json() {
    let dir = project(&["src/a.c", "src/a_test.c"]);
    let output = toggle_file(dir.path())
        .args(["candidates", "src/a.c", "--all", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "path": "src/a.h", "rule": "header", "mapper": 0, "exists": false },
            { "path": "src/a_test.c", "rule": "test", "mapper": 0, "exists": true }
        ])
    );
}

#[test]
fn test_rules_listing_with_explicit_file() {
    let dir = project(&[]);
    let rules = dir.path().join("custom.yaml");
    fs::write(
        &rules,
        "rules:\n  - name: only\n    match: 'x'\n    map: ['y', 'z']\n",
    )
    .unwrap();

    let output = toggle_file(dir.path())
        .args(["rules", "--rules"])
        .arg(&rules)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "only\tx\t2 mapper(s)\n");
}

#[test]
fn test_rules_from_environment() {
    let dir = project(&[]);
    let rules = dir.path().join("env.yaml");
    fs::write(&rules, "rules:\n  - name: env\n    match: 'x'\n    map: 'y'\n").unwrap();

    let output = toggle_file(dir.path())
        .arg("rules")
        .env("TOGGLE_FILE_RULES", &rules)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "env\tx\t1 mapper(s)\n");
}

#[test]
fn test_invalid_rule_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".toggle-file.yaml"),
        "rules:\n  - name: bad\n    match: '('\n    map: 'y'\n",
    )
    .unwrap();

    let output = toggle_file(dir.path()).arg("rules").output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("error:"));
}

#[test]
fn test_missing_explicit_rule_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = toggle_file(dir.path())
        .args(["candidates", "a.c", "--rules", "does-not-exist.yaml"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error:"));
    assert!(stderr(&output).contains("does-not-exist.yaml"));
}

#[cfg(unix)]
#[test]
fn test_switch_open_with_quoted_command() {
    let dir = project(&["src/a.c", "src/a.h"]);
    let output = run_with_input(
        dir.path(),
        &["switch", "src/a.c", "--open-with", r#"sh -c 'echo "opened $0"'"#],
        "",
    );

    assert!(output.status.success(), "switch failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "opened src/a.h\n");
}

#[cfg(unix)]
#[test]
fn test_switch_open_with_exit_status() {
    let dir = project(&["src/a.c", "src/a.h"]);

    let output = run_with_input(dir.path(), &["switch", "src/a.c", "--open-with", "true"], "");
    assert!(output.status.success(), "switch failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "");

    let output = run_with_input(dir.path(), &["switch", "src/a.c", "--open-with", "false"], "");
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.starts_with("error: cannot open 'src/a.h'"), "{err}");
    assert!(err.contains("'false' exited with"), "{err}");
}

#[test]
fn test_switch_rejects_unterminated_open_command() {
    let dir = project(&["src/a.c", "src/a.h"]);
    let output = run_with_input(
        dir.path(),
        &["switch", "src/a.c", "--open-with", "sh -c 'echo"],
        "",
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: cannot parse --open-with"));
}

#[test]
fn test_rules_json() {
    let dir = project(&[]);
    let output = toggle_file(dir.path())
        .args(["rules", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "name": "header", "match": r"^(.*)\.c$", "mappers": 1 },
            { "name": "test", "match": r"^(.*)\.c$", "mappers": 1 }
        ])
    );
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let dir = project(&["src/a.c", "src/a.h"]);

    let quiet = run_with_input(dir.path(), &["switch", "src/a.c"], "");
    assert!(quiet.status.success());
    assert!(!stderr(&quiet).contains("loaded rule file"));

    let verbose = run_with_input(dir.path(), &["-v", "switch", "src/a.c"], "");
    assert!(verbose.status.success(), "{}", stderr(&verbose));
    assert_eq!(stdout(&verbose), "src/a.h\n");
    let log = stderr(&verbose);
    assert!(log.contains("DEBUG"), "{log}");
    assert!(log.contains("loaded rule file"), "{log}");
    assert!(log.contains("resolved candidates"), "{log}");
}
