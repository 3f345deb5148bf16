//! End-to-end checks of the demo binary's output routing and line format.

use std::process::{Command, Output};

fn demo_output(args: &[&str], env: &[(&str, &str)]) -> Output {
    let path = env!("CARGO_BIN_EXE_logstate-demo");
    let mut command = Command::new(path);
    command
        .args(args)
        .env_remove("LOGSTATE_LEVEL")
        .env_remove("LOGSTATE_VERBOSE");
    for (key, value) in env {
        command.env(key, value);
    }
    command
        .output()
        .unwrap_or_else(|error| panic!("failed to run {path}: {error}"))
}

fn streams(output: &Output) -> (String, String) {
    (
        String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8"),
        String::from_utf8(output.stderr.clone()).expect("stderr is UTF-8"),
    )
}

#[test]
fn help_lists_usage() {
    let output = demo_output(&["--help"], &[]);
    assert!(output.status.success(), "--help should succeed");
    assert!(output.stderr.is_empty(), "help output should not write to stderr");
    let (stdout, _) = streams(&output);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("logstate-demo"));
}

#[test]
fn default_state_emits_only_warnings_and_errors() {
    let output = demo_output(&[], &[]);
    assert!(output.status.success());
    let (stdout, stderr) = streams(&output);

    assert!(stdout.contains("Testing with level: 2 and verbosity false"));
    assert!(!stdout.contains("Debug:"));
    assert!(!stdout.contains("Info:"));

    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(
        lines,
        [
            "Warning: Test 6",
            "Warning: Test 7 test",
            "Warning: Test 8: 42",
            "Warning: Test 9: 6",
            "Error: Test 10",
            "Error: Test 11 test",
        ]
    );
}

#[test]
fn verbose_debug_lines_carry_call_site() {
    let output = demo_output(&["-vvv"], &[]);
    assert!(output.status.success());
    let (stdout, stderr) = streams(&output);

    let info = stdout
        .lines()
        .find(|line| line.starts_with("Info: "))
        .expect("info line present");
    assert!(info.starts_with("Info: ["), "{info}");
    assert!(info.contains("demo.rs:"), "{info}");
    assert!(info.ends_with("(cli::demo::emit_round)]: Test 4"), "{info}");

    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with("Debug: [") && line.ends_with("]: Test 3 with a value of 42"))
    );
    assert!(stderr.lines().all(|line| line.contains("(cli::demo::emit_round)]: ")));
}

#[test]
fn debug_lines_carry_call_site_without_verbose() {
    let output = demo_output(&["--level", "debug"], &[]);
    let (stdout, _) = streams(&output);
    assert!(stdout.lines().any(|line| line.starts_with("Debug: [")));
    assert!(stdout.lines().any(|line| line == "Info: Test 4"));
}

#[test]
fn environment_configures_the_register() {
    let output = demo_output(&[], &[("LOGSTATE_LEVEL", "error"), ("LOGSTATE_VERBOSE", "0")]);
    assert!(output.status.success());
    let (stdout, stderr) = streams(&output);
    assert!(stdout.contains("Testing with level: 3 and verbosity false"));
    assert_eq!(stderr, "Error: Test 10\nError: Test 11 test\n");
}

#[test]
fn malformed_environment_fails() {
    let output = demo_output(&[], &[("LOGSTATE_LEVEL", "chatty")]);
    assert_eq!(output.status.code(), Some(1));
    let (_, stderr) = streams(&output);
    assert!(stderr.contains("invalid LOGSTATE_LEVEL"));
}

#[test]
fn tracing_events_share_the_gate() {
    let output = demo_output(&["--tracing"], &[]);
    assert!(output.status.success());
    let (stdout, stderr) = streams(&output);
    assert!(stderr.contains("Warning: tracing warning routed through the register"));
    assert!(!stdout.contains("tracing info"));
}
