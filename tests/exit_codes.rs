//! Exit status checks for the demo binary.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Demo rounds completed                     |
//! |  1   | Usage/configuration error, or fatal line  |

use assert_cmd::Command;
use predicates::prelude::*;

fn demo() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_logstate-demo"));
    command
        .env_remove("LOGSTATE_LEVEL")
        .env_remove("LOGSTATE_VERBOSE");
    command
}

#[test]
fn plain_run_succeeds() {
    demo().assert().success();
}

#[test]
fn unknown_switch_exits_with_one() {
    demo()
        .arg("--bogus")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

#[test]
fn fatal_writes_one_line_and_exits_with_one() {
    demo()
        .arg("--fatal")
        .assert()
        .code(1)
        .stderr(predicate::str::ends_with("Fatal: Test 42\n"));
}

#[test]
fn fatal_bypasses_the_highest_level() {
    let assert = demo()
        .args(["--level", "fatal", "--fatal"])
        .assert()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf-8");
    assert_eq!(stderr, "Fatal: Test 42\n");
}

#[test]
fn fatal_in_verbose_mode_carries_call_site() {
    demo()
        .args(["-vvv", "--fatal"])
        .assert()
        .code(1)
        .stderr(predicate::str::is_match(r"Fatal: \[.*lib\.rs:\d+ \(cli::run_with_env.*\)\]: Test 42\n$").expect("valid regex"));
}

#[test]
fn stress_round_completes() {
    demo()
        .args(["--threads", "4", "--sweep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Testing with level: 3 and verbosity true"));
}

#[cfg(unix)]
#[test]
fn fatal_exits_with_one_when_stderr_is_closed() {
    Command::new("sh")
        .args(["-c", "exec \"$0\" --fatal 2>&-"])
        .arg(env!("CARGO_BIN_EXE_logstate-demo"))
        .env_remove("LOGSTATE_LEVEL")
        .env_remove("LOGSTATE_VERBOSE")
        .assert()
        .code(1);
}

#[test]
fn concurrent_workers_never_split_a_line() {
    let assert = demo().args(["--threads", "4"]).assert().success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf-8");
    let whole_line = predicate::str::is_match(
        r"^(Warning|Error): (\[[^\]]+\]: )?(Test \d+.*|worker \d+ iteration \d+)$",
    )
    .expect("valid regex");
    assert!(stderr.ends_with('\n'), "stderr: {stderr}");
    assert!(stderr.lines().any(|line| line.contains("worker 3 iteration")));
    for line in stderr.lines() {
        assert!(whole_line.eval(line), "interleaved line: {line:?}");
    }
}
