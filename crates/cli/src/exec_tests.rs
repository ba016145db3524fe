#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use tempfile::tempdir;

use super::*;

fn run(command: &str, timeout: Option<Duration>) -> Result<ExecOutput, ExecError> {
    let temp = tempdir().unwrap();
    ShellExecutor.run(&Invocation {
        command,
        dir: temp.path(),
        timeout,
    })
}

#[test]
fn captures_stdout() {
    let out = run("echo hello", None).unwrap();
    assert!(out.success());
    assert_eq!(out.exit_code, 0);
    assert!(out.stdout.contains("hello"));
    assert!(out.stderr.is_empty());
}

#[test]
fn captures_stderr() {
    let out = run("echo oops >&2", None).unwrap();
    assert!(out.stderr.contains("oops"));
}

#[test]
fn reports_nonzero_exit_code() {
    let out = run("exit 3", None).unwrap();
    assert!(!out.success());
    assert_eq!(out.exit_code, 3);
}

#[test]
fn runs_in_given_directory() {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join("marker"), "here").unwrap();
    let out = ShellExecutor
        .run(&Invocation {
            command: "cat marker",
            dir: temp.path(),
            timeout: None,
        })
        .unwrap();
    assert!(out.stdout.contains("here"));
}

#[test]
fn kills_on_timeout() {
    let err = run("sleep 5", Some(Duration::from_millis(200))).unwrap_err();
    match err {
        ExecError::TimedOut { timeout, .. } => {
            assert_eq!(timeout, Duration::from_millis(200));
        }
        other => panic!("expected TimedOut, got {other:?}"),
    }
}

#[test]
fn large_output_under_timeout_is_fully_captured() {
    // Well past the default pipe buffer on both streams: the child must not
    // wedge on a full pipe and get misread as a timeout.
    let out = run(
        "head -c 262144 /dev/zero; head -c 262144 /dev/zero >&2",
        Some(Duration::from_secs(10)),
    )
    .unwrap();
    assert!(out.success());
    assert_eq!(out.stdout.len(), 262_144);
    assert_eq!(out.stderr.len(), 262_144);
}

#[test]
fn fast_command_beats_timeout() {
    let out = run("echo quick", Some(Duration::from_secs(10))).unwrap();
    assert!(out.success());
    assert!(out.stdout.contains("quick"));
}

#[test]
fn records_duration() {
    let out = run("true", None).unwrap();
    assert!(out.duration < Duration::from_secs(5));
}
