//! Behavioral specifications for the anneal CLI.
//!
//! These tests are black-box: they invoke the binary and verify stdout,
//! stderr, and exit codes. Build commands are plain shell so no make-style
//! tool needs to be installed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;

// =============================================================================
// COMMAND SPECS
// =============================================================================

/// Bare invocation shows help.
#[test]
fn bare_invocation_shows_help() {
    anneal_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

/// Exit code 0 when invoked with --help.
#[test]
fn help_exits_successfully() {
    anneal_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("anneal"));
}

/// Exit code 0 when invoked with --version.
#[test]
fn version_exits_successfully() {
    anneal_cmd().arg("--version").assert().success();
}

// =============================================================================
// VERDICT SPECS
// =============================================================================

/// Build exits 0 and the artifact exists: success marker plus byte size,
/// exit 0.
#[test]
fn success_reports_artifact_size() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "head -c 45000 /dev/zero > app"
[artifact]
path = "app"
"#,
    );

    project
        .check()
        .assert()
        .success()
        .stdout(predicates::str::contains("build: OK"))
        .stdout(predicates::str::contains("45000 bytes"));
}

/// Build exits nonzero: failure marker, literal stderr, exit 1.
#[test]
fn failure_prints_captured_stderr() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "echo 'error: missing semicolon' >&2; exit 2"
"#,
    );

    project
        .check()
        .assert()
        .code(1)
        .stdout(predicates::str::contains("build: FAIL (exit code 2)"))
        .stdout(predicates::str::contains("error: missing semicolon"));
}

/// Build exits 0 but the expected artifact is absent: never report success
/// on exit code alone.
#[test]
fn missing_artifact_fails_despite_zero_exit() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "true"
[artifact]
path = "app"
"#,
    );

    project
        .check()
        .assert()
        .code(1)
        .stdout(predicates::str::contains("artifact: MISSING"));
}

/// Build step exceeding its bound exits with the dedicated timeout code.
#[test]
fn build_timeout_has_dedicated_exit_code() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "sleep 2"
timeout = "200ms"
"#,
    );

    project
        .check()
        .assert()
        .code(3)
        .stdout(predicates::str::contains("timed out after"));
}

/// A chatty build finishing under its bound is a success, not a timeout.
#[test]
fn verbose_build_is_not_mistaken_for_timeout() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "head -c 262144 /dev/zero; head -c 262144 /dev/zero >&2; echo bin > app"
timeout = "10s"
[artifact]
path = "app"
"#,
    );

    project.check().assert().success();
}

/// Clean step timeouts are caught and labeled, not crashes.
#[test]
fn clean_timeout_is_labeled() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = "sleep 2"
clean_timeout = "200ms"
command = "true"
"#,
    );

    project
        .check()
        .assert()
        .code(3)
        .stdout(predicates::str::contains("clean"))
        .stdout(predicates::str::contains("timed out after"));
}

/// A failing clean step does not affect the verdict.
#[test]
fn clean_failure_is_ignored() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = "exit 7"
command = "true"
"#,
    );

    project.check().assert().success();
}

/// Two runs with no source change classify identically.
#[test]
fn verdict_is_idempotent() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "exit 2"
"#,
    );

    project.check().assert().code(1);
    project.check().assert().code(1);
}

// =============================================================================
// OUTPUT SPECS
// =============================================================================

/// Over-limit streams show exactly the trailing characters, no marker.
#[test]
fn long_output_is_tail_truncated() {
    let payload = format!("{}{}", "X".repeat(100), "Y".repeat(500));
    let project = Project::new()
        .file("payload", payload.as_bytes())
        .config(
            r#"
version = 1
[build]
clean = ""
command = "cat payload >&2; exit 1"
"#,
        );

    project
        .check()
        .assert()
        .code(1)
        .stdout(predicates::str::contains("Y".repeat(500)))
        .stdout(predicates::str::contains("X").not())
        .stdout(predicates::str::contains("truncated").not());
}

/// --no-tail shows captured output in full.
#[test]
fn no_tail_shows_full_output() {
    let payload = format!("{}{}", "X".repeat(100), "Y".repeat(500));
    let project = Project::new()
        .file("payload", payload.as_bytes())
        .config(
            r#"
version = 1
[build]
clean = ""
command = "cat payload >&2; exit 1"
"#,
        );

    project
        .check()
        .arg("--no-tail")
        .assert()
        .code(1)
        .stdout(predicates::str::contains(payload));
}

/// Listing report style prints an ls-style metadata line.
#[test]
fn listing_report_style() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "echo bin > app"
[artifact]
path = "app"
report = "listing"
"#,
    );

    project
        .check()
        .assert()
        .success()
        .stdout(predicates::str::is_match("-r[w-][x-]").unwrap())
        .stdout(predicates::str::contains("app"));
}

/// JSON output carries the verdict classification.
#[test]
fn json_output_reports_failure() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "exit 2"
"#,
    );

    project
        .check()
        .args(["--output", "json"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("\"status\": \"build-failed\""))
        .stdout(predicates::str::contains("\"exit_code\": 1"));
}

// =============================================================================
// CONFIG SPECS
// =============================================================================

/// anneal.toml is discovered by walking up from the project directory.
#[test]
fn config_discovered_from_subdirectory() {
    let project = Project::new()
        .dir("sub")
        .config(
            r#"
version = 1
[build]
clean = ""
command = "true"
"#,
        );

    project.check().arg("sub").assert().success();
}

/// -C points at an explicit config file.
#[test]
fn explicit_config_flag() {
    let project = Project::new().file(
        "elsewhere/custom.toml",
        br#"
version = 1
[build]
clean = ""
command = "true"
"#,
    );

    project
        .check()
        .args(["-C", "elsewhere/custom.toml"])
        .assert()
        .success();
}

/// CLI flags override config values.
#[test]
fn cli_timeout_override() {
    let project = Project::new();

    project
        .check()
        .args(["--clean", "", "--build", "sleep 3", "--timeout", "1"])
        .assert()
        .code(3);
}

/// Unsupported config versions are a config error.
#[test]
fn unsupported_version_is_config_error() {
    let project = Project::new().config("version = 3\n");

    project
        .check()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version"));
}

/// Unknown keys warn but do not fail the run.
#[test]
fn unknown_keys_warn() {
    let project = Project::new().config(
        r#"
version = 1
[build]
clean = ""
command = "true"
ceiling = "10s"
[bogus]
key = 1
"#,
    );

    project
        .check()
        .assert()
        .success()
        .stderr(predicates::str::contains("unrecognized field `bogus`"))
        .stderr(predicates::str::contains("unrecognized field `build.ceiling`"));
}

/// --tail and --no-tail conflict.
#[test]
fn tail_flags_conflict() {
    let project = Project::new();

    project
        .check()
        .args(["--tail", "10", "--no-tail"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("cannot be used together"));
}

/// A nonexistent project directory is a config error.
#[test]
fn missing_project_dir_is_config_error() {
    let project = Project::new();

    project
        .check()
        .arg("no-such-dir")
        .assert()
        .code(2)
        .stderr(predicates::str::contains("does not exist"));
}

// =============================================================================
// INIT SPECS
// =============================================================================

/// init writes a starter config that check then accepts.
#[test]
fn init_writes_valid_starter() {
    let project = Project::new();

    project
        .init()
        .assert()
        .success()
        .stdout(predicates::str::contains("anneal.toml"));

    assert!(project.path().join("anneal.toml").exists());
}

/// init refuses to overwrite an existing config.
#[test]
fn init_refuses_overwrite() {
    let project = Project::new().config("version = 1\n");

    project
        .init()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"));
}
