//! End-to-end tests driving the shim binaries as external processes, the
//! way a build system actually invokes them.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;
use tempfile::TempDir;

fn blight_cc() -> Command {
    Command::cargo_bin("blight-cc").unwrap()
}

fn blight_strip() -> Command {
    Command::cargo_bin("blight-strip").unwrap()
}

/// Writes a small shell script that records its argv to `record_path` and
/// exits 0, standing in for a real compiler the shim forwards to.
fn recording_tool(dir: &TempDir, record_path: &std::path::Path) -> std::path::PathBuf {
    let script = dir.path().join("fake-cc.sh");
    fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" > {}\nexit 0\n", record_path.display()),
    )
    .unwrap();
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, &perms).unwrap();
    script
}

#[test]
fn missing_wrapped_tool_env_var_fails() {
    let tmp = TempDir::new().unwrap();
    blight_cc()
        .env_remove("BLIGHT_WRAPPED_CC")
        .env_remove("BLIGHT_ACTIONS")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("BLIGHT_WRAPPED_CC"));
}

#[test]
fn forwards_arguments_to_wrapped_tool() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("argv.txt");
    let tool = recording_tool(&tmp, &record);

    blight_cc()
        .env("BLIGHT_WRAPPED_CC", &tool)
        .env_remove("BLIGHT_ACTIONS")
        .args(["-c", "-Wall", "main.c"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let recorded = fs::read_to_string(&record).unwrap();
    assert!(recorded.contains("-c"));
    assert!(recorded.contains("-Wall"));
    assert!(recorded.contains("main.c"));
}

#[test]
fn ignore_werror_action_strips_flag_before_forwarding() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("argv.txt");
    let tool = recording_tool(&tmp, &record);

    blight_cc()
        .env("BLIGHT_WRAPPED_CC", &tool)
        .env("BLIGHT_ACTIONS", "IgnoreWerror")
        .args(["-Werror", "-Wall", "-c", "main.c"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let recorded = fs::read_to_string(&record).unwrap();
    assert!(!recorded.contains("-Werror"));
    assert!(recorded.contains("-Wall"));
}

#[test]
fn inject_flags_action_appends_configured_cflags() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("argv.txt");
    let tool = recording_tool(&tmp, &record);

    blight_cc()
        .env("BLIGHT_WRAPPED_CC", &tool)
        .env("BLIGHT_ACTIONS", "InjectFlags")
        .env("BLIGHT_ACTION_INJECTFLAGS", "CFLAGS='-Wextra -Wpedantic'")
        .args(["-c", "main.c"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let recorded = fs::read_to_string(&record).unwrap();
    assert!(recorded.contains("-Wextra"));
    assert!(recorded.contains("-Wpedantic"));
}

#[test]
fn skip_strip_never_invokes_wrapped_tool() {
    let tmp = TempDir::new().unwrap();

    blight_strip()
        // A wrapped tool that would fail loudly if it were ever run.
        .env("BLIGHT_WRAPPED_STRIP", "false")
        .env("BLIGHT_ACTIONS", "SkipStrip")
        .args(["a.out"])
        .current_dir(tmp.path())
        .assert()
        .success();
}

#[test]
fn unknown_action_name_fails_the_shim() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("argv.txt");
    let tool = recording_tool(&tmp, &record);

    blight_cc()
        .env("BLIGHT_WRAPPED_CC", &tool)
        .env("BLIGHT_ACTIONS", "NotARealAction")
        .args(["-c", "main.c"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn record_action_writes_journal_line() {
    let tmp = TempDir::new().unwrap();
    let record = tmp.path().join("argv.txt");
    let tool = recording_tool(&tmp, &record);
    let journal = tmp.path().join("journal.jsonl");

    blight_cc()
        .env("BLIGHT_WRAPPED_CC", &tool)
        .env("BLIGHT_ACTIONS", "Record")
        .env("BLIGHT_ACTION_RECORD", format!("output={}", journal.display()))
        .args(["-c", "main.c"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let contents = fs::read_to_string(&journal).unwrap();
    assert!(contents.contains("\"kind\":\"CC\""));
}
