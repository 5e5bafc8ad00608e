//! End-to-end runs of the `gatepass` binary against a temporary database.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Run {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

fn gatepass(dir: &Path, args: &[&str]) -> Run {
    let output: Output = Command::new(env!("CARGO_BIN_EXE_gatepass"))
        .arg("--config")
        .arg(dir.join("gatepass.toml"))
        .arg("--db")
        .arg(dir.join("gatepass.db"))
        .args(args)
        .output()
        .expect("failed to execute gatepass");
    Run {
        stdout: String::from_utf8(output.stdout).unwrap().trim().to_string(),
        stderr: String::from_utf8(output.stderr).unwrap().trim().to_string(),
        code: output.status.code(),
    }
}

fn register_alice(dir: &Path) -> String {
    let run = gatepass(
        dir,
        &[
            "register",
            "--fullname",
            "Alice Tan",
            "--email",
            "alice@x.edu",
            "--institution",
            "MIT",
            "--age",
            "21",
            "--session",
            "Friday, January 24th, 2025",
        ],
    );
    assert_eq!(run.code, Some(0), "{}", run.stderr);
    run.stdout
}

#[test]
fn register_prints_credential_and_fetch_reissues_it() {
    let dir = TempDir::new().unwrap();
    let credential = register_alice(dir.path());
    assert!(credential.starts_with("{\"id\":\""));
    assert!(credential.ends_with("\"session\":\"Friday, January 24th, 2025\"}"));

    let fetched = gatepass(
        dir.path(),
        &["fetch", "--email", "alice@x.edu", "--session", "fri"],
    );
    assert_eq!(fetched.code, Some(0), "{}", fetched.stderr);
    assert_eq!(fetched.stdout, credential);
}

#[test]
fn duplicate_registration_reports_conflict() {
    let dir = TempDir::new().unwrap();
    register_alice(dir.path());

    let run = gatepass(
        dir.path(),
        &[
            "register",
            "--fullname",
            "Alicia",
            "--email",
            "alice@x.edu",
            "--institution",
            "MIT",
            "--age",
            "21",
            "--session",
            "fri",
        ],
    );
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.starts_with("error[conflict]:"), "{}", run.stderr);
}

#[test]
fn check_in_status_and_check_out_cycle() {
    let dir = TempDir::new().unwrap();
    let credential = register_alice(dir.path());
    let attendee = credential
        .split('"')
        .nth(3)
        .expect("credential should carry an id")
        .to_string();

    let run = gatepass(dir.path(), &["check-in", &credential]);
    assert_eq!(run.code, Some(0), "{}", run.stderr);

    let status = gatepass(
        dir.path(),
        &["status", "--attendee", &attendee, "--session", "fri"],
    );
    assert_eq!(status.stdout, "present");

    let roster = gatepass(dir.path(), &["roster", "--session", "fri"]);
    assert!(roster.stdout.contains("Alice Tan"));

    let again = gatepass(dir.path(), &["check-in", &credential]);
    assert_eq!(again.code, Some(1));
    assert!(again.stderr.starts_with("error[conflict]:"));

    let out = gatepass(dir.path(), &["check-out", &credential]);
    assert_eq!(out.code, Some(0), "{}", out.stderr);
    let status = gatepass(
        dir.path(),
        &["status", "--attendee", &attendee, "--session", "fri"],
    );
    assert_eq!(status.stdout, "absent");

    let out_again = gatepass(dir.path(), &["check-out", &credential]);
    assert!(out_again.stderr.starts_with("error[precondition]:"));
}

#[test]
fn configured_gate_rejects_other_sessions() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gatepass.toml"),
        "[gate]\nsession = \"Saturday, January 25th, 2025\"\n",
    )
    .unwrap();
    let credential = register_alice(dir.path());

    let run = gatepass(dir.path(), &["check-in", &credential]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.starts_with("error[session_mismatch]:"), "{}", run.stderr);

    let overridden = gatepass(dir.path(), &["check-in", "--gate", "fri", &credential]);
    assert_eq!(overridden.code, Some(0), "{}", overridden.stderr);
}

#[test]
fn malformed_credential_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    let run = gatepass(dir.path(), &["check-in", "{\"id\":\"nope\"}"]);
    assert_eq!(run.code, Some(1));
    assert!(run.stderr.starts_with("error[validation]:"), "{}", run.stderr);
}

#[test]
fn sessions_lists_catalog_and_enrollments() {
    let dir = TempDir::new().unwrap();
    let catalog = gatepass(dir.path(), &["sessions"]);
    assert_eq!(catalog.stdout.lines().count(), 3);

    register_alice(dir.path());
    let mine = gatepass(dir.path(), &["sessions", "--email", "alice@x.edu"]);
    assert_eq!(mine.stdout, "fri\tFriday, January 24th, 2025");
}
