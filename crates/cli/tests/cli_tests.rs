//! CLI integration tests
use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("pagedown")
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: pagedown <URL>"));
}

#[test]
fn test_cli_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pagedown "));
}

#[test]
fn test_cli_missing_url() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<URL>"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_rejects_extra_flags() {
    cmd().args(["--format", "json", "https://example.com"]).assert().failure();
}

#[test]
fn test_cli_invalid_url() {
    cmd()
        .arg("not a url")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("not a url"))
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_unsupported_scheme() {
    cmd()
        .arg("ftp://example.com/docs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported scheme"));
}

#[test]
fn test_cli_error_is_single_line() {
    let output = cmd().arg("example.com").output().unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert_eq!(stderr.lines().filter(|line| line.starts_with("Error:")).count(), 1);
    assert_eq!(stderr.trim_end().lines().count(), 1);
}
