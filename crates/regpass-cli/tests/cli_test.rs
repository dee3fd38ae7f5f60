//! End-to-end tests for the regpass binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn regpass(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_regpass"))
        .args(["--config", "/nonexistent/regpass.yaml"])
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start regpass");

    // The binary may exit before reading everything
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().expect("failed to wait for regpass")
}

#[test]
fn test_compile_policy_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.yaml");
    std::fs::write(
        &path,
        "min_length: 8\nprohibited_chars: xyz\nrequired_sequences: [\"abc\", \"1.2\"]\n",
    )
    .unwrap();

    let output = regpass(&["compile", "-p", path.to_str().unwrap(), "-f", "raw"], "");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout.trim_end(),
        r#"grep -E "^.{8,}$" | grep -v -E "[xyz]" | grep -E "abc" | grep -E "1\.2""#
    );
}

#[test]
fn test_compile_json_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    std::fs::write(&path, r#"{"no_repeated_chars": true}"#).unwrap();

    let output = regpass(&["compile", "-p", path.to_str().unwrap(), "-f", "json"], "");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pipeline"], r#"grep -v -E "(.)\1""#);
    assert_eq!(value["stages"][0]["polarity"], "inverted");
}

#[test]
fn test_interactive_session() {
    let answers = "8\n\n1\n1\n1\n1\n\n\nno\n\n";
    let output = regpass(&[], answers);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Generated Command:"));
    assert!(stdout.contains(r#"grep -E "([\!@\#\$%\^\&\*].*){1,}""#));
}

#[test]
fn test_interactive_invalid_number() {
    let output = regpass(&["interactive"], "99999999999999999999999999999\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(!stdout.contains("Generated Command:"));
    assert!(stderr.contains("Invalid input. Please provide numeric values where applicable."));
}

#[test]
fn test_interactive_closed_stdin() {
    let output = regpass(&["interactive"], "8\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("An unexpected error occurred"), "stderr: {}", stderr);
}

#[test]
fn test_filter_wordlist_file() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "password\nPassw0rd\nPassw0rd!\nP4ss!\n").unwrap();

    let policy = dir.path().join("policy.yaml");
    std::fs::write(&policy, "min_length: 8\nupper: 1\ndigits: 1\nspecial: 1\n").unwrap();

    let output = regpass(
        &[
            "filter",
            "-p",
            policy.to_str().unwrap(),
            "-i",
            words.to_str().unwrap(),
        ],
        "",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Passw0rd!\n");
}

#[test]
fn test_check_consistent_policy() {
    let output = regpass(&["check", "--min-length", "8", "--max-length", "16"], "");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Policy is consistent."
    );
}
