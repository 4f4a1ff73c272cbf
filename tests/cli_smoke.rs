#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands without crashing. Each run gets an empty
//! config directory and no API key.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn sarvam(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sarvam").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("SARVAM_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indian languages"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--local"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("01. Hindi"))
        .stdout(predicate::str::contains("06. Telugu"))
        .stdout(predicate::str::contains("23. English"));
}

#[test]
fn test_invalid_language() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["--to", "Klingon", "hello"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language: 'Klingon'"));
}

#[test]
fn test_out_of_range_index_is_invalid() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["--to", "24", "hello"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_missing_language_without_terminal() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .write_stdin("Good morning")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No target language given"));
}

#[test]
fn test_empty_piped_input_is_rejected() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["--to", "Hindi"])
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is empty"));
}

#[test]
fn test_no_key_declines_local_without_terminal() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["--to", "Hindi", "Hello", "world"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "No SARVAM_API_KEY found in environment. API mode unavailable.",
        ))
        .stderr(predicate::str::contains("Do you want to use local model instead?"))
        .stderr(predicate::str::contains(
            "Exiting. To use cloud API set SARVAM_API_KEY environment variable and re-run.",
        ));
}

#[test]
fn test_text_starting_with_command_name_is_translated() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["--to", "Hindi", "chat", "with", "me"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Do you want to use local model instead?"));
}

#[test]
fn test_configure_show_hides_key() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["configure", "--show"])
        .env("SARVAM_API_KEY", "sk-smoke-secret")
        .assert()
        .success()
        .stdout(predicate::str::contains("set (from $SARVAM_API_KEY)"))
        .stdout(predicate::str::contains("https://api.sarvam.ai"))
        .stdout(predicate::str::contains("sk-smoke-secret").not());
}

#[test]
fn test_chat_help() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--model"));
}

#[test]
fn test_serve_help() {
    let home = TempDir::new().unwrap();
    sarvam(&home)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--model"));
}
