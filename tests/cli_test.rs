//! Integration tests for the demo binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The binary with `HOME` pointed at an empty directory, so no user
/// config file leaks into the test.
fn ember(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("ember"));
    cmd.env("HOME", home.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_no_args_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("contact"))
        .stdout(predicate::str::contains("db create"));
    Ok(())
}

#[test]
fn cli_help_flag() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"))
        .stdout(predicate::str::contains("--verbose"));
    Ok(())
}

#[test]
fn cli_command_help() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["greet", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Greets the user"))
        .stdout(predicate::str::contains("--end-char"))
        .stdout(predicate::str::contains("Available commands:").not());
    Ok(())
}

#[test]
fn cli_version() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "ember {}",
            env!("CARGO_PKG_VERSION")
        )));
    Ok(())
}

#[test]
fn cli_greet() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["greet", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello Ana!"));

    ember(&home)
        .args(["greet", "--end-char=?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World?"));
    Ok(())
}

#[test]
fn cli_missing_argument_exits_40() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .arg("contact")
        .assert()
        .code(40)
        .stderr(predicate::str::contains("The argument \"name\" is required"));
    Ok(())
}

#[test]
fn cli_bad_integer_exits_40() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["contact", "Ana", "ten"])
        .assert()
        .code(40)
        .stderr(predicate::str::contains(
            "The argument \"age\" with the value \"ten\" must be integer",
        ));
    Ok(())
}

#[test]
fn cli_unknown_command_exits_20() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .arg("nope")
        .assert()
        .code(20)
        .stderr(predicate::str::contains("Command \"nope\" not found."));
    Ok(())
}

#[test]
fn cli_contact_with_options() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["contact", "Ana", "12", "-e", "ana@example.com", "--tags=a,b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact Ana with 12 years old"))
        .stdout(predicate::str::contains("email: ana@example.com"))
        .stdout(predicate::str::contains("tags: a, b"))
        .stderr(predicate::str::contains("Ana is under age"));
    Ok(())
}

#[test]
fn cli_verbose_logs_parsing() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["contact", "-v", "Ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact Ana with 18 years old"))
        .stderr(predicate::str::contains("Argument \"name\" = Ana"));
    Ok(())
}

#[test]
fn cli_group_lists_subcommands() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .arg("db")
        .assert()
        .success()
        .stdout(predicate::str::contains("db create"))
        .stdout(predicate::str::contains("db drop"))
        .stdout(predicate::str::contains("greet").not());
    Ok(())
}

#[test]
fn cli_dotted_command() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["db", "create", "shop", "--owner", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database shop created"));

    // Not a terminal: the confirmation takes its first choice.
    ember(&home)
        .args(["db", "drop", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database shop dropped"));
    Ok(())
}

#[test]
fn cli_config_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor = vim"));

    let written = fs::read_to_string(home.path().join(".config/ember/config.yml"))?;
    assert!(written.contains("editor: vim"));

    ember(&home)
        .args(["config", "get", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vim"));
    Ok(())
}

#[test]
fn cli_config_missing_key_exits_30() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["config", "get", "missing"])
        .assert()
        .code(30)
        .stderr(predicate::str::contains("Key \"missing\" not set"));
    Ok(())
}

#[test]
fn cli_no_ansi_flag_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    ember(&home)
        .args(["--no-ansi", "greet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World!"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_non_utf8_argument_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let home = TempDir::new()?;
    ember(&home)
        .arg("greet")
        .arg(OsStr::from_bytes(b"caf\xe9"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid command line: caf"))
        .stderr(predicate::str::contains("panicked").not());
    Ok(())
}
