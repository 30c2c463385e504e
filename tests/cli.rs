use std::process::Command; // Run programs

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions

mod common;

fn footerlog(cwd: &tempfile::TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("footerlog")?;
    cmd.current_dir(cwd.path())
        .env_remove("RUST_LOG")
        .env_remove("FOOTERLOG_PLAIN")
        .env_remove("FOOTERLOG_WORKERS")
        .env_remove("FOOTERLOG_MESSAGES_PER_WORKER")
        .env_remove("FOOTERLOG_DELAY_MS")
        .env_remove("FOOTERLOG_FOOTER_TITLE")
        .env_remove("FOOTERLOG_PROGRESS_BAR_WIDTH");
    Ok(cmd)
}

#[test]
fn test_cli_simulate() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    footerlog(&tmpdir)?
        .arg("simulate")
        .arg("--workers")
        .arg("2")
        .arg("--messages")
        .arg("3")
        .arg("--delay-ms")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\x1b[0J"))
        .stdout(predicate::str::contains("[task 0] step 2 done\n"))
        .stdout(predicate::str::contains("[task 1] step 2 done\n"))
        .stdout(predicate::str::contains("100.0% complete"))
        .stdout(predicate::str::ends_with("Finished 6 steps\n"));

    Ok(())
}

#[test]
fn test_cli_simulate_plain() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    footerlog(&tmpdir)?
        .args(["simulate", "--workers", "1", "--messages", "2", "--delay-ms", "0", "--plain"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "\x1b[0J[task 0] step 0 done\n\x1b[0J[task 0] step 1 done\n\x1b[0J\x1b[0JFinished 2 steps\n",
        ));

    Ok(())
}

#[test]
fn test_cli_simulate_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;
    common::setup_config(
        tmpdir.path(),
        &[
            ("workers", toml::Value::Integer(3)),
            ("messages_per_worker", toml::Value::Integer(1)),
            ("delay_ms", toml::Value::Integer(0)),
            ("footer_title", toml::Value::String(String::from("Building:"))),
        ],
    )?;

    footerlog(&tmpdir)?
        .arg("simulate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Building:"))
        .stdout(predicate::str::contains("[task 2] step 0 done\n"))
        .stdout(predicate::str::ends_with("Finished 3 steps\n"));

    Ok(())
}

#[test]
fn test_cli_missing_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    footerlog(&tmpdir)?
        .arg("--config")
        .arg("does-not-exist.toml")
        .arg("simulate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Loading configuration file"));

    Ok(())
}

#[test]
fn test_cli_pipe() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    assert_cmd::Command::from_std(footerlog(&tmpdir)?)
        .arg("pipe")
        .arg("--footer")
        .arg("Seen:")
        .write_stdin("first\nsecond\n")
        .assert()
        .success()
        .stdout(predicate::eq(
            "\x1b[0Jfirst\nSeen: 1 lines\x1b[1A\x1b[0Jsecond\nSeen: 2 lines\x1b[1A\x1b[0J",
        ));

    Ok(())
}

#[test]
fn test_cli_pipe_read_error_cleans_up() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    assert_cmd::Command::from_std(footerlog(&tmpdir)?)
        .arg("pipe")
        .write_stdin(&b"first\n\xff\n"[..])
        .assert()
        .failure()
        .stdout(predicate::eq(
            "\x1b[0Jfirst\nLines read: 1 lines\x1b[1A\x1b[0J",
        ))
        .stderr(predicate::str::contains("Reading from stdin"));

    Ok(())
}

#[test]
fn test_cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let tmpdir = tempfile::tempdir()?;

    footerlog(&tmpdir)?.assert().failure();

    Ok(())
}
