//! The binary refuses to start without its three secrets.

use assert_cmd::Command;
use predicates::prelude::*;

const SECRETS: [(&str, &str); 3] = [
    ("PRACTICUM_TOKEN", "practicum-token"),
    ("TELEGRAM_TOKEN", "123:ABC"),
    ("TELEGRAM_CHAT_ID", "42"),
];

/// A command with a clean environment rooted in `dir`, so no `.env` or user
/// config file leaks in.
fn bot(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("homework-bot").unwrap();
    cmd.env_clear()
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .current_dir(dir.path());
    cmd
}

fn run_without(missing: &str) -> assert_cmd::assert::Assert {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = bot(&dir);
    for (name, value) in SECRETS {
        if name != missing {
            cmd.env(name, value);
        }
    }
    cmd.arg("--once").arg("--log-format").arg("compact").assert()
}

#[test]
fn missing_practicum_token_exits_non_zero() {
    run_without("PRACTICUM_TOKEN")
        .failure()
        .stdout(predicate::str::contains("PRACTICUM_TOKEN"));
}

#[test]
fn missing_telegram_token_exits_non_zero() {
    run_without("TELEGRAM_TOKEN")
        .failure()
        .stdout(predicate::str::contains("TELEGRAM_TOKEN"));
}

#[test]
fn missing_chat_id_exits_non_zero() {
    run_without("TELEGRAM_CHAT_ID")
        .failure()
        .stdout(predicate::str::contains("TELEGRAM_CHAT_ID"));
}

#[test]
fn all_missing_are_listed_together() {
    let dir = tempfile::tempdir().unwrap();
    bot(&dir)
        .arg("--once")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("PRACTICUM_TOKEN")
                .and(predicate::str::contains("TELEGRAM_TOKEN"))
                .and(predicate::str::contains("TELEGRAM_CHAT_ID")),
        );
}

#[test]
fn blank_secret_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    bot(&dir)
        .env("PRACTICUM_TOKEN", "   ")
        .env("TELEGRAM_TOKEN", "123:ABC")
        .env("TELEGRAM_CHAT_ID", "42")
        .arg("--once")
        .assert()
        .failure()
        .stdout(predicate::str::contains("PRACTICUM_TOKEN"));
}

#[test]
fn invalid_config_file_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[polling]\nretry_period_secs = 0\n").unwrap();

    bot(&dir)
        .envs(SECRETS)
        .arg("--once")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure();
}
