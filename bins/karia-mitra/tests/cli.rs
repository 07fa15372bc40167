//! Command line behaviour that needs no network access

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn karia(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("karia-mitra").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("KARIA_SUPABASE_URL")
        .env_remove("SUPABASE_URL")
        .env_remove("KARIA_ENV")
        .env_remove("KARIA_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("contact"));
}

#[test]
fn blank_search_prints_no_results() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["search", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results"));
}

#[test]
fn blank_search_json_is_empty_array() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["--format", "json", "search", ""])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn link_call_strips_formatting() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["link", "call", "98220-12345"])
        .assert()
        .success()
        .stdout(predicate::str::diff("tel:9822012345\n"));
}

#[test]
fn link_whatsapp_encodes_message() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["link", "whatsapp", "Need a mason", "--number", "+91 98765 43210"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "https://wa.me/919876543210?text=Need%20a%20mason\n",
        ));
}

#[test]
fn config_file_overrides_support_number() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".karia-mitra.toml"),
        "[contact]\nsupport_phone = \"+91 11 2345 6789\"\n",
    )
    .unwrap();

    karia(&dir)
        .args(["link", "call"])
        .assert()
        .success()
        .stdout(predicate::str::diff("tel:+911123456789\n"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["--config", "nope.toml", "link", "support"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("✗ [E3001]"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_config_value_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("karia-mitra.toml"),
        "[search]\nfield_limit = 0\n",
    )
    .unwrap();

    karia(&dir)
        .args(["--format", "json", "link", "support"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("search.field_limit"));
}

#[test]
fn unknown_channel_is_rejected() {
    let dir = TempDir::new().unwrap();
    karia(&dir)
        .args(["contact", "labours", "1", "--via", "sms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sms"));
}
