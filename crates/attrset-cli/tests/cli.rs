#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs the binary against a config file inside `temp`, ignoring the caller's environment.
fn attrset_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("attrset"));
    cmd.arg("--config")
        .arg(temp.path().join("attrset.toml"))
        .env_remove("ATTRSET_TOKEN_LISTS")
        .env_remove("ATTRSET_TOKEN_LIST_PATTERNS")
        .env_remove("ATTRSET_BOOLEAN_STYLE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_merge_inline_sets() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args([
            "merge",
            r#"{"class": "btn", "data": {"controller": "a"}}"#,
            r#"{"class": "btn-primary", "data": {"controller": "b"}, "type": "submit"}"#,
        ])
        .assert()
        .success()
        .stdout("class=\"btn btn-primary\" data-controller=\"a b\" type=\"submit\"\n");
}

#[test]
fn test_merge_override_marker() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["merge", r#"{"class": "default"}"#, r#"{"class!": "override"}"#])
        .assert()
        .success()
        .stdout("class=\"override\"\n");
}

#[test]
fn test_merge_from_file_as_json() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base.json");
    fs::write(&base, r#"{"class": ["a", {"b": true, "c": false}]}"#).unwrap();

    attrset_cmd(&temp)
        .args(["merge", "--format", "json"])
        .arg(format!("@{}", base.display()))
        .arg(r#"{"id": "main"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""class": "a b""#))
        .stdout(predicate::str::contains(r#""id": "main""#));
}

#[test]
fn test_merge_pairs_format() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["merge", "-f", "pairs", r#"{"hidden": true, "aria": {"label": "Close"}}"#])
        .assert()
        .success()
        .stdout("hidden=hidden\naria-label=Close\n");
}

#[test]
fn test_tokens_command() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["tokens", "null", "", "false", "123", r#"{"song": false}"#])
        .assert()
        .success()
        .stdout("123\n");
}

#[test]
fn test_tag_command() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args([
            "tag",
            "button",
            r#"{"class": "btn", "disabled": true}"#,
            "--content",
            "<Save>",
        ])
        .assert()
        .success()
        .stdout("<button class=\"btn\" disabled=\"disabled\">&lt;Save&gt;</button>\n");
}

#[test]
fn test_config_file_changes_policy_and_boolean_style() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("attrset.toml"),
        "token_lists = [\"rel\"]\ntoken_list_patterns = []\nboolean_style = \"literal\"\n",
    )
    .unwrap();

    attrset_cmd(&temp)
        .args([
            "merge",
            r#"{"class": "a", "rel": "x", "aria": {"expanded": false}}"#,
            r#"{"class": "b", "rel": "y"}"#,
        ])
        .assert()
        .success()
        .stdout("class=\"b\" rel=\"x y\" aria-expanded=\"false\"\n");
}

#[test]
fn test_env_overrides_config() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .env("ATTRSET_TOKEN_LISTS", "title")
        .args(["merge", r#"{"title": "a"}"#, r#"{"title": "b"}"#])
        .assert()
        .success()
        .stdout("title=\"a b\"\n");
}

#[test]
fn test_invalid_json_fails() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["merge", "{not json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_invalid_pattern_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("attrset.toml"),
        "token_list_patterns = [\"data-(\"]\n",
    )
    .unwrap();
    attrset_cmd(&temp)
        .args(["merge", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid token list pattern"));
}

#[test]
fn test_config_template() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["config", "template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("token_list_patterns"));
}

#[test]
fn test_config_path_reports_explicit_file() {
    let temp = TempDir::new().unwrap();
    attrset_cmd(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("attrset.toml"));
}
