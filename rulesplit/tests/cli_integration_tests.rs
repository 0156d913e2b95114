// rulesplit/tests/cli_integration_tests.rs
//! Command-line integration tests for the `rulesplit` binary.
//!
//! Each test runs the compiled binary through `assert_cmd`, writing rule files
//! and catalogs to temporary files. Output written to a pipe is plain text unless
//! `--format ansi` is requested; `strip_ansi_escapes` is used where colours are forced.

use anyhow::Result;
#[allow(unused_imports)]
use predicates::prelude::*;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

#[allow(unused_imports)]
use assert_cmd::prelude::*;
use assert_cmd::Command;

use strip_ansi_escapes::strip as strip_ansi_escapes_fn;
use test_log::test;

fn rulesplit() -> Command {
    let mut cmd = Command::cargo_bin("rulesplit").unwrap();
    cmd.env_remove("RULESPLIT_CONFIG")
        .env_remove("RULESPLIT_CATALOG")
        .env_remove("RULESPLIT_LOCALE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_temp(contents: &str, suffix: &str) -> Result<NamedTempFile> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

const SHOUT_RULES: &str = r#"
rules:
  - name: greeting
    pattern: hey
    flags: gi
    replace_with: HEY
  - name: year
    pattern: '\d{4}'
    style: bold
"#;

#[test]
fn apply_uses_configured_replacements() -> Result<()> {
    let config = write_temp(SHOUT_RULES, ".yaml")?;
    let config_path = config.path().to_str().unwrap();

    rulesplit()
        .args(["apply", "--no-defaults", "--config", config_path, "hey, it's 2010. Hey!"])
        .assert()
        .success()
        .stdout("HEY, it's 2010. HEY!\n");
    Ok(())
}

#[test]
fn apply_reads_stdin_when_no_text_is_given() -> Result<()> {
    let config = write_temp(SHOUT_RULES, ".yaml")?;
    let config_path = config.path().to_str().unwrap();

    rulesplit()
        .args(["apply", "--no-defaults", "--config", config_path])
        .write_stdin("hey there\n")
        .assert()
        .success()
        .stdout("HEY there\n");
    Ok(())
}

#[test]
fn json_output_lists_every_item() -> Result<()> {
    let config = write_temp(SHOUT_RULES, ".yaml")?;
    let config_path = config.path().to_str().unwrap();

    let output = rulesplit()
        .args(["apply", "--no-defaults", "--config", config_path, "-f", "json", "in 2010"])
        .output()?;
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let items = items.as_array().expect("a JSON array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "literal");
    assert_eq!(items[0]["text"], "in ");
    assert_eq!(items[1]["kind"], "node");
    assert_eq!(items[1]["key"], "20101");
    assert_eq!(items[1]["value"]["text"], "2010");
    assert_eq!(items[1]["value"]["style"], "bold");
    Ok(())
}

#[test]
fn slashes_in_a_configured_pattern_are_plain_text() -> Result<()> {
    let config = write_temp(
        r#"
rules:
  - name: endpoint
    pattern: /api/
    replace_with: "<api>"
"#,
        ".yaml",
    )?;
    let config_path = config.path().to_str().unwrap();

    rulesplit()
        .args(["apply", "--no-defaults", "--config", config_path, "GET /api/users"])
        .assert()
        .success()
        .stdout("GET <api>users\n");
    Ok(())
}

#[test]
fn non_global_rule_is_rejected() -> Result<()> {
    let config = write_temp(
        r#"
rules:
  - name: once
    pattern: hey
    flags: i
"#,
        ".yaml",
    )?;
    let config_path = config.path().to_str().unwrap();

    rulesplit()
        .args(["apply", "--no-defaults", "--config", config_path, "hey"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("once"));
    Ok(())
}

#[test]
fn ansi_output_strips_to_plain_text() -> Result<()> {
    let output = rulesplit()
        .args(["apply", "-f", "ansi", "Run `make` for {target}"])
        .output()?;
    assert!(output.status.success());

    let raw = String::from_utf8(output.stdout.clone())?;
    assert!(raw.contains('\u{1b}'));
    let stripped = String::from_utf8(strip_ansi_escapes_fn(&output.stdout))?;
    assert_eq!(stripped, "Run make for {target}\n");
    Ok(())
}

#[test]
fn summary_goes_to_stderr() -> Result<()> {
    rulesplit()
        .args(["apply", "--summary", "{a} and {b}"])
        .assert()
        .success()
        .stdout("{a} and {b}\n")
        .stderr(predicate::str::contains("placeholder").and(predicate::str::contains("2")));
    Ok(())
}

#[test]
fn disabled_rule_leaves_text_alone() -> Result<()> {
    let output = rulesplit()
        .args(["apply", "-f", "json", "-x", "placeholder", "{a}"])
        .output()?;
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(items[0]["kind"], "literal");
    assert_eq!(items[0]["text"], "{a}");
    Ok(())
}

const CATALOG: &str = r#"
inbox:
  en: "Hello {name}, you have {count} items"
  de: "Hallo {name}, du hast {count} Einträge"
"#;

#[test]
fn translate_renders_the_selected_locale() -> Result<()> {
    let catalog = write_temp(CATALOG, ".yaml")?;
    let catalog_path = catalog.path().to_str().unwrap();

    let output = rulesplit()
        .args(["translate", "-c", catalog_path, "--id", "inbox", "-l", "de", "-f", "json"])
        .output()?;
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let keys: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["{name}1", "{count}3"]);
    Ok(())
}

#[test]
fn translate_reads_the_locale_from_the_environment() -> Result<()> {
    let catalog = write_temp(CATALOG, ".yaml")?;

    rulesplit()
        .env("RULESPLIT_CATALOG", catalog.path())
        .env("RULESPLIT_LOCALE", "en")
        .args(["translate", "--id", "inbox"])
        .assert()
        .success()
        .stdout("Hello {name}, you have {count} items\n");
    Ok(())
}

#[test]
fn missing_translation_warns_and_prints_nothing() -> Result<()> {
    let catalog = write_temp(CATALOG, ".yaml")?;
    let catalog_path = catalog.path().to_str().unwrap();

    rulesplit()
        .args(["translate", "-c", catalog_path, "--id", "farewell", "-l", "de"])
        .assert()
        .success()
        .stdout("\n")
        .stderr(predicate::str::contains("Translation key farewell not found for locale de"));
    Ok(())
}

#[test]
fn translate_without_locale_renders_nothing() -> Result<()> {
    let catalog = write_temp(CATALOG, ".yaml")?;
    let catalog_path = catalog.path().to_str().unwrap();

    rulesplit()
        .args(["translate", "-c", catalog_path, "--id", "inbox"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No locale selected"));
    Ok(())
}

#[test]
fn rules_lists_in_application_order() -> Result<()> {
    let output = rulesplit().args(["rules", "-e", "url"]).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(strip_ansi_escapes_fn(&output.stdout))?;
    let bold = stdout.find("bold").expect("bold rule listed");
    let placeholder = stdout.find("placeholder").expect("placeholder rule listed");
    let url = stdout.find("url").expect("url rule listed");
    assert!(bold < placeholder && placeholder < url);
    Ok(())
}

#[test]
fn rules_hides_opt_in_rules_by_default() -> Result<()> {
    let output = rulesplit().args(["rules"]).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(strip_ansi_escapes_fn(&output.stdout))?;
    assert!(stdout.contains("placeholder"));
    assert!(!stdout.contains("https?"));
    Ok(())
}
