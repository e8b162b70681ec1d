//! Configuration and command-line integration tests.
//!
//! Covers:
//! - Loading TOML config files from disk
//! - Mapping config sections onto renderer flags and filter settings
//! - Running the `plainlink` binary against files and stdin

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use plainlink::config::CONFIG_PATH_ENV;
use plainlink::{HtmlFlags, PlainlinkConfig, SpellingFilter};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write test file");
    path
}

/// Runs the binary with `config` as its config file and `stdin` as input.
fn run(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_plainlink"))
        .args(args)
        .env(CONFIG_PATH_ENV, config)
        .env_remove("PLAINLINK_LOG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start plainlink");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("Failed to wait for plainlink")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "config.toml",
        r#"
        [limits]
        max_address_len = 64

        [html]
        ignore_urls = true
        emoticon_base_url = "https://example.org/smileys"

        [filter]
        quote_prefix = "> "
        filter_email_addresses = false

        [logging]
        format = "json"
        "#,
    );

    let config = PlainlinkConfig::load_from_file(&path).unwrap();
    assert_eq!(config.limits.max_url_len, 4096);
    assert_eq!(config.limits.max_address_len, 64);
    assert_eq!(config.html.flags(), HtmlFlags::IGNORE_URLS);
    assert_eq!(config.html.emoticon_base_url, "https://example.org/smileys");
    assert_eq!(config.logging.format.as_deref(), Some("json"));
    assert_eq!(config.logging.filter, None);

    let filter = SpellingFilter::new(
        "> quoted\nsee www.kde.org or foo@bar.baz",
        &config.spelling_filter_config(),
    );
    assert_eq!(
        filter.filtered_text(),
        format!("{}see {} or foo@bar.baz", " ".repeat(9), " ".repeat(11))
    );
}

#[test]
fn test_load_from_file_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(PlainlinkConfig::load_from_file(&missing).is_err());

    let broken = write_file(&dir, "broken.toml", "[html\npreserve_spaces = true");
    let err = PlainlinkConfig::load_from_file(&broken).unwrap_err();
    assert!(err.to_string().contains("parse_config_file"));
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_cli_html_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "");

    let output = run(&config, &["html", "--preserve-spaces"], "  see www.kde.org.");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "&nbsp;&nbsp;see <a href=\"http://www.kde.org\">www.kde.org</a>.\n"
    );
}

#[test]
fn test_cli_html_uses_config_flags() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "[html]\nhighlight_text = true\n");
    let input = write_file(&dir, "input.txt", "a *b* www.kde.org");

    let output = run(
        &config,
        &["html", "--ignore-urls", input.to_str().unwrap()],
        "",
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "a <b>*b*</b> www.kde.org\n");
}

#[test]
fn test_cli_filter() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "[filter]\nquote_prefix = \"> \"\n");
    let text = "> quote\nmail foo@bar.baz at www.kde.org -- KMail";

    let output = run(&config, &["filter", "--emails", "--strip", "KMail"], text);
    assert!(output.status.success());
    let filtered = stdout(&output);
    assert_eq!(filtered.chars().count(), text.chars().count());
    assert_eq!(
        filtered,
        format!(
            "{}mail {} at www.kde.org -- {}",
            " ".repeat(8),
            " ".repeat(11),
            " ".repeat(5)
        )
    );
}

#[test]
fn test_cli_links_json() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "");

    let output = run(&config, &["links", "--json"], "www.kde.org, foo@bar.baz");
    assert!(output.status.success());

    let links: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let links = links.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["kind"], "url");
    assert_eq!(links[0]["href"], "http://www.kde.org");
    assert_eq!(links[0]["start"], 0);
    assert_eq!(links[0]["end"], 10);
    assert_eq!(links[1]["kind"], "email_address");
    assert_eq!(links[1]["text"], "foo@bar.baz");
}

#[test]
fn test_cli_links_plain() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "");

    let output = run(&config, &["links"], "go to ftp.kde.org");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "url\t6..16\tftp.kde.org\tftp://ftp.kde.org\n"
    );
}

#[test]
fn test_cli_reports_errors() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.toml", "");
    let missing = dir.path().join("missing.txt");

    let output = run(&config, &["links", missing.to_str().unwrap()], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: "), "{stderr}");

    let broken = write_file(&dir, "broken.toml", "[unknown]\n");
    let output = run(&broken, &["links"], "");
    assert!(!output.status.success());
}
