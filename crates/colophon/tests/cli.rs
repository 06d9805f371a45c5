//! Drives the `colophon` command line end to end through `execute`.

use clap::Parser;
use colophon::cli::{execute, Cli};
use std::io::Write;
use tempfile::NamedTempFile;

fn run(args: &[&str]) -> String {
    let mut argv = vec!["colophon"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    execute(&cli).unwrap()
}

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// ============================================================================
// render
// ============================================================================

#[test]
fn render_plain_strips_markup() {
    let input = file_with("Hello\nsee [docs](https://d.example) now");
    let path = input.path().to_str().unwrap();
    assert_eq!(
        run(&["render", path, "--format", "plain"]),
        "Hello\nsee docs now"
    );
}

#[test]
fn render_json_reports_styles() {
    let input = file_with("Hello\nsee [docs](https://d.example) now");
    let path = input.path().to_str().unwrap();
    let out = run(&["render", path, "--format", "json"]);
    insta::assert_snapshot!(out, @r#"
{
  "plain_text": "Hello\nsee docs now",
  "styles": [
    {
      "start": 0,
      "length": 5,
      "kind": "bold"
    },
    {
      "start": 10,
      "length": 4,
      "kind": "hyperlink",
      "target": "https://d.example"
    }
  ]
}
"#);
}

#[test]
fn render_no_bold() {
    let input = file_with("Hello\nworld");
    let path = input.path().to_str().unwrap();
    let out = run(&["render", path, "--no-bold", "--format", "json"]);
    assert!(out.contains("\"styles\": []"));
}

#[test]
fn render_term_styles_first_line() {
    let input = file_with("Hello\nworld");
    let path = input.path().to_str().unwrap();
    let out = run(&["render", path, "--format", "term"]);
    assert_ne!(out, "Hello\nworld");
    assert_eq!(console::strip_ansi_codes(&out), "Hello\nworld");
}

#[test]
fn render_missing_file_fails() {
    let cli = Cli::try_parse_from(["colophon", "render", "/no/such/markup.txt"]).unwrap();
    let err = execute(&cli).unwrap_err();
    assert!(err.to_string().contains("/no/such/markup.txt"));
}

// ============================================================================
// credits
// ============================================================================

#[test]
fn credits_from_names_flag() {
    let out = run(&["credits", "--names", "ann, bo", "--format", "plain"]);
    assert_eq!(
        out,
        "Developed by\n  ann, and bo.\n\n  Many thanks for your support.\n\n"
    );
}

#[test]
fn credits_from_config() {
    let config = file_with("developers: [cy]\ncredits:\n  header: Made by\n");
    let path = config.path().to_str().unwrap();
    let out = run(&["credits", "--config", path, "--format", "plain"]);
    assert!(out.starts_with("Made by\n  and cy.\n"));
}

#[test]
fn credits_json_links_profiles() {
    let out = run(&["credits", "--names", "ann", "--format", "json"]);
    assert!(out.contains("\"target\": \"https://github.com/ann\""));
    assert!(!out.contains("\"kind\": \"bold\""));
}

#[test]
fn credits_bad_config_fails() {
    let config = file_with("credits: [");
    let path = config.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["colophon", "credits", "--config", path]).unwrap();
    assert!(execute(&cli).is_err());
}

// ============================================================================
// about
// ============================================================================

#[test]
fn about_page_plain() {
    let config = file_with(
        "name: Ledger\n\
         about_template: \"{{ name }} {{ version }}\\nBuilt {{ build_date }}.\\n\"\n\
         developers: ann, bo\n\
         other_software: \"Uses [serde](https://serde.rs).\\n\"\n",
    );
    let path = config.path().to_str().unwrap();
    let out = run(&[
        "about",
        "--config",
        path,
        "--app-version",
        "2.1.0",
        "--build-time",
        "2024-03-14T12:00:00",
        "--format",
        "plain",
    ]);
    insta::assert_snapshot!(out, @r"
Ledger 2.1.0
Built Mar 2024.

Developed by
  ann, and bo.

  Many thanks for your support.

Uses serde.
");
}

#[test]
fn about_json_has_both_documents() {
    let out = run(&["about", "--app-version", "9.9", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let about = value["about"]["plain_text"].as_str().unwrap();
    assert!(about.starts_with("Colophon 9.9\n"));
    assert_eq!(value["about"]["styles"][0]["kind"], "bold");
    assert!(value["contributions"]["plain_text"]
        .as_str()
        .unwrap()
        .starts_with("Developed by\n"));
}

// ============================================================================
// report
// ============================================================================

const SNAPSHOT: &str = "\
generated_at: 2024-03-01T09:30:00
properties:
  os.name: linux
  app.locale: de_DE
components:
  - name: org.example.core
    version: 2.1.0
    signers:
      - subject: CN=Alice, O=Example
        trusted: true
  - name: com.vendor.lib
    version: '0.9'
";

#[test]
fn report_from_snapshot() {
    let snapshot = file_with(SNAPSHOT);
    let path = snapshot.path().to_str().unwrap();
    let out = run(&["report", "--snapshot", path]);
    insta::assert_snapshot!(out, @r"
Generated at 2024-03-01T09:30:00.000

System Properties:

app.locale: de_DE
os.name: linux


Components:

com.vendor.lib (0.9)
org.example.core (2.1.0) [signed by Alice] [trusted]
");
}

#[test]
fn report_json_wraps_text() {
    let snapshot = file_with(SNAPSHOT);
    let path = snapshot.path().to_str().unwrap();
    let out = run(&["report", "--snapshot", path, "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["generated_at"], "2024-03-01T09:30:00");
    assert!(value["report"]
        .as_str()
        .unwrap()
        .ends_with("[signed by Alice] [trusted]\n"));
}

#[test]
fn live_report_lists_given_components() {
    let components = file_with(r#"[{"name": "plugin", "version": "1.0"}]"#);
    let path = components.path().to_str().unwrap();
    let out = run(&["report", "--components", path]);
    assert!(out.contains(&format!("os.name: {}\n", std::env::consts::OS)));
    assert!(out.ends_with("Components:\n\nplugin (1.0)\n"));
}
